use std::{collections::BTreeMap, fmt::Display};

use crate::sql::types::Value;

/// Abstract Syntax Tree (AST) node definitions, one variant per command
#[derive(Debug, PartialEq)]
pub enum Statement {
    /// CREATE TABLE statement
    CreateTable {
        name: String,
        columns: Vec<String>,
    },
    /// INSERT statement
    Insert {
        table_name: String,
        /// None when the column list is omitted and values are positional
        columns: Option<Vec<String>>,
        values: Vec<Vec<Value>>,
    },
    /// SELECT statement
    Select(Select),
    /// UPDATE statement
    Update {
        table_name: String,
        columns: BTreeMap<String, Value>,
        where_clause: Option<Predicate>,
    },
    /// DELETE statement
    Delete {
        table_name: String,
        where_clause: Option<Predicate>,
    },
}

/// A parsed SELECT with every optional clause
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table_name: String,
    pub projection: Projection,
    /// Aggregate calls from the select list, kept apart from plain columns
    pub aggregates: Vec<AggregateCall>,
    pub where_clause: Option<Predicate>,
    pub group_by: Option<String>,
    pub order_by: Option<(String, OrderDirection)>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl Select {
    /// A plain `SELECT * FROM table`
    pub fn all(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            projection: Projection::All,
            aggregates: Vec::new(),
            where_clause: None,
            group_by: None,
            order_by: None,
            limit: None,
            offset: None,
        }
    }
}

/// Plain (non-aggregate) part of the select list
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// `*`, whole records
    All,
    /// Explicit column names, lowercased
    Columns(Vec<String>),
}

/// `FUNC(column) [AS alias]`
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateCall {
    pub func: AggregateFunc,
    pub column: String,
    pub alias: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunc {
    pub fn from_str(name: &str) -> Option<Self> {
        Some(match name.to_uppercase().as_ref() {
            "COUNT" => Self::Count,
            "SUM" => Self::Sum,
            "AVG" => Self::Avg,
            "MIN" => Self::Min,
            "MAX" => Self::Max,
            _ => return None,
        })
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }
}

impl Display for AggregateFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Sort direction (ascending or descending)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// A single `column op literal` comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub op: Operator,
    pub value: Value,
}

/// Comparison operators allowed in a WHERE clause
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Like,
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Like => "LIKE",
        })
    }
}
