use std::fmt::Display;

use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

use crate::{
    error::Result,
    sql::{
        executor::{
            agg::Aggregate,
            query::{Limit, Offset, Order, Projection, Scan},
        },
        plan::Node,
        schema::Table,
        types::{Row, Value},
    },
};

mod agg;
pub mod filter;
mod query;

/// Executor trait, one implementation per pipeline stage
pub trait Executor<'a> {
    fn execute(self: Box<Self>) -> Result<Records>;
}

/// Builds an executor chain from a plan node, reading from `table`
impl<'a> dyn Executor<'a> + 'a {
    pub fn build(node: Node, table: &'a Table) -> Box<dyn Executor<'a> + 'a> {
        match node {
            Node::Scan { filter } => Scan::new(table, filter),
            Node::Aggregate {
                source,
                group_by,
                aggregates,
            } => Aggregate::new(Self::build(*source, table), group_by, aggregates),
            Node::Order {
                source,
                column,
                direction,
            } => Order::new(Self::build(*source, table), column, direction),
            Node::Offset { source, offset } => Offset::new(Self::build(*source, table), offset),
            Node::Limit { source, limit } => Limit::new(Self::build(*source, table), limit),
            Node::Projection { source, columns } => {
                Projection::new(Self::build(*source, table), columns)
            }
        }
    }
}

/// Column names plus positional rows, as produced by every executor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Records {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Records {
    /// Returns the position of a column in every row
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the value of `column` in row `row`, if both exist
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let pos = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[pos])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Serializes as a sequence of objects keyed by column, in column order
impl Serialize for Records {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&Record {
                columns: &self.columns,
                values: row,
            })?;
        }
        seq.end()
    }
}

struct Record<'r> {
    columns: &'r [String],
    values: &'r [Value],
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (col, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(col, value)?;
        }
        map.end()
    }
}

/// Execution result of one statement
#[derive(Debug, PartialEq)]
pub enum ResultSet {
    CreateTable { table_name: String },
    Insert { table_name: String, count: usize },
    Scan(Records),
    Update { count: usize },
    Delete { count: usize },
}

/// Human-readable confirmation for each kind of result
impl Display for ResultSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultSet::CreateTable { table_name } => write!(f, "Table {} created", table_name),
            ResultSet::Insert { table_name, count: 1 } => {
                write!(f, "Inserted 1 row into {}", table_name)
            }
            ResultSet::Insert { table_name, count } => {
                write!(f, "Inserted {} rows into {}", count, table_name)
            }
            ResultSet::Scan(records) => write!(f, "Selected {} rows", records.len()),
            ResultSet::Update { count } => write!(f, "Updated {} rows", count),
            ResultSet::Delete { count } => write!(f, "Deleted {} rows", count),
        }
    }
}
