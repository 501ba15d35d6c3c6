use std::cmp::Ordering;

use regex::Regex;

use crate::{
    error::Result,
    sql::{
        parser::ast::{Operator, Predicate},
        schema::Table,
        types::{Row, Value},
    },
};

/// A WHERE predicate bound to a table: the column is resolved to a position
/// and a LIKE pattern is compiled once for the whole scan
pub struct Filter {
    index: usize,
    op: Operator,
    value: Value,
    pattern: Option<Regex>,
}

impl Filter {
    pub fn new(table: &Table, predicate: &Predicate) -> Result<Self> {
        let index = table.must_get_col_index(&predicate.column, "WHERE")?;
        let pattern = match (&predicate.op, &predicate.value) {
            (Operator::Like, value) => Some(like_regex(&value.to_string())?),
            _ => None,
        };
        Ok(Self {
            index,
            op: predicate.op,
            value: predicate.value.clone(),
            pattern,
        })
    }

    /// Evaluates the predicate against one row
    pub fn matches(&self, row: &Row) -> Result<bool> {
        let cell = &row[self.index];
        Ok(match self.op {
            Operator::Equal => cell.equals(&self.value),
            Operator::NotEqual => !cell.equals(&self.value),
            Operator::GreaterThan => cell.compare(&self.value)? == Ordering::Greater,
            Operator::GreaterThanOrEqual => cell.compare(&self.value)? != Ordering::Less,
            Operator::LessThan => cell.compare(&self.value)? == Ordering::Less,
            Operator::LessThanOrEqual => cell.compare(&self.value)? != Ordering::Greater,
            Operator::Like => match (&self.pattern, cell) {
                (_, Value::Null) => false,
                (Some(re), cell) => re.is_match(&cell.to_string()),
                (None, _) => false,
            },
        })
    }
}

/// Translates a LIKE pattern into a regular expression.
///
/// Only `%` is a wildcard (`.*`); the rest of the pattern is regex syntax.
/// The expression is anchored at the start but not at the end, so `'ab'`
/// matches every value beginning with `ab`.
fn like_regex(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("^(?:{})", pattern.replace('%', ".*")))?)
}

/// Evaluates an optional predicate over every row of the table.
///
/// Returns one flag per row; no predicate selects everything. Evaluation
/// finishes for all rows before the caller acts on the result, so a failing
/// row aborts the statement without side effects.
pub fn evaluate(table: &Table, predicate: Option<&Predicate>) -> Result<Vec<bool>> {
    match predicate {
        None => Ok(vec![true; table.rows.len()]),
        Some(predicate) => {
            let filter = Filter::new(table, predicate)?;
            table.rows.iter().map(|row| filter.matches(row)).collect()
        }
    }
}
