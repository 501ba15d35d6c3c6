use std::collections::HashMap;

use crate::{error::{Error, Result}, sql::types::{Row, Value}};

/// An in-memory table: a fixed schema plus its rows in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    /// Lowercase, unique column names
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table, lowercasing the column names
    pub fn new(name: String, columns: Vec<String>) -> Result<Self> {
        let table = Self {
            name,
            columns: columns.into_iter().map(|c| c.to_lowercase()).collect(),
            rows: Vec::new(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Validates table schema
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::Schema(format!("Table '{}' has no columns", self.name)));
        }
        for (i, col) in self.columns.iter().enumerate() {
            if self.columns[..i].contains(col) {
                return Err(Error::Schema(format!(
                    "Duplicate column '{}' in table '{}'",
                    col, self.name
                )));
            }
        }
        Ok(())
    }

    /// Returns the column index for a given column name
    pub fn get_col_index(&self, col_name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == col_name)
    }

    /// Like `get_col_index`, but fails with the name of the clause that
    /// referenced the column
    pub fn must_get_col_index(&self, col_name: &str, clause: &str) -> Result<usize> {
        self.get_col_index(col_name).ok_or_else(|| {
            Error::Schema(format!("Invalid column '{}' in {} clause", col_name, clause))
        })
    }

    /// Fails listing every name that is not part of the schema
    pub fn check_columns<'a>(&self, names: impl IntoIterator<Item = &'a String>) -> Result<()> {
        let invalid = names
            .into_iter()
            .filter(|c| self.get_col_index(c).is_none())
            .map(|c| c.as_str())
            .collect::<Vec<_>>();
        if !invalid.is_empty() {
            return Err(Error::Schema(format!("Invalid columns: {}", invalid.join(", "))));
        }
        Ok(())
    }

    /// Builds a full row from the values given for a subset of columns.
    ///
    /// insert into tbl (c, a) values (2, 1);
    ///    a       b      c
    ///    1     NULL     2
    pub fn make_row(&self, columns: &[String], values: Vec<Value>) -> Result<Row> {
        if columns.len() != values.len() {
            return Err(Error::Schema("Column/value count mismatch".into()));
        }
        let mut inputs = columns.iter().zip(values).collect::<HashMap<_, _>>();
        Ok(self
            .columns
            .iter()
            .map(|col| inputs.remove(col).unwrap_or(Value::Null))
            .collect())
    }

    /// Fills the trailing columns of a positional row with Null.
    ///
    /// insert into tbl values (1, 2);
    ///    a     b      c
    ///    1     2    NULL
    pub fn pad_row(&self, mut values: Vec<Value>) -> Result<Row> {
        if values.len() > self.columns.len() {
            return Err(Error::Schema("Column/value count mismatch".into()));
        }
        values.resize(self.columns.len(), Value::Null);
        Ok(values)
    }
}
