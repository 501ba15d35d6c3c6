use std::collections::BTreeMap;

use crate::{
    error::{Error, Result},
    sql::{
        executor::{Records, filter},
        parser::ast::{Predicate, Select},
        plan::Plan,
        schema::Table,
        types::Value,
    },
};

/// Owner of every table, keyed by exact (case-sensitive) table name
#[derive(Debug, Default)]
pub struct DataStore {
    tables: BTreeMap<String, Table>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table; the name must not be taken
    pub fn create_table(&mut self, name: String, columns: Vec<String>) -> Result<()> {
        if self.tables.contains_key(&name) {
            return Err(Error::Schema(format!("Table '{}' already exists", name)));
        }
        let table = Table::new(name.clone(), columns)?;
        tracing::debug!(table = %name, columns = ?table.columns, "create table");
        self.tables.insert(name, table);
        Ok(())
    }

    /// Appends rows to a table and returns how many were inserted.
    ///
    /// With a column list, unsupplied columns are Null; without one, values are
    /// positional and trailing columns are Null. Every row is built before any
    /// is appended, so a bad row leaves the table untouched.
    pub fn insert(
        &mut self,
        table_name: &str,
        columns: Option<Vec<String>>,
        values: Vec<Vec<Value>>,
    ) -> Result<usize> {
        let table = self.must_get_table_mut(table_name)?;
        if let Some(columns) = &columns {
            table.check_columns(columns)?;
        }

        let mut rows = Vec::with_capacity(values.len());
        for row in values {
            rows.push(match &columns {
                Some(columns) => table.make_row(columns, row)?,
                None => table.pad_row(row)?,
            });
        }

        let count = rows.len();
        tracing::debug!(table = %table_name, count, "insert rows");
        table.rows.extend(rows);
        Ok(count)
    }

    /// Runs the SELECT pipeline: filter, group/aggregate, sort, offset, limit,
    /// projection
    pub fn select(&self, query: Select) -> Result<Records> {
        let table = self.must_get_table(&query.table_name)?;
        Plan::build(query).execute(table)
    }

    /// Assigns new values to every row matching the predicate and returns the
    /// number of rows updated
    pub fn update(
        &mut self,
        table_name: &str,
        assignments: BTreeMap<String, Value>,
        where_clause: Option<&Predicate>,
    ) -> Result<usize> {
        let table = self.must_get_table_mut(table_name)?;
        table.check_columns(assignments.keys())?;

        let assignments = assignments
            .into_iter()
            .filter_map(|(col, value)| table.get_col_index(&col).map(|pos| (pos, value)))
            .collect::<Vec<_>>();

        let selected = filter::evaluate(table, where_clause)?;
        let mut count = 0;
        for (row, _) in table.rows.iter_mut().zip(selected).filter(|(_, keep)| *keep) {
            for (pos, value) in &assignments {
                row[*pos] = value.clone();
            }
            count += 1;
        }
        tracing::debug!(table = %table_name, count, "update rows");
        Ok(count)
    }

    /// Removes every row matching the predicate and returns how many went
    pub fn delete(&mut self, table_name: &str, where_clause: Option<&Predicate>) -> Result<usize> {
        let table = self.must_get_table_mut(table_name)?;
        let selected = filter::evaluate(table, where_clause)?;

        let before = table.rows.len();
        let mut selected = selected.into_iter();
        table.rows.retain(|_| !selected.next().unwrap_or(false));
        let count = before - table.rows.len();
        tracing::debug!(table = %table_name, count, "delete rows");
        Ok(count)
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    /// Returns table info, returns error if table doesn't exist
    pub fn must_get_table(&self, table_name: &str) -> Result<&Table> {
        self.tables
            .get(table_name)
            .ok_or_else(|| Error::Schema(format!("Table '{}' not found", table_name)))
    }

    fn must_get_table_mut(&mut self, table_name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(table_name)
            .ok_or_else(|| Error::Schema(format!("Table '{}' not found", table_name)))
    }
}
