//! Statement processing entry point
//!
//! `QueryProcessor` takes one raw command string and always answers with a
//! `QueryResult`; nothing raised while parsing or executing escapes to the
//! caller.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use serde::Serialize;

use crate::{
    error::{Error, Result},
    sql::{
        engine::DataStore,
        executor::{Records, ResultSet},
        parser::{Parser, ast::Statement, split_statements},
    },
};

/// Outcome of one statement.
///
/// Serializes as `{"data": [...]}`, `{"message": "..."}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryResult {
    /// Records returned by a SELECT
    Data(Records),
    /// Confirmation for CREATE TABLE, INSERT, UPDATE and DELETE
    Message(String),
    /// Any failure, carrying the error message
    Error(String),
}

impl QueryResult {
    pub fn is_error(&self) -> bool {
        matches!(self, QueryResult::Error(_))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<Result<ResultSet>> for QueryResult {
    fn from(result: Result<ResultSet>) -> Self {
        match result {
            Ok(ResultSet::Scan(records)) => QueryResult::Data(records),
            Ok(result) => QueryResult::Message(result.to_string()),
            Err(err) => QueryResult::Error(err.to_string()),
        }
    }
}

/// Leading keywords that select a statement grammar
const COMMANDS: [&str; 5] = ["CREATE", "INSERT", "SELECT", "UPDATE", "DELETE"];

/// Parses statements and runs them against an owned `DataStore`
#[derive(Debug, Default)]
pub struct QueryProcessor {
    store: DataStore,
}

impl QueryProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only listing of table names
    pub fn table_names(&self) -> Vec<String> {
        self.store.table_names()
    }

    /// Processes one statement, converting any failure into an error result
    pub fn process(&mut self, sql: &str) -> QueryResult {
        let result = self.execute(sql);
        if let Err(err) = &result {
            tracing::warn!(statement = sql, error = %err, "statement failed");
        }
        result.into()
    }

    /// Parses and executes one statement
    pub fn execute(&mut self, sql: &str) -> Result<ResultSet> {
        let sql = sql.trim().trim_end_matches(';').trim_end();
        let command = match sql.split_whitespace().next() {
            Some(word) => word.to_uppercase(),
            None => return Err(Error::Parse("Empty query".into())),
        };
        if !COMMANDS.contains(&command.as_str()) {
            return Err(Error::Parse(format!("Unsupported command: {}", command)));
        }
        tracing::debug!(statement = sql, "process");

        Ok(match Parser::new(sql).parse()? {
            Statement::CreateTable { name, columns } => {
                self.store.create_table(name.clone(), columns)?;
                ResultSet::CreateTable { table_name: name }
            }
            Statement::Insert {
                table_name,
                columns,
                values,
            } => {
                let count = self.store.insert(&table_name, columns, values)?;
                ResultSet::Insert { table_name, count }
            }
            Statement::Select(select) => ResultSet::Scan(self.store.select(select)?),
            Statement::Update {
                table_name,
                columns,
                where_clause,
            } => ResultSet::Update {
                count: self.store.update(&table_name, columns, where_clause.as_ref())?,
            },
            Statement::Delete {
                table_name,
                where_clause,
            } => ResultSet::Delete {
                count: self.store.delete(&table_name, where_clause.as_ref())?,
            },
        })
    }

    /// Runs every statement of a `;`-separated script in order.
    ///
    /// A failing statement does not stop the script; its error is part of the
    /// returned results.
    pub fn run_script(&mut self, script: &str) -> Vec<QueryResult> {
        split_statements(script)
            .into_iter()
            .map(|stmt| self.process(stmt))
            .collect()
    }

    /// Reads a script file and runs it
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<QueryResult>> {
        let script = std::fs::read_to_string(path)?;
        Ok(self.run_script(&script))
    }
}

/// A cloneable handle that serializes statements from several threads through
/// one lock around the processor
#[derive(Debug, Clone, Default)]
pub struct SharedProcessor {
    inner: Arc<Mutex<QueryProcessor>>,
}

impl SharedProcessor {
    pub fn new(processor: QueryProcessor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(processor)),
        }
    }

    pub fn process(&self, sql: &str) -> QueryResult {
        match self.inner.lock() {
            Ok(mut processor) => processor.process(sql),
            Err(err) => QueryResult::Error(Error::from(err).to_string()),
        }
    }

    pub fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.inner.lock()?.table_names())
    }
}
