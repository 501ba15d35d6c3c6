//! memquery - ad hoc SQL-like querying over in-memory tables
//!
//! This crate provides:
//! - Statement parsing (lexer, recursive-descent parser, AST)
//! - A SELECT pipeline: filter, group/aggregate, sort, paginate, project
//! - Mutations (INSERT, UPDATE, DELETE) that either fully apply or fail
//! - `QueryProcessor`, which turns any statement into a `QueryResult`

pub mod error;
pub mod sql;

pub use sql::processor::{QueryProcessor, QueryResult, SharedProcessor};
