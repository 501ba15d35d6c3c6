//! SQL-like statement processing
//!
//! This module provides:
//! - `parser`: lexer and parser producing a statement AST
//! - `types`: runtime values and their comparison rules
//! - `schema`: in-memory table definition and rows
//! - `plan`: SELECT pipeline planning
//! - `executor`: pipeline stages, predicate filter and aggregates
//! - `engine`: the `DataStore` owning all tables
//! - `processor`: the string-in, result-out entry point

pub mod parser;
pub mod types;
pub mod schema;
pub mod plan;
pub mod executor;
pub mod engine;
pub mod processor;
