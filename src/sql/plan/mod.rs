use crate::{
    error::Result,
    sql::{
        executor::{Executor, Records},
        parser::ast::{self, AggregateCall, OrderDirection, Predicate},
        schema::Table,
    },
};

mod planner;

pub use planner::Planner;

/// Execution plan node for a SELECT pipeline
#[derive(Debug, PartialEq)]
pub enum Node {
    /// Reads the table, keeping rows that satisfy the filter
    Scan { filter: Option<Predicate> },
    /// Groups rows and computes aggregates per group
    Aggregate {
        source: Box<Node>,
        group_by: Option<String>,
        aggregates: Vec<AggregateCall>,
    },
    Order {
        source: Box<Node>,
        column: String,
        direction: OrderDirection,
    },
    Offset {
        source: Box<Node>,
        offset: usize,
    },
    Limit {
        source: Box<Node>,
        limit: usize,
    },
    Projection {
        source: Box<Node>,
        columns: Vec<String>,
    },
}

/// A SELECT execution plan (root node)
#[derive(Debug, PartialEq)]
pub struct Plan(pub Node);

impl Plan {
    /// Builds a plan for a SELECT statement
    pub fn build(select: ast::Select) -> Self {
        Planner::new().build(select)
    }

    /// Runs the plan against the table it was built for
    pub fn execute(self, table: &Table) -> Result<Records> {
        <dyn Executor<'_>>::build(self.0, table).execute()
    }
}
