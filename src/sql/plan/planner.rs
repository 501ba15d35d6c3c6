use crate::sql::{
    parser::ast::{Projection, Select},
    plan::{Node, Plan},
};

/// Query planner - converts a SELECT into a fixed pipeline of plan nodes:
/// filter, group/aggregate, sort, offset, limit, projection
pub struct Planner;

impl Planner {
    pub fn new() -> Self {
        Self {}
    }

    /// Builds an execution plan from a SELECT statement
    pub fn build(&mut self, select: Select) -> Plan {
        Plan(self.build_select(select))
    }

    fn build_select(&self, select: Select) -> Node {
        let Select {
            table_name: _,
            projection,
            aggregates,
            where_clause,
            group_by,
            order_by,
            limit,
            offset,
        } = select;

        let mut node = Node::Scan {
            filter: where_clause,
        };

        // With aggregates in the select list the output is exactly the group
        // column plus one column per aggregate; bare columns are dropped.
        let aggregated = !aggregates.is_empty();
        if group_by.is_some() || aggregated {
            node = Node::Aggregate {
                source: Box::new(node),
                group_by,
                aggregates,
            };
        }

        if let Some((column, direction)) = order_by {
            node = Node::Order {
                source: Box::new(node),
                column,
                direction,
            };
        }

        // OFFSET - must be processed before LIMIT when both are present
        if let Some(offset) = offset {
            node = Node::Offset {
                source: Box::new(node),
                offset,
            };
        }

        if let Some(limit) = limit {
            node = Node::Limit {
                source: Box::new(node),
                limit,
            };
        }

        match projection {
            Projection::Columns(columns) if !aggregated => Node::Projection {
                source: Box::new(node),
                columns,
            },
            _ => node,
        }
    }
}
