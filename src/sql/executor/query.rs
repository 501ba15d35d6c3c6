use crate::{
    error::{Error, Result},
    sql::{
        executor::filter,
        parser::ast::{OrderDirection, Predicate},
        schema::Table,
        types::Value,
    },
};

use super::{Executor, Records};

/// Table scan executor, applying the WHERE predicate if there is one
pub struct Scan<'a> {
    table: &'a Table,
    filter: Option<Predicate>,
}

impl<'a> Scan<'a> {
    pub fn new(table: &'a Table, filter: Option<Predicate>) -> Box<Self> {
        Box::new(Self { table, filter })
    }
}

impl<'a> Executor<'a> for Scan<'a> {
    fn execute(self: Box<Self>) -> Result<Records> {
        let selected = filter::evaluate(self.table, self.filter.as_ref())?;
        let rows = self
            .table
            .rows
            .iter()
            .zip(selected)
            .filter_map(|(row, keep)| keep.then(|| row.clone()))
            .collect::<Vec<_>>();
        tracing::debug!(
            table = %self.table.name,
            scanned = self.table.rows.len(),
            matched = rows.len(),
            "scan"
        );
        Ok(Records {
            columns: self.table.columns.clone(),
            rows,
        })
    }
}

/// ORDER BY executor - stable sort on one column
pub struct Order<'a> {
    source: Box<dyn Executor<'a> + 'a>,
    column: String,
    direction: OrderDirection,
}

impl<'a> Order<'a> {
    pub fn new(
        source: Box<dyn Executor<'a> + 'a>,
        column: String,
        direction: OrderDirection,
    ) -> Box<Self> {
        Box::new(Self { source, column, direction })
    }
}

impl<'a> Executor<'a> for Order<'a> {
    fn execute(self: Box<Self>) -> Result<Records> {
        let Records { columns, mut rows } = self.source.execute()?;
        let pos = columns.iter().position(|c| *c == self.column).ok_or_else(|| {
            Error::Schema(format!("Invalid column '{}' in ORDER BY clause", self.column))
        })?;

        // Text never orders against numbers; reject the column before sorting
        // so the comparator below only ever sees one kind of non-null value.
        let mut first: Option<&Value> = None;
        for value in rows.iter().map(|row| &row[pos]).filter(|v| !v.is_null()) {
            match first {
                None => first = Some(value),
                Some(x) if x.is_numeric() != value.is_numeric() => {
                    return Err(Error::Evaluation(format!(
                        "Cannot order column {}: {} and {} are not comparable",
                        self.column, x, value
                    )));
                }
                Some(_) => {}
            }
        }

        // Nulls sort first
        rows.sort_by(|row1, row2| {
            let ordering = row1[pos].sort_cmp(&row2[pos]);
            match self.direction {
                OrderDirection::Asc => ordering,
                OrderDirection::Desc => ordering.reverse(),
            }
        });

        Ok(Records { columns, rows })
    }
}

/// LIMIT executor - restricts the number of rows returned
pub struct Limit<'a> {
    source: Box<dyn Executor<'a> + 'a>,
    limit: usize,
}

impl<'a> Limit<'a> {
    pub fn new(source: Box<dyn Executor<'a> + 'a>, limit: usize) -> Box<Self> {
        Box::new(Self { source, limit })
    }
}

impl<'a> Executor<'a> for Limit<'a> {
    fn execute(self: Box<Self>) -> Result<Records> {
        let Records { columns, rows } = self.source.execute()?;
        Ok(Records {
            columns,
            rows: rows.into_iter().take(self.limit).collect(),
        })
    }
}

/// OFFSET executor - skips the first N rows
pub struct Offset<'a> {
    source: Box<dyn Executor<'a> + 'a>,
    offset: usize,
}

impl<'a> Offset<'a> {
    pub fn new(source: Box<dyn Executor<'a> + 'a>, offset: usize) -> Box<Self> {
        Box::new(Self { source, offset })
    }
}

impl<'a> Executor<'a> for Offset<'a> {
    fn execute(self: Box<Self>) -> Result<Records> {
        let Records { columns, rows } = self.source.execute()?;
        Ok(Records {
            columns,
            rows: rows.into_iter().skip(self.offset).collect(),
        })
    }
}

/// Projection executor - reduces records to the requested columns.
///
/// Names missing from the source read as Null.
pub struct Projection<'a> {
    source: Box<dyn Executor<'a> + 'a>,
    columns: Vec<String>,
}

impl<'a> Projection<'a> {
    pub fn new(source: Box<dyn Executor<'a> + 'a>, columns: Vec<String>) -> Box<Self> {
        Box::new(Self { source, columns })
    }
}

impl<'a> Executor<'a> for Projection<'a> {
    fn execute(self: Box<Self>) -> Result<Records> {
        let source = self.source.execute()?;
        let positions = self
            .columns
            .iter()
            .map(|c| source.column_index(c))
            .collect::<Vec<_>>();
        let rows = source
            .rows
            .into_iter()
            .map(|row| {
                positions
                    .iter()
                    .map(|pos| pos.map_or(Value::Null, |p| row[p].clone()))
                    .collect()
            })
            .collect();
        Ok(Records {
            columns: self.columns,
            rows,
        })
    }
}
