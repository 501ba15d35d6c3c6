use std::collections::{HashMap, hash_map::Entry};

use crate::{
    error::{Error, Result},
    sql::{
        parser::ast::{AggregateCall, AggregateFunc},
        types::{Row, Value},
    },
};

use super::{Executor, Records};

/// Aggregate executor - buckets rows by the GROUP BY column and computes
/// aggregate functions (COUNT, SUM, MIN, MAX, AVG) per bucket
pub struct Aggregate<'a> {
    source: Box<dyn Executor<'a> + 'a>,
    group_by: Option<String>,
    aggregates: Vec<AggregateCall>,
}

impl<'a> Aggregate<'a> {
    pub fn new(
        source: Box<dyn Executor<'a> + 'a>,
        group_by: Option<String>,
        aggregates: Vec<AggregateCall>,
    ) -> Box<Self> {
        Box::new(Self { source, group_by, aggregates })
    }
}

impl<'a> Executor<'a> for Aggregate<'a> {
    fn execute(self: Box<Self>) -> Result<Records> {
        let source = self.source.execute()?;

        let group_index = match &self.group_by {
            Some(col) => Some(source.column_index(col).ok_or_else(|| {
                Error::Schema(format!("Invalid column '{}' in GROUP BY clause", col))
            })?),
            None => None,
        };

        // Resolve every aggregate target before touching any row
        let mut calculators = Vec::with_capacity(self.aggregates.len());
        for agg in &self.aggregates {
            let pos = source.column_index(&agg.column).ok_or_else(|| {
                Error::Schema(format!(
                    "Invalid column '{}' in {}({})",
                    agg.column, agg.func, agg.column
                ))
            })?;
            calculators.push((pos, <dyn Calculator>::build(agg.func)));
        }

        // Buckets keep the order in which their key was first seen. Without
        // GROUP BY there is a single bucket, even for an empty input.
        let mut groups: Vec<(Value, Vec<&Row>)> = Vec::new();
        match group_index {
            Some(index) => {
                let mut positions: HashMap<GroupKey, usize> = HashMap::new();
                for row in &source.rows {
                    let key = &row[index];
                    match positions.entry(GroupKey::from(key)) {
                        Entry::Occupied(e) => groups[*e.get()].1.push(row),
                        Entry::Vacant(e) => {
                            e.insert(groups.len());
                            groups.push((key.clone(), vec![row]));
                        }
                    }
                }
            }
            None => groups.push((Value::Null, source.rows.iter().collect())),
        }

        let mut columns = Vec::new();
        columns.extend(self.group_by.clone());
        columns.extend(self.aggregates.iter().map(|a| a.alias.clone()));

        let mut rows = Vec::with_capacity(groups.len());
        for (key, bucket) in groups {
            let mut row = Vec::with_capacity(columns.len());
            if group_index.is_some() {
                row.push(key);
            }
            for ((pos, calculator), agg) in calculators.iter().zip(&self.aggregates) {
                let values = bucket
                    .iter()
                    .map(|r| &r[*pos])
                    .filter(|v| !v.is_null())
                    .collect::<Vec<_>>();
                row.push(calculator.calc(&agg.column, &values)?);
            }
            rows.push(row);
        }

        tracing::debug!(groups = rows.len(), "aggregated rows");
        Ok(Records { columns, rows })
    }
}

/// Hashable form of a group value.
///
/// Integral floats fold into `Int` so that `1` and `1.0` share a bucket, the
/// same way `=` treats them.
#[derive(PartialEq, Eq, Hash)]
enum GroupKey {
    Null,
    Int(i64),
    Float(u64),
    Text(String),
}

impl From<&Value> for GroupKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => GroupKey::Null,
            Value::Integer(i) => GroupKey::Int(*i),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < 2f64.powi(63) => {
                GroupKey::Int(*f as i64)
            }
            Value::Float(f) => GroupKey::Float(f.to_bits()),
            Value::Text(s) => GroupKey::Text(s.clone()),
        }
    }
}

/// Trait for aggregate function calculations.
///
/// `values` holds the non-null cells of the target column in one bucket.
pub trait Calculator {
    fn calc(&self, col_name: &str, values: &[&Value]) -> Result<Value>;
}

impl dyn Calculator {
    /// Runtime dispatch to the calculator for a function
    pub fn build(func: AggregateFunc) -> Box<dyn Calculator> {
        match func {
            AggregateFunc::Count => Count::new(),
            AggregateFunc::Sum => Sum::new(),
            AggregateFunc::Min => Min::new(),
            AggregateFunc::Max => Max::new(),
            AggregateFunc::Avg => Avg::new(),
        }
    }
}

/// COUNT - counts non-null values in a column
pub struct Count;

impl Count {
    fn new() -> Box<Self> {
        Box::new(Self {})
    }
}

impl Calculator for Count {
    fn calc(&self, _col_name: &str, values: &[&Value]) -> Result<Value> {
        Ok(Value::Integer(values.len() as i64))
    }
}

/// MIN - finds minimum value in a column
pub struct Min;

impl Min {
    fn new() -> Box<Self> {
        Box::new(Self {})
    }
}

impl Calculator for Min {
    fn calc(&self, _col_name: &str, values: &[&Value]) -> Result<Value> {
        let mut min_val = Value::Null;
        for &v in values {
            if min_val.is_null() || v.compare(&min_val)?.is_lt() {
                min_val = v.clone();
            }
        }
        Ok(min_val)
    }
}

/// MAX - finds maximum value in a column
pub struct Max;

impl Max {
    fn new() -> Box<Self> {
        Box::new(Self {})
    }
}

impl Calculator for Max {
    fn calc(&self, _col_name: &str, values: &[&Value]) -> Result<Value> {
        let mut max_val = Value::Null;
        for &v in values {
            if max_val.is_null() || v.compare(&max_val)?.is_gt() {
                max_val = v.clone();
            }
        }
        Ok(max_val)
    }
}

/// SUM - calculates the sum of values in a column.
///
/// Integers stay integers until a float shows up; an empty input sums to 0.
pub struct Sum;

impl Sum {
    fn new() -> Box<Self> {
        Box::new(Self {})
    }
}

impl Calculator for Sum {
    fn calc(&self, col_name: &str, values: &[&Value]) -> Result<Value> {
        let mut sum = Value::Integer(0);
        for &v in values {
            sum = match (sum, v) {
                (Value::Integer(s), Value::Integer(i)) => match s.checked_add(*i) {
                    Some(s) => Value::Integer(s),
                    None => Value::Float(s as f64 + *i as f64),
                },
                (Value::Integer(s), Value::Float(f)) => Value::Float(s as f64 + f),
                (Value::Float(s), Value::Integer(i)) => Value::Float(s + *i as f64),
                (Value::Float(s), Value::Float(f)) => Value::Float(s + f),
                _ => {
                    return Err(Error::Evaluation(format!(
                        "Cannot calculate SUM over non-numeric column {}",
                        col_name
                    )))
                }
            };
        }
        Ok(sum)
    }
}

/// AVG - calculates average of values in a column, Null for no values
pub struct Avg;

impl Avg {
    fn new() -> Box<Self> {
        Box::new(Self {})
    }
}

impl Calculator for Avg {
    fn calc(&self, col_name: &str, values: &[&Value]) -> Result<Value> {
        if values.is_empty() {
            return Ok(Value::Null);
        }
        // AVG = SUM / COUNT
        Ok(match Sum::new().calc(col_name, values)? {
            Value::Integer(s) => Value::Float(s as f64 / values.len() as f64),
            Value::Float(s) => Value::Float(s / values.len() as f64),
            _ => Value::Null,
        })
    }
}
