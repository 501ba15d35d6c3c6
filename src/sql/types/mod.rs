use std::{cmp::Ordering, fmt::Display};

use serde::Serialize;

use crate::error::{Error, Result};

/// Runtime data types a non-null value can carry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataType {
    Integer,
    Float,
    Text,
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DataType::Integer => "INTEGER",
            DataType::Float => "FLOAT",
            DataType::Text => "TEXT",
        })
    }
}

/// Runtime value stored in a table cell
///
/// Serializes untagged, so JSON output reads `null`, `1`, `1.5` or `"abc"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Characters stripped from both ends of textual literals
fn trim_quotes(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\'' || c == '"')
}

impl Value {
    /// Parses raw statement text into a value.
    ///
    /// `null` (any case) is Null, then an integer parse is tried, then a float
    /// parse, and anything else becomes text with surrounding quotes and
    /// whitespace trimmed.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("null") {
            return Self::Null;
        }
        Self::numeric(raw).unwrap_or_else(|| Self::Text(trim_quotes(raw).to_string()))
    }

    /// Coerces a WHERE literal: quotes are stripped first, then integer, float,
    /// and finally text.
    pub fn coerce(raw: &str) -> Self {
        let raw = trim_quotes(raw);
        Self::numeric(raw).unwrap_or_else(|| Self::Text(raw.to_string()))
    }

    fn numeric(raw: &str) -> Option<Self> {
        if let Ok(i) = raw.parse::<i64>() {
            return Some(Self::Integer(i));
        }
        raw.parse::<f64>().ok().map(Self::Float)
    }

    /// Returns the data type of the value, or None if it's Null
    pub fn datatype(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Integer(_) => Some(DataType::Integer),
            Self::Float(_) => Some(DataType::Float),
            Self::Text(_) => Some(DataType::Text),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Equality as seen by `=` and `!=` predicates.
    ///
    /// Integers and floats compare numerically, values of unrelated types are
    /// never equal, and Null equals only Null.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Float(b)) => (*a as f64) == *b,
            (Value::Float(a), Value::Integer(b)) => *a == (*b as f64),
            (a, b) => a == b,
        }
    }

    /// Strict ordering used by `<`, `>`, `<=` and `>=` predicates.
    ///
    /// Fails when either side is Null or the types cannot be ordered.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        if !self.is_null() && !other.is_null() {
            if let Some(ordering) = self.partial_cmp(other) {
                return Ok(ordering);
            }
        }
        Err(Error::Evaluation(format!(
            "Cannot compare {} with {}",
            self.type_name(),
            other.type_name()
        )))
    }

    /// True for integers and floats
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Total order used for sorting: Null, then numbers, then text.
    ///
    /// Numbers compare by exact value across integer and float, with NaN
    /// placed the way `f64::total_cmp` places it.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Integer(a), Value::Float(b)) => int_float_cmp(*a, *b),
            (Value::Float(a), Value::Integer(b)) => int_float_cmp(*b, *a).reverse(),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Text(_), _) => Ordering::Greater,
            (_, Value::Text(_)) => Ordering::Less,
        }
    }

    fn type_name(&self) -> String {
        self.datatype().map_or("NULL".to_string(), |dt| dt.to_string())
    }
}

/// Rounding to f64 is monotonic, so only a tie needs the exact check; a tie
/// means `f` is integral and fits an i128.
fn int_float_cmp(i: i64, f: f64) -> Ordering {
    match (i as f64).total_cmp(&f) {
        Ordering::Equal => (i as i128).cmp(&(f as i128)),
        ordering => ordering,
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            // Debug keeps the fractional part, e.g. 2.0 rather than 2
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Implements partial ordering for Value comparison (used by ORDER BY, MIN, MAX)
///
/// Null sorts before everything else; text never orders against numbers.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),
            (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
            (_, _) => None,
        }
    }
}

/// A row holds one value per table column, in column order
pub type Row = Vec<Value>;

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::Value;
    use crate::error::Result;

    #[test]
    fn test_parse() {
        assert_eq!(Value::parse("NULL"), Value::Null);
        assert_eq!(Value::parse(" 42 "), Value::Integer(42));
        assert_eq!(Value::parse("-7"), Value::Integer(-7));
        assert_eq!(Value::parse("2.5"), Value::Float(2.5));
        assert_eq!(Value::parse("'hello'"), Value::Text("hello".to_string()));
        assert_eq!(Value::parse("\"x y\""), Value::Text("x y".to_string()));
        // quoted numbers stay text when parsed as raw input
        assert_eq!(Value::parse("'5'"), Value::Text("5".to_string()));
    }

    #[test]
    fn test_coerce() {
        assert_eq!(Value::coerce("'5'"), Value::Integer(5));
        assert_eq!(Value::coerce("'1.25'"), Value::Float(1.25));
        assert_eq!(Value::coerce("'null'"), Value::Text("null".to_string()));
        assert_eq!(Value::coerce("abc"), Value::Text("abc".to_string()));
    }

    #[test]
    fn test_equals() {
        assert!(Value::Integer(1).equals(&Value::Float(1.0)));
        assert!(!Value::Integer(1).equals(&Value::Text("1".to_string())));
        assert!(Value::Null.equals(&Value::Null));
        assert!(!Value::Null.equals(&Value::Integer(0)));
    }

    #[test]
    fn test_compare() -> Result<()> {
        assert_eq!(Value::Integer(2).compare(&Value::Float(1.5))?, Ordering::Greater);
        assert_eq!(
            Value::Text("a".to_string()).compare(&Value::Text("b".to_string()))?,
            Ordering::Less
        );
        assert!(Value::Text("a".to_string()).compare(&Value::Integer(1)).is_err());
        assert!(Value::Null.compare(&Value::Integer(1)).is_err());
        Ok(())
    }

    #[test]
    fn test_sort_cmp_is_total() {
        let big = 1_i64 << 53;
        assert_eq!(Value::Integer(big + 1).sort_cmp(&Value::Float(big as f64)), Ordering::Greater);
        assert_eq!(Value::Integer(big).sort_cmp(&Value::Float(big as f64)), Ordering::Equal);
        assert_eq!(Value::Float(f64::NAN).sort_cmp(&Value::Integer(i64::MAX)), Ordering::Greater);
        assert_eq!(Value::Null.sort_cmp(&Value::Float(f64::NEG_INFINITY)), Ordering::Less);
        assert_eq!(Value::Text("".into()).sort_cmp(&Value::Integer(0)), Ordering::Greater);

        let mut values = vec![
            Value::Float(2.5),
            Value::Integer(-1),
            Value::Null,
            Value::Float(f64::NAN),
            Value::Integer(2),
        ];
        values.sort_by(|a, b| a.sort_cmp(b));
        assert_eq!(values[..3], [Value::Null, Value::Integer(-1), Value::Integer(2)]);
        assert_eq!(values[3], Value::Float(2.5));
    }

    #[test]
    fn test_display_and_json() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Value::Integer(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Value::Text("x".into())).unwrap(), "\"x\"");
    }
}
