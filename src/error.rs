use std::{fmt::Display, sync::PoisonError};

/// Custom Result type for memquery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for memquery
///
/// The `Display` text of every variant is the bare message, since it is what
/// the caller receives in an error result.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Statement does not match its grammar
    Parse(String),
    /// Unknown or duplicate table, invalid column, arity mismatch
    Schema(String),
    /// Failure while evaluating a predicate or aggregate against data
    Evaluation(String),
    /// Internal error (I/O, lock poisoning, serialization)
    Internal(String),
}

impl Error {
    /// Returns the message carried by the error
    pub fn message(&self) -> &str {
        match self {
            Error::Parse(msg)
            | Error::Schema(msg)
            | Error::Evaluation(msg)
            | Error::Internal(msg) => msg,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(value: regex::Error) -> Self {
        Error::Evaluation(format!("Invalid LIKE pattern: {}", value))
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Internal(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Internal(value.to_string())
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(value: PoisonError<T>) -> Self {
        Error::Internal(value.to_string())
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display_is_bare_message() {
        let err = Error::Schema("Table 't' not found".to_string());
        assert_eq!(err.to_string(), "Table 't' not found");
    }

    #[test]
    fn test_from_io() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err, Error::Internal("missing".to_string()));
    }

    #[test]
    fn test_from_regex() {
        let err: Error = regex::Regex::new("(").unwrap_err().into();
        assert!(err.message().starts_with("Invalid LIKE pattern"));
    }
}
