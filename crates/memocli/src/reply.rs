//! Command replies and their text rendering

use std::fmt;

/// Reply to a single command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Command succeeded with nothing to return
    Ok,
    /// Key is not resident
    Nil,
    /// Integer result
    Integer(i64),
    /// A cached value: "value"
    Bulk(String),
    /// Ordered key list
    List(Vec<String>),
    /// Free-form text, printed as is
    Text(String),
    /// Error: (error) message
    Error(String),
}

impl Reply {
    /// Whether this reply reports a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Nil => write!(f, "(nil)"),
            Reply::Integer(i) => write!(f, "(integer) {}", i),
            Reply::Bulk(value) => write!(f, "\"{}\"", value),
            Reply::List(items) if items.is_empty() => write!(f, "(empty list)"),
            Reply::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) \"{}\"", i + 1, item)?;
                }
                Ok(())
            }
            Reply::Text(text) => write!(f, "{}", text),
            Reply::Error(e) => write!(f, "(error) {}", e),
        }
    }
}
