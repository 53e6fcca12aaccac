//! Error types for memocore

use std::fmt;

/// Result type alias for memocore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction and lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested capacity is below the configured minimum
    InvalidCapacity {
        /// Capacity that was asked for
        requested: usize,
        /// Smallest capacity accepted
        minimum: usize,
    },

    /// Requested capacity is above the supported maximum
    CapacityTooLarge {
        /// Capacity that was asked for
        requested: usize,
        /// Largest capacity accepted
        maximum: usize,
    },

    /// Eviction policy name is not one of the implemented policies
    UnsupportedPolicy(String),

    /// Key is not resident (never inserted, removed, or evicted)
    KeyNotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity { requested, minimum } => {
                write!(f, "Invalid capacity: {} (minimum is {})", requested, minimum)
            }
            Error::CapacityTooLarge { requested, maximum } => {
                write!(f, "Capacity too large: {} (maximum is {})", requested, maximum)
            }
            Error::UnsupportedPolicy(name) => write!(f, "Unsupported eviction policy: {}", name),
            Error::KeyNotFound(key) => write!(f, "Key not found: {}", key),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Whether this error is an ordinary cache miss rather than a misuse
    pub fn is_miss(&self) -> bool {
        matches!(self, Error::KeyNotFound(_))
    }
}
