//! Error types for fast-dmp.
//!
//! Only precondition violations are errors. "No split" and "not found" are
//! ordinary outcomes and are returned as values.

use thiserror::Error;

/// Errors that can occur during bisection or matching.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DmpError {
    /// Pattern does not fit into the configured bit-vector width
    #[error("pattern of {len} units exceeds the {max_bits}-bit match width")]
    PatternTooLarge {
        /// Length of the rejected pattern
        len: usize,
        /// Configured width of the match bit-vectors
        max_bits: usize,
    },

    /// Bitap was called with an empty pattern
    #[error("pattern must not be empty")]
    EmptyPattern,

    /// Configuration values are out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for fast-dmp operations.
pub type DmpResult<T> = Result<T, DmpError>;

impl DmpError {
    /// Create a configuration error with a message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Check whether this is a `PatternTooLarge` error.
    pub fn is_pattern_too_large(&self) -> bool {
        matches!(self, Self::PatternTooLarge { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DmpError::PatternTooLarge { len: 40, max_bits: 32 };
        assert_eq!(err.to_string(), "pattern of 40 units exceeds the 32-bit match width");

        let err = DmpError::invalid_config("max_bits must be in 1..=64");
        assert_eq!(err.to_string(), "invalid configuration: max_bits must be in 1..=64");

        assert_eq!(DmpError::EmptyPattern.to_string(), "pattern must not be empty");
    }

    #[test]
    fn test_is_pattern_too_large() {
        assert!(DmpError::PatternTooLarge { len: 2, max_bits: 1 }.is_pattern_too_large());
        assert!(!DmpError::EmptyPattern.is_pattern_too_large());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DmpError>();
    }
}
