//! Error types
//!
//! Gameplay failures (collisions) are state transitions, not errors. The only
//! error paths are invalid configuration and the file-backed score store.

use std::fmt;

/// Rejected configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A duration, period or size that must be strictly positive
    NonPositive { field: &'static str, value: f32 },
    /// A height or offset that must not be negative
    Negative { field: &'static str, value: f32 },
    /// Malformed JSON
    Parse(String),
    /// Config file could not be read
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be greater than zero (got {value})")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            ConfigError::Parse(msg) => write!(f, "invalid config: {msg}"),
            ConfigError::Io(msg) => write!(f, "could not read config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Failure of the file-backed settings store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Io(String),
    Parse(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "settings store I/O error: {msg}"),
            StoreError::Parse(msg) => write!(f, "settings store is corrupt: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err.to_string())
    }
}

/// Reject values that are not strictly positive (NaN included)
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Reject negative values (NaN included)
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_check() {
        assert!(ensure_positive("period", 3.0).is_ok());
        assert_eq!(
            ensure_positive("period", 0.0),
            Err(ConfigError::NonPositive {
                field: "period",
                value: 0.0
            })
        );
        assert!(ensure_positive("period", f32::NAN).is_err());
    }

    #[test]
    fn test_display_names_field() {
        let err = ConfigError::Negative {
            field: "ground.height",
            value: -1.0,
        };
        assert!(err.to_string().contains("ground.height"));
    }
}
