//! Error types for configuration loading

use thiserror::Error;

/// Errors raised while loading a non-empty configuration payload
///
/// An empty payload is never an error; it yields an empty config.
#[derive(Debug, Error)]
pub enum ConfigParseError {
    /// Payload is not valid JSON
    #[error("Configuration payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Payload is valid JSON but not an object
    #[error("Configuration payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// An entry holds an array or object instead of a scalar
    #[error("Configuration key '{key}' holds a nested {found}, expected a flat value")]
    NestedValue { key: String, found: &'static str },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigParseError::NestedValue {
            key: "filter_download_isrc".to_string(),
            found: "array",
        };
        assert!(err.to_string().contains("filter_download_isrc"));
        assert!(err.to_string().contains("array"));

        let err = ConfigParseError::NotAnObject { found: "string" };
        assert!(err.to_string().contains("string"));
    }
}
