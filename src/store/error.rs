//! Persistence-specific error types.

/// Errors that can occur while reading or writing task data.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying storage medium failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Task data could not be serialized or parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Import data parsed but the top level is not an array
    #[error("top-level JSON value is not an array")]
    NotAnArray,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let error = StoreError::NotAnArray;
        assert!(error.to_string().contains("not an array"));

        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: StoreError = io_error.into();
        assert!(error.to_string().contains("I/O error"));

        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: StoreError = json_error.into();
        assert!(error.to_string().contains("JSON error"));
    }
}
