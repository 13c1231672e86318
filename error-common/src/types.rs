use thiserror::Error;

/// Process-level errors raised while booting or running the server
#[derive(Error, Debug)]
pub enum HospitalError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Database bootstrap errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

}

/// Result type alias for hospital backend operations
pub type Result<T> = std::result::Result<T, HospitalError>;

/// Log an error together with the operation that produced it
pub fn log_error(context: &str, error: &HospitalError) {
    tracing::error!(
        context = context,
        error = %error,
        "Hospital backend error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_bootstrap_failures_name_the_category() {
        let err = HospitalError::DatabaseError("connection refused".to_string());
        assert_eq!(err.to_string(), "Database error: connection refused");
        log_error("startup", &err);
    }

    #[test]
    fn display_includes_category() {
        let err = HospitalError::ConfigError("missing jwt secret".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing jwt secret");
    }
}
