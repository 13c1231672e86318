// Configuration validation
use secrecy::ExposeSecret;

use crate::error::{ConfigError, Result};
use crate::settings::HospitalConfig;

pub trait ConfigValidator {
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem found.
    fn validate(&self) -> Result<()>;
}

impl ConfigValidator for HospitalConfig {
    fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.expose_secret().trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.jwt_secret must not be empty".to_string(),
            ));
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(ConfigError::ValidationError(
                "auth.token_ttl_hours must be positive".to_string(),
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::ValidationError(
                "auth.bcrypt_cost must be between 4 and 31".to_string(),
            ));
        }
        if self.auth.bootstrap_admin_email.is_some() != self.auth.bootstrap_admin_password.is_some() {
            return Err(ConfigError::ValidationError(
                "auth.bootstrap_admin_email and auth.bootstrap_admin_password must be set together"
                    .to_string(),
            ));
        }
        if let Some(path) = &self.server.context_path {
            if !path.starts_with('/') || path.len() < 2 || path.ends_with('/') {
                return Err(ConfigError::ValidationError(format!(
                    "server.context_path must look like '/name', got '{path}'"
                )));
            }
        }
        if self.server.cors_origin.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.cors_origin must not be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
