use secrecy::SecretString;

use crate::password::PasswordScheme;

/// Settings for token issuance and password hashing
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub jwt_secret: SecretString,
    pub token_ttl_hours: i64,
    pub issuer: String,
    pub password_scheme: PasswordScheme,
}

impl IdentityConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::new(jwt_secret.into()),
            ..Self::default()
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
            token_ttl_hours: 24,
            issuer: "hospital-backend".to_string(),
            password_scheme: PasswordScheme::default(),
        }
    }
}
