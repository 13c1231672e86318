use secrecy::SecretString;
use serde::Deserialize;

/// Root configuration of the hospital server
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct HospitalConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

/// HTTP listener and routing settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Optional prefix every route is nested under, e.g. `/hospital`
    pub context_path: Option<String>,
    /// The single origin allowed by CORS (credentials are allowed)
    pub cors_origin: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            context_path: None,
            cors_origin: "http://localhost:3000".to_string(),
        }
    }
}

/// Relational store settings
///
/// Without a `url` the server falls back to the in-memory store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 20,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PasswordSchemeSetting {
    #[default]
    Bcrypt,
    Argon2,
}

/// Token issuance and credential settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub jwt_secret: SecretString,
    pub token_ttl_hours: i64,
    pub issuer: String,
    pub password_scheme: PasswordSchemeSetting,
    pub bcrypt_cost: u32,
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<SecretString>,
}

/// Secret used when nothing is configured; rejected outside development
pub const DEVELOPMENT_JWT_SECRET: &str = "development-only-secret-change-me";

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(DEVELOPMENT_JWT_SECRET.to_string()),
            token_ttl_hours: 24,
            issuer: "hospital-backend".to_string(),
            password_scheme: PasswordSchemeSetting::Bcrypt,
            bcrypt_cost: 12,
            bootstrap_admin_email: None,
            bootstrap_admin_password: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
