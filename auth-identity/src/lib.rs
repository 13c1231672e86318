//! Identity management and user authentication for the hospital backend
//!
//! This crate provides:
//! - the closed [`Role`] and [`Permission`] sets and the mapping between them
//! - account registration and credential verification (bcrypt or argon2)
//! - HS256 JWT issuance and validation
//! - user repositories for PostgreSQL and in-memory storage
//!
//! # Example
//!
//! ```rust
//! use auth_identity::{IdentityConfig, IdentityService, InMemoryUserRepository, NewAccount, PasswordScheme, Role};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IdentityConfig {
//!     password_scheme: PasswordScheme::Bcrypt { cost: 4 },
//!     ..IdentityConfig::new("change-me")
//! };
//! let service = IdentityService::new(Arc::new(InMemoryUserRepository::new()), &config);
//!
//! service
//!     .register_user(NewAccount {
//!         email: "user@example.com".into(),
//!         password: "password123".into(),
//!         role: Role::Patient,
//!     })
//!     .await?;
//! let login = service.authenticate("user@example.com", "password123").await?;
//! assert_eq!(login.role, Role::Patient);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod repository;
pub mod role;
pub mod service;
pub mod token;

pub use config::IdentityConfig;
pub use error::{IdentityError, Result};
pub use models::*;
pub use password::{verify_password, PasswordScheme};
pub use repository::{InMemoryUserRepository, PgUserRepository, UserRepository};
pub use role::{Permission, Role};
pub use service::{is_valid_email, IdentityService};
pub use token::{Claims, IssuedToken, TokenService};
