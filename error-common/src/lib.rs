//! Common error handling utilities for the hospital backend
//!
//! This crate holds the process-level error type used by the server binary
//! and the stable error codes attached to every API error response.
//!
//! # Error Categories
//!
//! - **Validation**: missing or malformed request fields
//! - **Authentication**: bad credentials, missing or expired tokens
//! - **Authorization**: authenticated caller lacking the required role
//! - **Resource**: unknown identifiers and uniqueness conflicts
//! - **Database**: connection and query failures
//!
//! # Example
//!
//! ```rust
//! use error_common::{HospitalError, Result};
//!
//! fn bind_port(raw: &str) -> Result<u16> {
//!     raw.parse()
//!         .map_err(|_| HospitalError::ConfigError(format!("invalid port: {raw}")))
//! }
//!
//! assert!(bind_port("8080").is_ok());
//! assert!(bind_port("http").is_err());
//! ```

pub mod codes;
pub mod types;

pub use codes::*;
pub use types::*;
