//! Configuration management for the hospital backend
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults (suitable for local development)
//! 2. An optional YAML/TOML/JSON file (`hospital-server.yaml` by default)
//! 3. Environment variables prefixed with `HOSPITAL__`, using `__` as the
//!    section separator (`HOSPITAL__AUTH__JWT_SECRET`, `HOSPITAL__SERVER__PORT`)
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::{ConfigEngine, ConfigSource};
//!
//! let config = ConfigEngine::new()
//!     .add_source(ConfigSource::file("hospital-server.yaml"))
//!     .add_source(ConfigSource::env("HOSPITAL"))
//!     .load_hospital()?;
//!
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod engine;
pub mod error;
pub mod providers;
pub mod settings;
pub mod validation;

pub use engine::*;
pub use error::*;
pub use providers::*;
pub use settings::*;
pub use validation::ConfigValidator;
