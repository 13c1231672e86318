use config::Config;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::providers::ConfigSource;
use crate::settings::HospitalConfig;
use crate::validation::ConfigValidator;

/// Layered configuration loader
#[derive(Debug, Clone, Default)]
pub struct ConfigEngine {
    sources: Vec<ConfigSource>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source; later sources override earlier ones
    #[must_use]
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Merge all sources and deserialize into `T`
    ///
    /// # Errors
    ///
    /// Fails when a required file is missing or a value has the wrong type.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        let builder = self
            .sources
            .iter()
            .fold(Config::builder(), |builder, source| {
                debug!(?source, "Adding configuration source");
                source.apply(builder)
            });

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load and validate the server configuration
    ///
    /// # Errors
    ///
    /// Fails on parse errors or when [`ConfigValidator::validate`] rejects
    /// the merged settings.
    pub fn load_hospital(&self) -> Result<HospitalConfig> {
        let config: HospitalConfig = self.load()?;
        config.validate()?;
        Ok(config)
    }
}
