// Configuration sources (files and environment)
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};

/// A single layer of configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Configuration file; format is inferred from the extension
    File { path: String, required: bool },
    /// Environment variables with the given prefix and `__` separators
    Env { prefix: String },
}

impl ConfigSource {
    /// Optional configuration file
    pub fn file(path: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            required: false,
        }
    }

    /// Configuration file that must exist
    pub fn required_file(path: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            required: true,
        }
    }

    /// Environment variables such as `PREFIX__SECTION__KEY`
    pub fn env(prefix: impl Into<String>) -> Self {
        Self::Env {
            prefix: prefix.into(),
        }
    }

    pub(crate) fn apply(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> ConfigBuilder<DefaultState> {
        match self {
            Self::File { path, required } => {
                builder.add_source(File::with_name(path).required(*required))
            }
            Self::Env { prefix } => builder.add_source(
                Environment::with_prefix(prefix)
                    .separator("__")
                    .try_parsing(true),
            ),
        }
    }
}
