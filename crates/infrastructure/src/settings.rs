//! Strategy options loader backed by the `config` crate.

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config, Environment, File};
use stripe_auth_domain::{ConfigError, StrategyOptions};

/// Loads [`StrategyOptions`] from a file and/or prefixed environment variables.
///
/// Environment values override file values. With prefix `STRIPE`,
/// `STRIPE_CLIENT_ID` sets `client_id` and `STRIPE_SCOPE=read_write,read_only`
/// sets the scope list.
#[derive(Debug, Clone, Default)]
pub struct OptionsLoader {
    file: Option<PathBuf>,
    env_prefix: Option<String>,
    env_vars: Option<HashMap<String, String>>,
}

impl OptionsLoader {
    /// Creates a loader with no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a file; the format follows the extension (`.yaml`, `.toml`, `.json`, ...).
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Reads environment variables starting with `{prefix}_`.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Uses `vars` instead of the process environment.
    #[must_use]
    pub fn env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Builds the options.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] if a source cannot be read or the
    /// merged values do not fit [`StrategyOptions`].
    pub fn load(&self) -> Result<StrategyOptions, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            tracing::debug!(path = %path.display(), "loading strategy options file");
            builder = builder.add_source(File::from(path.as_path()));
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("scope")
                    .source(self.env_vars.clone()),
            );
        }

        builder
            .build()
            .and_then(|config| config.try_deserialize::<StrategyOptions>())
            .map_err(|e| ConfigError::Load(e.to_string()))
    }
}
