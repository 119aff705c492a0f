//! Configuration loading and validation for the decrypt command.
//!
//! All values are read from `DATABAG_`-prefixed environment variables. The
//! process exits with a clear error message if a required variable is missing
//! or the secret source is ambiguous.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Prefix shared by every environment variable this command reads.
pub const ENV_PREFIX: &str = "DATABAG";

/// Validated decrypt command configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Path of the JSON item to decrypt, or `-` for stdin. **Required.**
    pub item_path: String,

    /// Path of the file holding the shared secret.
    #[serde(default)]
    pub secret_file: Option<String>,

    /// The shared secret itself. Mutually exclusive with `secret_file`.
    #[serde(default)]
    pub secret: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pretty-print the decrypted item.
    #[serde(default)]
    pub pretty: bool,
}

fn default_log_level() -> String {
    "info".into()
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("item_path", &self.item_path)
            .field("secret_file", &self.secret_file)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("log_level", &self.log_level)
            .field("pretty", &self.pretty)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.item_path.trim().is_empty() {
            anyhow::bail!("{ENV_PREFIX}_ITEM_PATH is required and must not be empty");
        }
        match (&self.secret_file, &self.secret) {
            (Some(_), Some(_)) => anyhow::bail!(
                "set only one of {ENV_PREFIX}_SECRET_FILE and {ENV_PREFIX}_SECRET"
            ),
            (None, None) => anyhow::bail!(
                "one of {ENV_PREFIX}_SECRET_FILE or {ENV_PREFIX}_SECRET is required"
            ),
            (Some(path), None) if path.trim().is_empty() => {
                anyhow::bail!("{ENV_PREFIX}_SECRET_FILE must not be empty")
            }
            _ => Ok(()),
        }
    }
}
