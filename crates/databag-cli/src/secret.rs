//! [`SharedSecret`]: loading the data bag secret from a file or the environment.

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;

/// The shared secret used to authenticate and decrypt every field.
///
/// The buffer is overwritten with zeroes on drop and never printed.
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Build a secret from raw file or variable contents.
    ///
    /// Surrounding ASCII whitespace is trimmed; secret files are usually
    /// written with a trailing newline that is not part of the secret.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is left after trimming.
    pub fn from_contents(mut raw: Vec<u8>) -> Result<Self> {
        let start = raw.iter().position(|b| !b.is_ascii_whitespace());
        let end = raw.iter().rposition(|b| !b.is_ascii_whitespace());
        let trimmed = match (start, end) {
            (Some(start), Some(end)) => raw[start..=end].to_vec(),
            _ => Vec::new(),
        };
        raw.iter_mut().for_each(|b| *b = 0);

        if trimmed.is_empty() {
            anyhow::bail!("shared secret is empty");
        }
        Ok(Self(trimmed))
    }

    /// Borrow the secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

/// Load the shared secret from whichever source `cfg` names.
///
/// # Errors
///
/// Returns an error if the secret file cannot be read or the secret is empty.
pub fn load(cfg: &Config) -> Result<SharedSecret> {
    if let Some(path) = &cfg.secret_file {
        let raw = std::fs::read(path)
            .with_context(|| format!("failed to read secret file {path}"))?;
        debug!(path = %path, "loaded shared secret from file");
        return SharedSecret::from_contents(raw)
            .with_context(|| format!("secret file {path} holds no secret"));
    }

    let inline = cfg
        .secret
        .as_ref()
        .context("no shared secret configured")?;
    debug!("loaded shared secret from environment");
    SharedSecret::from_contents(inline.as_bytes().to_vec())
}
