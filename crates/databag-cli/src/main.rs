//! `databag-decrypt` — decrypt one encrypted data bag item.
//!
//! Startup sequence:
//! 1. Load and validate [`config::Config`] from `DATABAG_*` environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Load the shared secret.
//! 4. Read the item, decrypt it, and print the plaintext item on stdout.

mod config;
mod decrypt;
mod secret;
mod telemetry;

use std::process::ExitCode;

use anyhow::Result;

fn main() -> Result<ExitCode> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: databag-decrypt configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Shared secret
    // -----------------------------------------------------------------------
    let secret = secret::load(&cfg)?;

    // -----------------------------------------------------------------------
    // 4. Decrypt
    // -----------------------------------------------------------------------
    if decrypt::run(&cfg, &secret)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
