//! Reading an item, decrypting it, and writing the result.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};

use anyhow::{Context, Result};
use common::protocol::ErrorReport;
use common::{DataBagItem, DecryptError};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::Config;
use crate::secret::SharedSecret;

/// Parse a raw item from `reader`. The document must be a JSON object.
///
/// # Errors
///
/// Returns an error if the input is not JSON or not an object.
pub fn read_item<R: Read>(reader: R) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_reader(reader).context("item is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("item must be a JSON object"),
    }
}

/// Serialise a decrypted item as a JSON object followed by a newline.
pub fn write_item<W: Write>(mut writer: W, item: &DataBagItem, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, item)?;
    } else {
        serde_json::to_writer(&mut writer, item)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Serialise the error report for a failed decryption.
pub fn write_error<W: Write>(mut writer: W, err: &DecryptError) -> Result<()> {
    serde_json::to_writer(&mut writer, &ErrorReport::from(err))?;
    writeln!(writer)?;
    Ok(())
}

fn open_item(path: &str) -> Result<Box<dyn Read>> {
    if path == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("failed to open item file {path}"))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Decrypt the configured item with `secret` and print it to stdout.
///
/// I/O and parse problems are returned as errors. A decryption failure is
/// reported on stderr as an [`ErrorReport`] and yields `Ok(false)`.
///
/// # Errors
///
/// Returns an error if the item cannot be read or the output cannot be written.
pub fn run(cfg: &Config, secret: &SharedSecret) -> Result<bool> {
    let raw = read_item(open_item(&cfg.item_path)?)
        .with_context(|| format!("failed to read item from {}", cfg.item_path))?;
    info!(path = %cfg.item_path, fields = raw.len(), "decrypting item");

    match decryptor::decrypt_item(&raw, secret.as_bytes()) {
        Ok(item) => {
            write_item(io::stdout().lock(), &item, cfg.pretty)?;
            info!(fields = item.len(), "item decrypted");
            Ok(true)
        }
        Err(e) => {
            warn!(code = e.code(), field = e.field().unwrap_or(""), "item decryption failed");
            write_error(io::stderr().lock(), &e)?;
            Ok(false)
        }
    }
}
