//! Authenticated decryption of version 2 encrypted data bag items.
//!
//! An item is a JSON object with a plain `id` and any number of encrypted
//! fields. Each field is authenticated with HMAC-SHA256, decrypted with
//! AES-256-CBC under `SHA-256(secret)`, and unwrapped from its
//! `{"json_wrapper": …}` envelope.
//!
//! ```no_run
//! use serde_json::{Map, Value};
//!
//! # fn run(raw: Map<String, Value>, secret: &[u8]) -> Result<(), common::DecryptError> {
//! let item = decryptor::decrypt_item(&raw, secret)?;
//! println!("{}", item["id"]);
//! # Ok(())
//! # }
//! ```
//!
//! Everything here is synchronous and holds no state between calls.

pub mod crypto;
pub mod field;
pub mod item;
pub mod payload;

#[cfg(test)]
pub(crate) mod testing;

pub use common::{DataBagItem, DecryptError, ErrorKind};
pub use field::{decrypt_field, EncryptedFieldValue};
pub use item::decrypt_item;
pub use payload::unwrap_plaintext;
