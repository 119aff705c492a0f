//! Wire types for encrypted data bag items.
//!
//! An item is a JSON object whose `id` is a plain string and whose other
//! values are [`EncryptedFieldEnvelope`] objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DecryptError;

/// Name of the identifier field that passes through decryption unchanged.
pub const ID_FIELD: &str = "id";

/// The only encrypted data bag format version this crate understands.
pub const SUPPORTED_VERSION: i64 = 2;

/// The only cipher accepted in [`EncryptedFieldEnvelope::cipher`].
pub const SUPPORTED_CIPHER: &str = "aes-256-cbc";

/// Key inside the decrypted JSON object that holds the real plaintext.
pub const JSON_WRAPPER_KEY: &str = "json_wrapper";

/// A decrypted data bag item: field name → plaintext.
pub type DataBagItem = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Encrypted field envelope
// ---------------------------------------------------------------------------

/// One encrypted field as it appears on the wire.
///
/// ```text
/// {
///   "encrypted_data": "<base64>",
///   "hmac": "<base64>",
///   "iv": "<base64>",
///   "version": 2,
///   "cipher": "aes-256-cbc"
/// }
/// ```
///
/// Base64 strings are kept exactly as received, line breaks included: the
/// HMAC covers the `encrypted_data` text, not the bytes it decodes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedFieldEnvelope {
    /// Base64 ciphertext.
    pub encrypted_data: String,
    /// Base64 HMAC-SHA256 tag over `encrypted_data`.
    pub hmac: String,
    /// Base64 initialisation vector.
    pub iv: String,
    /// Format version.
    pub version: i64,
    /// Cipher name.
    pub cipher: String,
}

// ---------------------------------------------------------------------------
// Error report
// ---------------------------------------------------------------------------

/// Error body emitted by the command-line tool when decryption fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Short machine-readable error code (e.g. `"authentication_failure"`).
    pub code: String,
    /// Item field that failed, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable description, free of secret material.
    pub message: String,
}

impl ErrorReport {
    /// Construct an [`ErrorReport`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            field: None,
            message: message.into(),
        }
    }
}

impl From<&DecryptError> for ErrorReport {
    fn from(err: &DecryptError) -> Self {
        Self {
            code: err.code().to_owned(),
            field: err.field().map(str::to_owned),
            message: err.to_string(),
        }
    }
}
