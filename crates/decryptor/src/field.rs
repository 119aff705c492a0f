//! [`EncryptedFieldValue`]: a validated encrypted field, and the per-field pipeline.
//!
//! # Pipeline order
//!
//! 1. Validate the envelope shape and version ([`EncryptedFieldValue::from_value`]).
//! 2. Authenticate the ciphertext ([`crate::crypto::validate_hmac`]).
//! 3. Derive the key and decrypt ([`crate::crypto::decrypt_ciphertext`]).
//! 4. Unwrap the plaintext ([`crate::payload::unwrap_plaintext`]).
//!
//! A failing step ends the pipeline. Nothing is decrypted before step 2 passes.

use serde::Deserialize;
use serde_json::Value;

use common::protocol::{EncryptedFieldEnvelope, SUPPORTED_VERSION};
use common::DecryptError;

use crate::crypto::{decrypt_ciphertext, derive_key, validate_hmac};
use crate::payload::unwrap_plaintext;

/// One encrypted field whose envelope has been checked.
///
/// Built fresh for every decryption attempt and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedFieldValue {
    ciphertext: String,
    tag: String,
    iv: String,
    version: i64,
    cipher_name: String,
}

impl EncryptedFieldValue {
    /// Validate a raw JSON value as a version 2 encrypted field.
    ///
    /// # Errors
    ///
    /// - [`DecryptError::MalformedField`] if `raw` is not an object or any of
    ///   `encrypted_data`, `hmac`, `iv`, `version`, `cipher` is missing or mis-typed.
    /// - [`DecryptError::UnsupportedVersion`] if `version` is not 2.
    pub fn from_value(raw: &Value) -> Result<Self, DecryptError> {
        if !raw.is_object() {
            return Err(DecryptError::MalformedField(
                "expected an encrypted field object".into(),
            ));
        }
        let envelope = EncryptedFieldEnvelope::deserialize(raw)
            .map_err(|e| DecryptError::MalformedField(e.to_string()))?;
        Self::try_from(envelope)
    }

    /// Base64 ciphertext text, exactly as received.
    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    /// Base64 HMAC tag text.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Base64 IV text.
    pub fn iv(&self) -> &str {
        &self.iv
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn cipher_name(&self) -> &str {
        &self.cipher_name
    }

    /// Authenticate, decrypt, and unwrap this field with `secret`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage.
    pub fn decrypt(&self, secret: &[u8]) -> Result<String, DecryptError> {
        validate_hmac(self, secret)?;
        let key = derive_key(secret);
        let decrypted = decrypt_ciphertext(self, &key)?;
        unwrap_plaintext(&decrypted)
    }
}

impl TryFrom<EncryptedFieldEnvelope> for EncryptedFieldValue {
    type Error = DecryptError;

    fn try_from(envelope: EncryptedFieldEnvelope) -> Result<Self, Self::Error> {
        if envelope.version != SUPPORTED_VERSION {
            return Err(DecryptError::UnsupportedVersion(envelope.version));
        }
        Ok(Self {
            ciphertext: envelope.encrypted_data,
            tag: envelope.hmac,
            iv: envelope.iv,
            version: envelope.version,
            cipher_name: envelope.cipher,
        })
    }
}

/// Decrypt one raw encrypted field value with `secret`.
///
/// # Errors
///
/// Returns [`DecryptError`] from envelope validation or from the first failing
/// pipeline stage.
pub fn decrypt_field(raw: &Value, secret: &[u8]) -> Result<String, DecryptError> {
    EncryptedFieldValue::from_value(raw)?.decrypt(secret)
}
