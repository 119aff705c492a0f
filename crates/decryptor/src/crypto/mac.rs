//! HMAC-SHA256 authentication of an encrypted field.
//!
//! The tag covers the `encrypted_data` attribute as base64 **text**, exactly as
//! it arrived (line breaks included). Hashing the decoded bytes instead would
//! reject every value produced by the encrypting side.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use common::DecryptError;

use super::decode_base64;
use crate::field::EncryptedFieldValue;

type HmacSha256 = Hmac<Sha256>;

/// Check the field's HMAC tag against `secret`.
///
/// Comparison is constant-time. A tag that is not valid base64 can never
/// match and is reported the same way as a mismatch.
///
/// # Errors
///
/// Returns [`DecryptError::AuthenticationFailure`] if the tag does not verify.
pub fn validate_hmac(field: &EncryptedFieldValue, secret: &[u8]) -> Result<(), DecryptError> {
    let candidate = decode_base64(field.tag(), "hmac").map_err(|_| {
        warn!("hmac tag is not valid base64");
        DecryptError::AuthenticationFailure
    })?;

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|_| DecryptError::AuthenticationFailure)?;
    mac.update(field.ciphertext().as_bytes());

    mac.verify_slice(&candidate).map_err(|_| {
        warn!("hmac mismatch");
        DecryptError::AuthenticationFailure
    })
}
