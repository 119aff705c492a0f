//! AES-256-CBC + HMAC-SHA256 primitives for version 2 encrypted data bag values.
//!
//! This module is free of item-level logic. It exposes the three leaf stages
//! of the field pipeline:
//!
//! - [`key::derive_key`]: SHA-256 of the shared secret, used as the AES key.
//! - [`mac::validate_hmac`]: authenticates the base64 ciphertext *text*.
//! - [`cipher::decrypt_ciphertext`]: AES-256-CBC decryption without padding removal.
//!
//! # Base64 handling
//!
//! Encoders in the wild wrap base64 at 60 columns and append a newline.
//! Decoding ignores ASCII whitespace; HMAC input never does.

pub mod cipher;
pub mod key;
pub mod mac;

pub use cipher::{decrypt_ciphertext, BLOCK_LEN};
pub use mac::validate_hmac;
pub use key::{derive_key, DerivedKey, KEY_LEN};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::DecryptError;

/// Decode standard padded base64, skipping any ASCII whitespace in `text`.
///
/// `attribute` names the envelope attribute for the error message.
pub(crate) fn decode_base64(text: &str, attribute: &'static str) -> Result<Vec<u8>, DecryptError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|_| DecryptError::Base64DecodeFailure(attribute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_line_wrapped_base64() {
        let decoded = decode_base64("aGVs\nbG8g\r\nd29y bGQ=\n", "encrypted_data").unwrap();
        assert_eq!(decoded, b"hello world");
    }

    #[test]
    fn rejects_invalid_alphabet() {
        let err = decode_base64("!!!!", "iv").unwrap_err();
        assert!(matches!(err, DecryptError::Base64DecodeFailure("iv")));
    }

    #[test]
    fn rejects_missing_padding() {
        assert!(decode_base64("aGVsbG8", "hmac").is_err());
    }
}
