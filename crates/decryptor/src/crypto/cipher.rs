//! AES-256-CBC decryption of an authenticated field.
//!
//! **No padding removal happens here.** The encrypting side frames plaintext
//! with trailing `0x08` bytes, which [`crate::payload::unwrap_plaintext`]
//! strips by value. Running a PKCS#7 unpad at this layer would reject or
//! mangle valid values.

use aes::Aes256;
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, KeyIvInit};
use common::protocol::SUPPORTED_CIPHER;
use common::DecryptError;

use super::decode_base64;
use super::key::DerivedKey;
use crate::field::EncryptedFieldValue;

/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;

type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Decrypt the field's ciphertext with `key` and the field's IV.
///
/// The ciphertext buffer is decrypted in place and returned whole, framing
/// bytes included.
///
/// # Errors
///
/// - [`DecryptError::UnsupportedCipher`] if the field does not declare `aes-256-cbc`;
///   nothing is decoded in that case.
/// - [`DecryptError::Base64DecodeFailure`] if the ciphertext or IV is not valid base64.
/// - [`DecryptError::CiphertextFramingError`] if the ciphertext is not whole blocks.
/// - [`DecryptError::CipherInitFailure`] if the IV is not [`BLOCK_LEN`] bytes.
pub fn decrypt_ciphertext(
    field: &EncryptedFieldValue,
    key: &DerivedKey,
) -> Result<Vec<u8>, DecryptError> {
    if field.cipher_name() != SUPPORTED_CIPHER {
        return Err(DecryptError::UnsupportedCipher(field.cipher_name().to_owned()));
    }

    let mut buf = decode_base64(field.ciphertext(), "encrypted_data")?;
    let iv = decode_base64(field.iv(), "iv")?;

    if buf.len() % BLOCK_LEN != 0 {
        return Err(DecryptError::CiphertextFramingError(buf.len()));
    }

    let decryptor = Aes256CbcDec::new_from_slices(key.as_bytes(), &iv).map_err(|_| {
        DecryptError::CipherInitFailure(format!(
            "iv must be {BLOCK_LEN} bytes, got {}",
            iv.len()
        ))
    })?;

    let total = buf.len();
    let len = decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| DecryptError::CiphertextFramingError(total))?
        .len();
    buf.truncate(len);

    Ok(buf)
}
