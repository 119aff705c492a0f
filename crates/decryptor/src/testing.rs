//! Fixtures and a test-only encryptor matching the companion tooling's output.

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::NoPadding, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

use crate::crypto::{derive_key, BLOCK_LEN};
use crate::field::EncryptedFieldValue;
use crate::payload::FRAMING_BYTE;

/// Secret the fixed vector was encrypted with.
pub(crate) const SECRET: &[u8] = b"abcdef1234";

/// Known-good field whose plaintext is `"world"`.
pub(crate) fn fixture() -> Value {
    json!({
        "encrypted_data": "AKyDsX/eiYImvjJljM8By3zi6fR7ekqhqEY1sPSOYK0=\n",
        "hmac": "CDtQRHLtY1ohbnH27BEm6hxskEsj/lLa45SHHZHoABQ=\n",
        "iv": "4tDhUVRqApUlKC11q5gA5A==\n",
        "version": 2,
        "cipher": "aes-256-cbc"
    })
}

pub(crate) fn fixture_field() -> EncryptedFieldValue {
    EncryptedFieldValue::from_value(&fixture()).unwrap()
}

/// Replace one string attribute of an envelope.
pub(crate) fn with_attr(mut value: Value, attr: &str, text: &str) -> Value {
    value[attr] = json!(text);
    value
}

/// Base64 wrapped at 60 columns with a newline after every line.
fn encode64(bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / 60 + 1);
    for line in encoded.as_bytes().chunks(60) {
        out.push_str(std::str::from_utf8(line).unwrap());
        out.push('\n');
    }
    out
}

/// Encrypt `plaintext` into a version 2 envelope the way the encrypting side does.
pub(crate) fn encrypt_value(secret: &[u8], plaintext: &str, iv: [u8; BLOCK_LEN]) -> Value {
    let mut buf = serde_json::to_vec(&json!({ "json_wrapper": plaintext })).unwrap();
    let pad = (BLOCK_LEN - buf.len() % BLOCK_LEN) % BLOCK_LEN;
    buf.resize(buf.len() + pad, FRAMING_BYTE);

    let len = buf.len();
    let key = derive_key(secret);
    cbc::Encryptor::<Aes256>::new_from_slices(key.as_bytes(), &iv)
        .unwrap()
        .encrypt_padded_mut::<NoPadding>(&mut buf, len)
        .unwrap();

    let encrypted_data = encode64(&buf);
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
    mac.update(encrypted_data.as_bytes());
    let hmac = encode64(&mac.finalize().into_bytes());

    json!({
        "encrypted_data": encrypted_data,
        "hmac": hmac,
        "iv": encode64(&iv),
        "version": 2,
        "cipher": "aes-256-cbc"
    })
}
