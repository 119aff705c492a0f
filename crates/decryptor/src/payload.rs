//! Extraction of the plaintext from a decrypted buffer.
//!
//! Decrypted bytes look like:
//!
//! ```text
//! {"json_wrapper":"<plaintext>"}\x08\x08\x08…
//! ```
//!
//! Trailing `0x08` bytes are framing and are stripped by value before the JSON
//! object is parsed.

use std::collections::HashMap;

use common::protocol::JSON_WRAPPER_KEY;
use common::DecryptError;

/// Framing byte appended after the JSON envelope.
pub const FRAMING_BYTE: u8 = 0x08;

/// Strip the framing bytes and return the `json_wrapper` value.
///
/// # Errors
///
/// Returns [`DecryptError::PlaintextFormatError`] if the trimmed bytes are not a
/// JSON object of strings, or if the object has no `json_wrapper` key.
pub fn unwrap_plaintext(decrypted: &[u8]) -> Result<String, DecryptError> {
    let end = decrypted
        .iter()
        .rposition(|&b| b != FRAMING_BYTE)
        .map_or(0, |i| i + 1);

    // Parse errors can quote offending input, so only a fixed reason is kept.
    let mut envelope: HashMap<String, String> = serde_json::from_slice(&decrypted[..end])
        .map_err(|_| DecryptError::PlaintextFormatError("not a json object of strings"))?;

    envelope
        .remove(JSON_WRAPPER_KEY)
        .ok_or(DecryptError::PlaintextFormatError("missing `json_wrapper` key"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_framing_and_unwraps() {
        let mut buf = br#"{"json_wrapper":"world"}"#.to_vec();
        buf.extend_from_slice(&[FRAMING_BYTE; 8]);
        assert_eq!(unwrap_plaintext(&buf).unwrap(), "world");
    }

    #[test]
    fn no_framing_bytes() {
        assert_eq!(
            unwrap_plaintext(br#"{"json_wrapper":"p@ss w0rd"}"#).unwrap(),
            "p@ss w0rd"
        );
    }

    #[test]
    fn keeps_escaped_backspace_inside_value() {
        let mut buf = br#"{"json_wrapper":"tail\b"}"#.to_vec();
        buf.push(FRAMING_BYTE);
        assert_eq!(unwrap_plaintext(&buf).unwrap(), "tail\u{8}");
    }

    #[test]
    fn other_trailing_bytes_are_not_stripped() {
        // A PKCS#7 pad of length 4 is not framing.
        let mut buf = br#"{"json_wrapper":"abc"}"#.to_vec();
        buf.extend_from_slice(&[0x04; 4]);
        assert!(matches!(
            unwrap_plaintext(&buf),
            Err(DecryptError::PlaintextFormatError(_))
        ));
    }

    #[test]
    fn ignores_extra_keys() {
        let buf = br#"{"other":"x","json_wrapper":"y"}"#;
        assert_eq!(unwrap_plaintext(buf).unwrap(), "y");
    }

    #[test]
    fn missing_wrapper_key() {
        let err = unwrap_plaintext(br#"{"wrapper":"world"}"#).unwrap_err();
        assert!(err.to_string().contains("json_wrapper"));
    }

    #[test]
    fn non_string_values_rejected() {
        assert!(unwrap_plaintext(br#"{"json_wrapper":5}"#).is_err());
    }

    #[test]
    fn garbage_rejected_without_echoing_it() {
        let err = unwrap_plaintext(b"\x8f\x01secret-ish garbage\x08\x08").unwrap_err();
        assert!(matches!(err, DecryptError::PlaintextFormatError(_)));
        assert!(!err.to_string().contains("secret-ish"));
    }

    #[test]
    fn only_framing_bytes() {
        assert!(unwrap_plaintext(&[FRAMING_BYTE; 16]).is_err());
    }
}
