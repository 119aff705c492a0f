//! Common error types shared across crates.

use thiserror::Error;

/// Every failure the decryption pipeline can produce.
///
/// Messages describe *what* failed and never include secret, key, or
/// plaintext material. The variants map onto short machine-readable codes
/// via [`DecryptError::code`]:
/// - [`DecryptError::MalformedField`] → `malformed_field`
/// - [`DecryptError::AuthenticationFailure`] → `authentication_failure`
/// - [`DecryptError::PlaintextFormatError`] → `plaintext_format_error`
/// - …and so on, one code per [`ErrorKind`].
#[derive(Debug, Error)]
pub enum DecryptError {
    /// A required sub-attribute or the item `id` is missing or has the wrong type.
    #[error("malformed field: {0}")]
    MalformedField(String),

    /// The envelope declares a format version other than 2.
    #[error("unsupported encrypted data bag version: {0}")]
    UnsupportedVersion(i64),

    /// The envelope declares a cipher other than `aes-256-cbc`.
    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),

    /// The named attribute is not valid base64.
    #[error("invalid base64 in `{0}`")]
    Base64DecodeFailure(&'static str),

    /// The HMAC tag does not match. Most likely the secret is wrong.
    #[error("invalid hmac, most likely the provided secret is incorrect")]
    AuthenticationFailure,

    /// The block cipher could not be initialised from the derived key and IV.
    #[error("cipher initialisation failed: {0}")]
    CipherInitFailure(String),

    /// The decoded ciphertext is not a whole number of cipher blocks.
    #[error("ciphertext length {0} is not a multiple of the cipher block size")]
    CiphertextFramingError(usize),

    /// The decrypted bytes are not a JSON object holding a `json_wrapper` string.
    #[error("decrypted payload is not valid: {0}")]
    PlaintextFormatError(&'static str),

    /// A field of an item failed; `source` holds the underlying failure.
    #[error("field `{field}`: {source}")]
    Field {
        /// Name of the item field that failed.
        field: String,
        /// The failure raised while decrypting that field.
        source: Box<DecryptError>,
    },
}

/// Flat classification of a [`DecryptError`], ignoring which field it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedField,
    UnsupportedVersion,
    UnsupportedCipher,
    Base64DecodeFailure,
    AuthenticationFailure,
    CipherInitFailure,
    CiphertextFramingError,
    PlaintextFormatError,
}

impl ErrorKind {
    /// Short machine-readable code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::MalformedField => "malformed_field",
            ErrorKind::UnsupportedVersion => "unsupported_version",
            ErrorKind::UnsupportedCipher => "unsupported_cipher",
            ErrorKind::Base64DecodeFailure => "base64_decode_failure",
            ErrorKind::AuthenticationFailure => "authentication_failure",
            ErrorKind::CipherInitFailure => "cipher_init_failure",
            ErrorKind::CiphertextFramingError => "ciphertext_framing_error",
            ErrorKind::PlaintextFormatError => "plaintext_format_error",
        }
    }
}

impl DecryptError {
    /// Returns the kind of the underlying failure, looking through [`DecryptError::Field`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecryptError::MalformedField(_) => ErrorKind::MalformedField,
            DecryptError::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            DecryptError::UnsupportedCipher(_) => ErrorKind::UnsupportedCipher,
            DecryptError::Base64DecodeFailure(_) => ErrorKind::Base64DecodeFailure,
            DecryptError::AuthenticationFailure => ErrorKind::AuthenticationFailure,
            DecryptError::CipherInitFailure(_) => ErrorKind::CipherInitFailure,
            DecryptError::CiphertextFramingError(_) => ErrorKind::CiphertextFramingError,
            DecryptError::PlaintextFormatError(_) => ErrorKind::PlaintextFormatError,
            DecryptError::Field { source, .. } => source.kind(),
        }
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Name of the item field that failed, if the error was raised by item decryption.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecryptError::Field { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Attach the name of the item field this error was raised for.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        DecryptError::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }
}
