//! Common types, wire definitions, and errors shared across the data bag decryptor crates.

pub mod error;
pub mod protocol;

pub use error::{DecryptError, ErrorKind};
pub use protocol::{DataBagItem, EncryptedFieldEnvelope};
