//! [`DerivedKey`]: the AES-256 key derived from the shared secret.

use sha2::{Digest, Sha256};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size key buffer holding exactly [`KEY_LEN`] bytes.
///
/// Derived per decryption and dropped with the call. The memory is
/// overwritten with zeroes on drop.
pub struct DerivedKey(Box<[u8; KEY_LEN]>);

impl DerivedKey {
    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the cipher key for `secret`: a plain SHA-256 digest.
///
/// No salt and no iterations; the same secret always yields the same key,
/// which is what the encrypting side expects.
pub fn derive_key(secret: &[u8]) -> DerivedKey {
    let digest: [u8; KEY_LEN] = Sha256::digest(secret).into();
    DerivedKey(Box::new(digest))
}
