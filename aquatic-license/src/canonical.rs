//! Canonical hashing of license contents.
//!
//! The digest is SHA-1 over the raw UTF-8 bytes of every field value,
//! concatenated in canonical key order with nothing in between: no key
//! names, no separators, no length prefixes. Existing licenses are signed
//! over exactly this byte stream, so it must not change.

use sha1::{Digest, Sha1};

use crate::license::License;

/// Length of the canonical hash in bytes.
pub const HASH_SIZE: usize = 20;

/// Computes the canonical hash of a license's fields.
#[must_use]
pub fn canonical_hash(license: &License) -> [u8; HASH_SIZE] {
    let mut hasher = Sha1::new();
    for (_, value) in license.fields() {
        hasher.update(value.as_bytes());
    }
    hasher.finalize().into()
}

impl License {
    /// Returns the canonical hash of the current fields.
    ///
    /// Always recomputed; a stored signature has no influence on it.
    #[must_use]
    pub fn canonical_hash(&self) -> [u8; HASH_SIZE] {
        canonical_hash(self)
    }

    /// Returns the canonical hash as lowercase hex.
    #[must_use]
    pub fn canonical_hash_hex(&self) -> String {
        hex::encode(self.canonical_hash())
    }
}
