//! RSA signing and verification of the canonical hash.
//!
//! Signatures are PKCS#1 v1.5 over the raw 20-byte digest with no
//! DigestInfo prefix, i.e. the hash algorithm is not encoded in the
//! signature. This is what deployed Aquatic Prime licenses carry.

use rsa::Pkcs1v15Sign;
use tracing::debug;

use crate::error::{LicenseError, LicenseResult};
use crate::key::{SigningKey, VerifyingKey};
use crate::license::License;

fn scheme() -> Pkcs1v15Sign {
    Pkcs1v15Sign::new_unprefixed()
}

/// Signs a digest directly, without a hash-algorithm identifier.
///
/// # Errors
///
/// Returns [`LicenseError::Signing`] if the RSA primitive fails, e.g. when
/// the key is too small to hold the padded digest.
pub fn sign_digest(key: &SigningKey, digest: &[u8]) -> LicenseResult<Vec<u8>> {
    key.as_rsa()
        .sign(scheme(), digest)
        .map_err(LicenseError::Signing)
}

/// Verifies a signature made by [`sign_digest`].
///
/// # Errors
///
/// Returns [`LicenseError::InvalidSignature`] on any mismatch.
pub fn verify_digest(key: &VerifyingKey, digest: &[u8], signature: &[u8]) -> LicenseResult<()> {
    key.as_rsa()
        .verify(scheme(), digest, signature)
        .map_err(|_| LicenseError::InvalidSignature)
}

impl License {
    /// Signs the current fields and stores the signature.
    ///
    /// Any previous signature is replaced. On failure the license is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Signing`] if the RSA primitive fails.
    pub fn sign(&mut self, key: &SigningKey) -> LicenseResult<()> {
        let hash = self.canonical_hash();
        let signature = sign_digest(key, &hash)?;
        debug!(fields = self.len(), "license signed");
        self.set_signature(signature);
        Ok(())
    }

    /// Verifies the stored signature against the current fields.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::MissingSignature`] if the license is unsigned
    /// and [`LicenseError::InvalidSignature`] if the signature does not match.
    pub fn verify(&self, key: &VerifyingKey) -> LicenseResult<()> {
        let signature = self.signature().ok_or(LicenseError::MissingSignature)?;
        let result = verify_digest(key, &self.canonical_hash(), signature);
        debug!(valid = result.is_ok(), "license verified");
        result
    }
}
