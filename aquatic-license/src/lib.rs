//! Aquatic Prime license issuing and verification.
//!
//! A license is a property-list dictionary of string fields plus an RSA
//! signature stored under the reserved `Signature` key.
//!
//! # Signing scheme
//!
//! - Field names are sorted case-insensitively.
//! - The field values are concatenated in that order with no separators
//!   and hashed with SHA-1.
//! - The 20-byte digest is signed with RSA PKCS#1 v1.5 without a
//!   DigestInfo prefix.
//!
//! Field names are not covered by the hash, only their order is.
//!
//! # Example
//!
//! ```no_run
//! use aquatic_license::{KeyPair, License};
//!
//! let keys = KeyPair::generate(1024)?;
//!
//! let mut license = License::new();
//! license.set("Name", "John Doe");
//! license.set("Email", "john.doe@example.com");
//! license.sign(&keys.signing_key)?;
//!
//! let bytes = license.to_bytes()?;
//! let loaded = License::from_bytes(&bytes)?;
//! loaded.verify(&keys.verifying_key)?;
//! assert_eq!(loaded.get("Name"), Some("John Doe"));
//! # Ok::<(), aquatic_license::LicenseError>(())
//! ```

mod canonical;
mod error;
mod format;
mod key;
mod license;
mod signing;

pub use canonical::{canonical_hash, HASH_SIZE};
pub use error::{LicenseError, LicenseResult};
pub use format::{license_from_value, license_to_value};
pub use key::{KeyMaterial, KeyPair, SigningKey, VerifyingKey, AQUATIC_PRIME_EXPONENT};
pub use license::{License, SIGNATURE_KEY};
pub use signing::{sign_digest, verify_digest};
