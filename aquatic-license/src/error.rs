//! Error types for license handling.

use thiserror::Error;

/// Errors raised while loading, signing or verifying a license.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// The document does not have the shape of a license.
    #[error("invalid license format: {0}")]
    InvalidFormat(String),

    /// Verification was attempted on a license that carries no signature.
    #[error("license signature is missing")]
    MissingSignature,

    /// The stored signature does not match the license contents.
    #[error("license signature is not valid")]
    InvalidSignature,

    /// The reserved `Signature` field can only be changed by signing.
    #[error("the signature field cannot be modified")]
    CannotModifySignature,

    /// The RSA primitive refused to produce a signature.
    #[error("signing failed: {0}")]
    Signing(#[source] rsa::Error),

    /// Key material is malformed or inconsistent.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The property-list codec failed to read or write the document.
    #[error("plist error: {0}")]
    Plist(#[from] plist::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key configuration could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
