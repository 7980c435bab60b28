//! The license document model.
//!
//! A license is a set of named string fields plus an optional binary
//! signature. The signature lives in its own slot and is never reachable
//! through the field accessors, so it can only be produced by
//! [`License::sign`](crate::License::sign) or by loading a signed document.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{LicenseError, LicenseResult};

/// Name of the reserved entry that carries the signature in a license file.
pub const SIGNATURE_KEY: &str = "Signature";

/// An Aquatic Prime license.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct License {
    /// Plain string fields. Never contains [`SIGNATURE_KEY`].
    fields: BTreeMap<String, String>,
    /// Raw RSA signature over the canonical hash, once signed or loaded.
    signature: Option<Vec<u8>>,
}

impl License {
    /// Creates an empty, unsigned license.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a license from already validated parts.
    pub(crate) fn from_parts(fields: BTreeMap<String, String>, signature: Option<Vec<u8>>) -> Self {
        debug_assert!(!fields.contains_key(SIGNATURE_KEY));
        Self { fields, signature }
    }

    /// Returns the value of a field.
    ///
    /// Returns `None` for unset fields and always for [`SIGNATURE_KEY`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == SIGNATURE_KEY {
            return None;
        }
        self.fields.get(key).map(String::as_str)
    }

    /// Sets a field, replacing any previous value.
    ///
    /// Setting [`SIGNATURE_KEY`] is ignored: the signature slot is only
    /// written by signing.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key == SIGNATURE_KEY {
            debug!("ignoring attempt to set the signature field directly");
            return;
        }
        self.fields.insert(key, value.into());
    }

    /// Removes a field. Removing a field that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::CannotModifySignature`] for [`SIGNATURE_KEY`].
    pub fn delete(&mut self, key: &str) -> LicenseResult<()> {
        if key == SIGNATURE_KEY {
            return Err(LicenseError::CannotModifySignature);
        }
        self.fields.remove(key);
        Ok(())
    }

    /// Returns the field names in canonical order.
    ///
    /// Names are compared case-insensitively, lowercasing one character at a
    /// time with its simple mapping (`Σ` is always `σ`, `İ` is `i`). Names
    /// that only differ in case keep their exact byte order. This order
    /// defines the canonical hash.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        // BTreeMap iteration is byte-ordered, and the sort below is stable,
        // so case-folded ties resolve the same way on every run.
        let mut keys: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        keys.sort_by_cached_key(|k| fold_case(k));
        keys
    }

    /// Iterates over `(name, value)` pairs in canonical order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.keys().into_iter().map(move |k| (k, self.fields[k].as_str()))
    }

    /// Returns the stored signature bytes, if any.
    #[must_use]
    pub fn signature(&self) -> Option<&[u8]> {
        self.signature.as_deref()
    }

    /// Returns true if a signature is present. It is not checked.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Number of plain fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the license has no plain fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn set_signature(&mut self, signature: Vec<u8>) {
        self.signature = Some(signature);
    }

    pub(crate) fn raw_fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

/// Lowercases each character on its own, keeping only the first character
/// of multi-character mappings. Context-dependent rules such as the Greek
/// final sigma do not apply.
fn fold_case(key: &str) -> String {
    key.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}
