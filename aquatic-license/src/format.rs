//! Reading and writing license files.
//!
//! A license file is a property list whose root is a dictionary. Every
//! entry is a string, except `Signature`, which holds binary data:
//!
//! ```xml
//! <dict>
//!     <key>Email</key>
//!     <string>user@email.com</string>
//!     <key>Name</key>
//!     <string>User</string>
//!     <key>Signature</key>
//!     <data>Nhe6U/8XCMm7...</data>
//! </dict>
//! ```
//!
//! Entry order in the file is irrelevant. Documents without a `Signature`
//! entry load as unsigned licenses.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use std::str::FromStr;

use plist::{Dictionary, Value};
use tracing::{debug, warn};

use crate::error::{LicenseError, LicenseResult};
use crate::license::{License, SIGNATURE_KEY};

/// Validates a decoded property list and builds a license from it.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidFormat`] if the root is not a dictionary,
/// `Signature` is not binary data, or any other entry is not a string.
pub fn license_from_value(value: Value) -> LicenseResult<License> {
    let Value::Dictionary(dict) = value else {
        return Err(LicenseError::InvalidFormat(
            "root is not a dictionary".to_string(),
        ));
    };

    let mut fields = BTreeMap::new();
    let mut signature = None;
    for (key, value) in dict {
        if key == SIGNATURE_KEY {
            let Value::Data(bytes) = value else {
                warn!("license signature entry is not binary data");
                return Err(LicenseError::InvalidFormat(
                    "Signature is not binary data".to_string(),
                ));
            };
            signature = Some(bytes);
            continue;
        }
        match value {
            Value::String(s) => {
                fields.insert(key, s);
            }
            _ => {
                warn!(field = %key, "license field is not a string");
                return Err(LicenseError::InvalidFormat(format!(
                    "field `{key}` is not a string"
                )));
            }
        }
    }

    debug!(
        fields = fields.len(),
        signed = signature.is_some(),
        "license loaded"
    );
    Ok(License::from_parts(fields, signature))
}

/// Converts a license into its property-list dictionary.
#[must_use]
pub fn license_to_value(license: &License) -> Value {
    let mut dict = Dictionary::new();
    for (key, value) in license.raw_fields() {
        dict.insert(key.clone(), Value::String(value.clone()));
    }
    if let Some(signature) = license.signature() {
        dict.insert(SIGNATURE_KEY.to_string(), Value::Data(signature.to_vec()));
    }
    Value::Dictionary(dict)
}

impl License {
    /// Reads a license from a property-list stream (XML or binary).
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Plist`] if the stream is not a property list
    /// and [`LicenseError::InvalidFormat`] if it is not shaped like a license.
    pub fn read_from<R: Read + Seek>(reader: R) -> LicenseResult<Self> {
        license_from_value(Value::from_reader(reader)?)
    }

    /// Reads a license from property-list bytes.
    ///
    /// # Errors
    ///
    /// See [`License::read_from`].
    pub fn from_bytes(bytes: &[u8]) -> LicenseResult<Self> {
        Self::read_from(Cursor::new(bytes))
    }

    /// Reads a license file.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Io`] if the file cannot be opened, otherwise
    /// see [`License::read_from`].
    pub fn load(path: impl AsRef<Path>) -> LicenseResult<Self> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Writes the license as an XML property list.
    ///
    /// The license is written as is; call [`License::sign`] first if the
    /// output must carry a valid signature.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Plist`] if writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> LicenseResult<()> {
        license_to_value(self).to_writer_xml(writer)?;
        Ok(())
    }

    /// Serializes the license as an XML property list.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Plist`] if serialization fails.
    pub fn to_bytes(&self) -> LicenseResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Writes the license to a file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Io`] or [`LicenseError::Plist`] on failure.
    pub fn save(&self, path: impl AsRef<Path>) -> LicenseResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl FromStr for License {
    type Err = LicenseError;

    fn from_str(s: &str) -> LicenseResult<Self> {
        Self::from_bytes(s.as_bytes())
    }
}
