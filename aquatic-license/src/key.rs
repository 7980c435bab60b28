//! RSA key material for issuing and verifying licenses.
//!
//! Aquatic Prime keys are plain RSA keys. Reference tooling hands them out as
//! hexadecimal strings (modulus and private exponent, often `0x`-prefixed)
//! with a public exponent of 3. Nothing here depends on that exponent.

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::error::{LicenseError, LicenseResult};

/// Public exponent used by Aquatic Prime keys.
pub const AQUATIC_PRIME_EXPONENT: u32 = 3;

/// RSA public key used to verify licenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyingKey(RsaPublicKey);

/// RSA private key used to sign licenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey(RsaPrivateKey);

/// A freshly generated signing/verifying key pair.
pub struct KeyPair {
    pub signing_key: SigningKey,
    pub verifying_key: VerifyingKey,
}

impl KeyPair {
    /// Generates a new random key pair with a modulus of `bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] if the size is unusable.
    pub fn generate(bits: usize) -> LicenseResult<Self> {
        let private = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|e| LicenseError::InvalidKey(format!("key generation failed: {e}")))?;
        let signing_key = SigningKey::from(private);
        let verifying_key = signing_key.verifying_key();
        Ok(Self {
            signing_key,
            verifying_key,
        })
    }
}

impl VerifyingKey {
    /// Creates a verifying key from a big-endian modulus and exponent.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] if the RSA parameters are rejected.
    pub fn new(modulus: &[u8], exponent: &[u8]) -> LicenseResult<Self> {
        let n = BigUint::from_bytes_be(modulus);
        let e = BigUint::from_bytes_be(exponent);
        RsaPublicKey::new(n, e)
            .map(Self)
            .map_err(|e| LicenseError::InvalidKey(e.to_string()))
    }

    /// Creates a verifying key from a hex modulus and hex exponent.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] on malformed hex or rejected parameters.
    pub fn from_hex(modulus: &str, exponent: &str) -> LicenseResult<Self> {
        Self::new(&decode_hex(modulus)?, &decode_hex(exponent)?)
    }

    /// Creates a verifying key from a hex modulus with the Aquatic Prime exponent.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] on malformed hex or rejected parameters.
    pub fn from_modulus_hex(modulus: &str) -> LicenseResult<Self> {
        Self::new(&decode_hex(modulus)?, &AQUATIC_PRIME_EXPONENT.to_be_bytes())
    }

    /// Returns the big-endian modulus.
    #[must_use]
    pub fn modulus_bytes(&self) -> Vec<u8> {
        self.0.n().to_bytes_be()
    }

    /// Returns the big-endian public exponent.
    #[must_use]
    pub fn exponent_bytes(&self) -> Vec<u8> {
        self.0.e().to_bytes_be()
    }

    /// Modulus size in bytes, which is also the signature length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }
}

impl From<RsaPublicKey> for VerifyingKey {
    fn from(key: RsaPublicKey) -> Self {
        Self(key)
    }
}

impl SigningKey {
    /// Creates a signing key from big-endian RSA components.
    ///
    /// `primes` may be empty. Aquatic Prime keys are usually distributed as
    /// modulus and private exponent only; the two primes are then recovered
    /// from `(n, e, d)`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] if the components are inconsistent.
    pub fn from_components(
        modulus: &[u8],
        exponent: &[u8],
        private_exponent: &[u8],
        primes: &[&[u8]],
    ) -> LicenseResult<Self> {
        let n = BigUint::from_bytes_be(modulus);
        let e = BigUint::from_bytes_be(exponent);
        let d = BigUint::from_bytes_be(private_exponent);
        let primes = if primes.is_empty() {
            let (p, q) = recover_primes(&n, &e, &d)?;
            vec![p, q]
        } else {
            primes.iter().map(|p| BigUint::from_bytes_be(p)).collect()
        };
        RsaPrivateKey::from_components(n, e, d, primes)
            .map(Self)
            .map_err(|e| LicenseError::InvalidKey(e.to_string()))
    }

    /// Creates a signing key from hex components.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] on malformed hex or inconsistent components.
    pub fn from_hex(
        modulus: &str,
        exponent: &str,
        private_exponent: &str,
        primes: &[&str],
    ) -> LicenseResult<Self> {
        let primes = primes
            .iter()
            .map(|p| decode_hex(p))
            .collect::<LicenseResult<Vec<_>>>()?;
        let prime_refs: Vec<&[u8]> = primes.iter().map(Vec::as_slice).collect();
        Self::from_components(
            &decode_hex(modulus)?,
            &decode_hex(exponent)?,
            &decode_hex(private_exponent)?,
            &prime_refs,
        )
    }

    /// Returns the matching verifying key.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey::from(self.0.to_public_key())
    }

    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl From<RsaPrivateKey> for SigningKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self(key)
    }
}

/// Key configuration as hexadecimal strings.
///
/// ```json
/// {
///   "modulus": "0xAAD0DC57...",
///   "private_exponent": "0x71E092E4...",
///   "primes": ["0xDAC3B60F...", "0xC7E3DEA9..."]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMaterial {
    /// RSA modulus.
    pub modulus: String,
    /// Public exponent, 3 unless stated otherwise.
    #[serde(default = "default_exponent")]
    pub public_exponent: String,
    /// Private exponent, only needed for issuing licenses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_exponent: Option<String>,
    /// Prime factors of the modulus.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primes: Vec<String>,
}

fn default_exponent() -> String {
    format!("{AQUATIC_PRIME_EXPONENT:x}")
}

impl KeyMaterial {
    /// Public-only key material with the Aquatic Prime exponent.
    #[must_use]
    pub fn public(modulus: impl Into<String>) -> Self {
        Self {
            modulus: modulus.into(),
            public_exponent: default_exponent(),
            private_exponent: None,
            primes: Vec::new(),
        }
    }

    /// Parses key material from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Serialization`] if the JSON is malformed.
    pub fn from_json(json: &str) -> LicenseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the key material to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> LicenseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the verifying key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] if the parameters are malformed.
    pub fn verifying_key(&self) -> LicenseResult<VerifyingKey> {
        VerifyingKey::from_hex(&self.modulus, &self.public_exponent)
    }

    /// Builds the signing key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKey`] if there is no private exponent
    /// or the components are inconsistent.
    pub fn signing_key(&self) -> LicenseResult<SigningKey> {
        let private_exponent = self
            .private_exponent
            .as_deref()
            .ok_or_else(|| LicenseError::InvalidKey("private exponent is missing".to_string()))?;
        let primes: Vec<&str> = self.primes.iter().map(String::as_str).collect();
        SigningKey::from_hex(
            &self.modulus,
            &self.public_exponent,
            private_exponent,
            &primes,
        )
    }
}

/// Factors `n` given both exponents.
///
/// `e * d - 1` is a multiple of the group order, so for a random base `g`
/// the sequence `g^t, g^2t, ...` (with `e * d - 1 = 2^s * t`, `t` odd)
/// usually hits a square root of 1 other than `±1`; `gcd(x - 1, n)` is then
/// a prime factor. Bases are tried in order, which keeps the result
/// deterministic.
fn recover_primes(n: &BigUint, e: &BigUint, d: &BigUint) -> LicenseResult<(BigUint, BigUint)> {
    let zero = BigUint::from(0u64);
    let one = BigUint::from(1u64);
    let two = BigUint::from(2u64);

    let ed = e * d;
    if n <= &two || ed <= one {
        return Err(LicenseError::InvalidKey(
            "cannot recover primes from these components".to_string(),
        ));
    }
    let n_minus_one = n - &one;

    let mut t = &ed - &one;
    let mut s = 0u32;
    while &t % &two == zero {
        t = &t / &two;
        s += 1;
    }

    for g in 2u64..1000 {
        let mut x = BigUint::from(g).modpow(&t, n);
        for _ in 0..s {
            let y = x.modpow(&two, n);
            if y == one && x != one && x != n_minus_one {
                let p = gcd(&x - &one, n.clone());
                let q = n / &p;
                if &p * &q == *n && p > one && q > one {
                    return Ok((p, q));
                }
            }
            x = y;
        }
    }

    Err(LicenseError::InvalidKey(
        "private exponent does not match the modulus".to_string(),
    ))
}

fn gcd(mut a: BigUint, mut b: BigUint) -> BigUint {
    let zero = BigUint::from(0u64);
    while b != zero {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Decodes a big-endian hex number, accepting an optional `0x` prefix and
/// an odd number of digits.
fn decode_hex(s: &str) -> LicenseResult<Vec<u8>> {
    let digits = s.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    if digits.is_empty() {
        return Err(LicenseError::InvalidKey("empty hex number".to_string()));
    }
    let padded;
    let digits = if digits.len() % 2 == 1 {
        padded = format!("0{digits}");
        padded.as_str()
    } else {
        digits
    };
    hex::decode(digits).map_err(|e| LicenseError::InvalidKey(format!("invalid hex: {e}")))
}
