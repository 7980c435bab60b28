//! Shared fixtures for license tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use aquatic_license::{KeyMaterial, KeyPair, SigningKey, VerifyingKey};

/// Modulus of the reference 1024-bit Aquatic Prime key (public exponent 3).
pub const MODULUS: &str = "0xAAD0DC5705017D4AA1CD3FA194771E97B263E68308DC09D3D9297247D175CCD05DFE410B9426D3C8019BA6B92D34F21B454D8D8AC8CAD2FB37850987C02592012D658911442C27F4D9B050CFA3F7C07FF81CFEEBE33E1E43595B2ACCC2019DC7247829017A91D40020F9D8BF67300CE744263B4F34FF42E3A7BE3CF37C4004EB";

/// Private exponent of the reference key.
pub const PRIVATE_EXPONENT: &str = "0x71E092E4AE00FE31C1337FC10DA4BF0FCC4299ACB092B137E61BA185364E888AE9542B5D0D6F37DAABBD19D0C8CDF6BCD8DE5E5C85DC8CA77A58B1052AC3B6AA5C7EA2E58BD484050184D2E241CFCB1D6AB4AC8617499056060833D8F6699B9C54E3BAA36123AFD5B4DDE6F2ADFC08F6970C3BA5C80B9A0A04CB6C6B73DD512B";

/// Prime factors of the reference modulus.
pub const PRIMES: [&str; 2] = [
    "0xDAC3B60F4B235F3402C7D4026D221DC77F2203EE80D8F767529232408D8EE5EA7B1408482167AE55139C8E4D814EB842D9C0083E846B7B4E31576346EB707B61",
    "0xC7E3DEA9A74A02B954A14079D41DF20C58EBF8343F76CE5AFDBCAAC6C2D44E722A0E88C447749DEA7E107005E0E7473287D3D998048260866F35B70B63038FCB",
];

/// A license for `User <user@email.com>` signed with the reference key.
pub const REFERENCE_LICENSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>Email</key>
	<string>user@email.com</string>
	<key>Name</key>
	<string>User</string>
	<key>Signature</key>
	<data>
	Nhe6U/8XCMm7/+2OIzrHjcOsYHNZTg4k8nTajp1dTb+pU5H1cybgQzUJYA1n3IIQAbWe
	qD7a48WFqbzC3powTk6x42b+WpH6boe+u7LW4AXo2ZqGPasVlr1/lUWVHvt5J0OI9oR7
	vmzdXHbbQD7RPXp0ezttrKBFHxNNCbJHMr0=
	</data>
</dict>
</plist>
"#;

/// Canonical hash of the reference license (`SHA1("user@email.comUser")`).
pub const REFERENCE_HASH_HEX: &str = "65ed0269725f0ec370ada92b1b5bde3c3255023d";

/// Signature the reference key produces for `John Doe <john.doe@example.com>`.
pub const JOHN_DOE_SIGNATURE_HEX: &str = "96bde2a03dd0bb23dd6cb20aa5099497f13041843d85d31513a092956886c54c6564e7906934e2f52e98b5ffa7e41b8b862e46f3282e5ab63dc5080c3d0cd9942c08166ec4ac5db82adaa18eb85d968783f653e20303fd399b8b18cce3a6874f7cd4b3ccf1311659cd07361754b777dd4ddd1ff4b921e39971cc84ae61eb7a3d";

/// Canonical hash of `John Doe <john.doe@example.com>`.
pub const JOHN_DOE_HASH_HEX: &str = "d4389160017087f5a179af9a6972d911d7f843be";

/// Full key material of the reference key.
pub fn reference_material() -> KeyMaterial {
    KeyMaterial {
        modulus: MODULUS.to_string(),
        public_exponent: "3".to_string(),
        private_exponent: Some(PRIVATE_EXPONENT.to_string()),
        primes: PRIMES.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn reference_verifying_key() -> VerifyingKey {
    VerifyingKey::from_modulus_hex(MODULUS).unwrap()
}

pub fn reference_signing_key() -> SigningKey {
    reference_material().signing_key().unwrap()
}

/// A freshly generated key pair with the default exponent, shared per test binary.
pub fn generated_keypair() -> &'static KeyPair {
    static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| KeyPair::generate(1024).unwrap())
}

/// Wraps a `<dict>` body in a complete XML property list.
pub fn plist_doc(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
{body}
</plist>
"#
    )
}
