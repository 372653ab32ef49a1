//! Supported padding schemes.

use core::fmt;

use crate::hash::DigestType;

/// Padding used for encryption and decryption.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Padding {
    /// `RSAES-PKCS1-v1_5`.
    #[default]
    Pkcs1v15,

    /// `RSAES-OAEP` with the given digest for both the label hash and MGF1.
    Oaep(DigestType),
}

impl Padding {
    /// OAEP with SHA-1, the parameters most platforms mean by plain "OAEP".
    pub const OAEP_SHA1: Padding = Padding::Oaep(DigestType::Sha1);

    /// Longest message that fits in one block for a modulus of `key_size`
    /// bytes, or `None` if the key is too small for this padding.
    pub fn max_message_len(self, key_size: usize) -> Option<usize> {
        match self {
            Padding::Pkcs1v15 => key_size.checked_sub(11),
            Padding::Oaep(digest) => key_size.checked_sub(2 * digest.output_size() + 2),
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Padding::Pkcs1v15 => f.write_str("PKCS#1 v1.5"),
            Padding::Oaep(digest) => write!(f, "OAEP({})", digest),
        }
    }
}

/// Digital signature scheme.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum SignatureScheme {
    /// `RSASSA-PKCS1-v1_5`, deterministic.
    #[default]
    Pkcs1v15,

    /// `RSASSA-PSS` with a salt as long as the digest.
    Pss,
}
