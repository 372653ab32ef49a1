//! Digest algorithms accepted by the signature operations.

use alloc::vec::Vec;
use const_oid::{AssociatedOid, ObjectIdentifier};
use core::{fmt, str::FromStr};
use digest::Digest;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

/// Digest applied to a message before signing or verification.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DigestType {
    /// SHA-1
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    #[default]
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl DigestType {
    /// All supported digests.
    pub const ALL: [DigestType; 5] = [
        DigestType::Sha1,
        DigestType::Sha224,
        DigestType::Sha256,
        DigestType::Sha384,
        DigestType::Sha512,
    ];

    /// Returns the length in bytes of a digest.
    pub fn output_size(self) -> usize {
        match self {
            DigestType::Sha1 => <Sha1 as Digest>::output_size(),
            DigestType::Sha224 => <Sha224 as Digest>::output_size(),
            DigestType::Sha256 => <Sha256 as Digest>::output_size(),
            DigestType::Sha384 => <Sha384 as Digest>::output_size(),
            DigestType::Sha512 => <Sha512 as Digest>::output_size(),
        }
    }

    /// Object identifier of the hash function.
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            DigestType::Sha1 => Sha1::OID,
            DigestType::Sha224 => Sha224::OID,
            DigestType::Sha256 => Sha256::OID,
            DigestType::Sha384 => Sha384::OID,
            DigestType::Sha512 => Sha512::OID,
        }
    }

    /// Hash `msg` in one shot.
    pub fn digest(self, msg: &[u8]) -> Vec<u8> {
        match self {
            DigestType::Sha1 => Sha1::digest(msg).to_vec(),
            DigestType::Sha224 => Sha224::digest(msg).to_vec(),
            DigestType::Sha256 => Sha256::digest(msg).to_vec(),
            DigestType::Sha384 => Sha384::digest(msg).to_vec(),
            DigestType::Sha512 => Sha512::digest(msg).to_vec(),
        }
    }

    /// Lowercase name, e.g. `sha256`.
    pub fn name(self) -> &'static str {
        match self {
            DigestType::Sha1 => "sha1",
            DigestType::Sha224 => "sha224",
            DigestType::Sha256 => "sha256",
            DigestType::Sha384 => "sha384",
            DigestType::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for DigestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown digest name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnknownDigest;

impl fmt::Display for UnknownDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown digest algorithm")
    }
}

impl FromStr for DigestType {
    type Err = UnknownDigest;

    /// Accepts `sha256`, `SHA-256` and similar spellings.
    fn from_str(s: &str) -> Result<Self, UnknownDigest> {
        let mut name = [0u8; 8];
        let mut len = 0;
        for b in s.bytes().filter(|b| *b != b'-' && *b != b'_') {
            *name.get_mut(len).ok_or(UnknownDigest)? = b.to_ascii_lowercase();
            len += 1;
        }

        DigestType::ALL
            .into_iter()
            .find(|digest| digest.name().as_bytes() == &name[..len])
            .ok_or(UnknownDigest)
    }
}
