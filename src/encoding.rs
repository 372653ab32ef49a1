//! Structural classification of DER encoded RSA keys.
//!
//! Keys are recognized positively: the input must decode completely as one
//! of the supported structures. Nothing is inferred from the failure of
//! another parse, so a private key never classifies as a public key just
//! because it is well-formed DER.
//!
//! The backend imports the bare PKCS#1 structures. [`normalize`] strips the
//! SPKI and PKCS#8 wrappers, [`wrap_spki`] and [`wrap_pkcs8`] put them back.

use alloc::vec::Vec;
use core::fmt;
use pkcs8::{
    der::{asn1::BitStringRef, Encode},
    ObjectIdentifier,
};
use zeroize::Zeroizing;

use crate::errors::{Error, FormatError, Result};
use crate::pem;

/// ObjectID for the RSA PSS keys
pub const ID_RSASSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");

/// Which half of a key pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum KeyKind {
    /// RSA public key.
    Public,
    /// RSA private key.
    Private,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyKind::Public => "public",
            KeyKind::Private => "private",
        })
    }
}

/// DER structures recognized as RSA keys.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum KeyFormat {
    /// X.509 `SubjectPublicKeyInfo` wrapping an `RSAPublicKey`.
    SubjectPublicKeyInfo,
    /// Bare PKCS#1 `RSAPublicKey`.
    Pkcs1Public,
    /// PKCS#8 `PrivateKeyInfo` wrapping an `RSAPrivateKey`.
    Pkcs8Private,
    /// Bare PKCS#1 `RSAPrivateKey`.
    Pkcs1Private,
}

impl KeyFormat {
    /// Kind of key held by this structure.
    pub fn kind(self) -> KeyKind {
        match self {
            KeyFormat::SubjectPublicKeyInfo | KeyFormat::Pkcs1Public => KeyKind::Public,
            KeyFormat::Pkcs8Private | KeyFormat::Pkcs1Private => KeyKind::Private,
        }
    }

    /// PEM type label conventionally used for this structure.
    pub fn pem_label(self) -> &'static str {
        match self {
            KeyFormat::SubjectPublicKeyInfo => pem::PUBLIC_KEY_LABEL,
            KeyFormat::Pkcs1Public => pem::RSA_PUBLIC_KEY_LABEL,
            KeyFormat::Pkcs8Private => pem::PRIVATE_KEY_LABEL,
            KeyFormat::Pkcs1Private => pem::RSA_PRIVATE_KEY_LABEL,
        }
    }
}

/// Verify that the `AlgorithmIdentifier` for a key is correct.
pub(crate) fn verify_algorithm_id(
    algorithm: &spki::AlgorithmIdentifierRef<'_>,
) -> spki::Result<()> {
    match algorithm.oid {
        pkcs1::ALGORITHM_OID => {
            if algorithm.parameters_any()? != pkcs8::der::asn1::Null.into() {
                return Err(spki::Error::KeyMalformed);
            }
        }
        ID_RSASSA_PSS => {
            if algorithm.parameters.is_some() {
                return Err(spki::Error::KeyMalformed);
            }
        }
        _ => return Err(spki::Error::OidUnknown { oid: algorithm.oid }),
    };

    Ok(())
}

/// Inner `RSAPublicKey` of an RSA `SubjectPublicKeyInfo`.
fn spki_body(der: &[u8]) -> Option<&[u8]> {
    let info = spki::SubjectPublicKeyInfoRef::try_from(der).ok()?;
    verify_algorithm_id(&info.algorithm).ok()?;
    let body = info.subject_public_key.as_bytes()?;
    pkcs1::RsaPublicKey::try_from(body).ok()?;
    Some(body)
}

/// Inner `RSAPrivateKey` of an RSA `PrivateKeyInfo`.
fn pkcs8_body(der: &[u8]) -> Option<&[u8]> {
    let info = pkcs8::PrivateKeyInfo::try_from(der).ok()?;
    verify_algorithm_id(&info.algorithm).ok()?;
    pkcs1::RsaPrivateKey::try_from(info.private_key).ok()?;
    Some(info.private_key)
}

/// Classify DER bytes as one of the RSA key structures.
///
/// Returns `None` when the bytes are not exactly one complete RSA key
/// structure, including when trailing data follows an otherwise valid key.
pub fn classify(der: &[u8]) -> Option<KeyFormat> {
    if spki_body(der).is_some() {
        Some(KeyFormat::SubjectPublicKeyInfo)
    } else if pkcs1::RsaPublicKey::try_from(der).is_ok() {
        Some(KeyFormat::Pkcs1Public)
    } else if pkcs8_body(der).is_some() {
        Some(KeyFormat::Pkcs8Private)
    } else if pkcs1::RsaPrivateKey::try_from(der).is_ok() {
        Some(KeyFormat::Pkcs1Private)
    } else {
        None
    }
}

/// Reduce a key to the bare PKCS#1 structure the backend imports.
///
/// Fails with [`FormatError::Unrecognized`] for anything [`classify`] does
/// not recognize and with [`FormatError::KindMismatch`] when the structure
/// holds the other kind of key.
pub fn normalize(der: &[u8], kind: KeyKind) -> Result<&[u8]> {
    let format = classify(der).ok_or(FormatError::Unrecognized)?;
    if format.kind() != kind {
        return Err(FormatError::KindMismatch {
            expected: kind,
            found: format.kind(),
        }
        .into());
    }

    let body = match format {
        KeyFormat::SubjectPublicKeyInfo => spki_body(der),
        KeyFormat::Pkcs8Private => pkcs8_body(der),
        KeyFormat::Pkcs1Public | KeyFormat::Pkcs1Private => Some(der),
    };

    body.ok_or_else(|| Error::Format(FormatError::Unrecognized))
}

/// Wrap a PKCS#1 `RSAPublicKey` in an RSA `SubjectPublicKeyInfo`.
pub fn wrap_spki(pkcs1_der: &[u8]) -> Result<Vec<u8>> {
    pkcs1::RsaPublicKey::try_from(pkcs1_der).map_err(|_| FormatError::Unrecognized)?;

    let info = spki::SubjectPublicKeyInfoRef {
        algorithm: pkcs1::ALGORITHM_ID,
        subject_public_key: BitStringRef::new(0, pkcs1_der)?,
    };
    Ok(info.to_der()?)
}

/// Wrap a PKCS#1 `RSAPrivateKey` in a PKCS#8 `PrivateKeyInfo`.
pub fn wrap_pkcs8(pkcs1_der: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    pkcs1::RsaPrivateKey::try_from(pkcs1_der).map_err(|_| FormatError::Unrecognized)?;

    let info = pkcs8::PrivateKeyInfo::new(pkcs1::ALGORITHM_ID, pkcs1_der);
    Ok(Zeroizing::new(info.to_der()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const SPKI: &[u8] = include_bytes!("../tests/examples/pkcs8/rsa2048-pub.der");
    const PKCS8: &[u8] = include_bytes!("../tests/examples/pkcs8/rsa2048-priv.der");
    const PKCS1_PRIV: &[u8] = include_bytes!("../tests/examples/pkcs1/rsa2048-priv.der");

    #[test]
    fn classify_each_structure() {
        assert_eq!(classify(SPKI), Some(KeyFormat::SubjectPublicKeyInfo));
        assert_eq!(classify(PKCS8), Some(KeyFormat::Pkcs8Private));
        assert_eq!(classify(PKCS1_PRIV), Some(KeyFormat::Pkcs1Private));

        let pkcs1_pub = normalize(SPKI, KeyKind::Public).unwrap();
        assert_eq!(classify(pkcs1_pub), Some(KeyFormat::Pkcs1Public));
    }

    #[test]
    fn classify_rejects_garbage() {
        assert_eq!(classify(&[]), None);
        assert_eq!(classify(b"not a key"), None);
        // SEQUENCE { INTEGER 1 }
        assert_eq!(classify(&hex!("3003020101")), None);
    }

    #[test]
    fn classify_rejects_trailing_data() {
        let mut der = SPKI.to_vec();
        der.push(0);
        assert_eq!(classify(&der), None);
    }

    #[test]
    fn private_key_is_never_public() {
        assert_eq!(classify(PKCS1_PRIV).map(KeyFormat::kind), Some(KeyKind::Private));
        assert_eq!(
            normalize(PKCS1_PRIV, KeyKind::Public),
            Err(Error::Format(FormatError::KindMismatch {
                expected: KeyKind::Public,
                found: KeyKind::Private,
            }))
        );
    }

    #[test]
    fn pkcs8_unwraps_to_pkcs1() {
        assert_eq!(normalize(PKCS8, KeyKind::Private).unwrap(), PKCS1_PRIV);
    }

    #[test]
    fn wrappers_invert_normalize() {
        let pkcs1_pub = normalize(SPKI, KeyKind::Public).unwrap();
        assert_eq!(wrap_spki(pkcs1_pub).unwrap(), SPKI);
        assert_eq!(wrap_pkcs8(PKCS1_PRIV).unwrap().as_slice(), PKCS8);
    }

    #[test]
    fn wrap_rejects_wrong_structure() {
        assert_eq!(
            wrap_spki(PKCS1_PRIV),
            Err(Error::Format(FormatError::Unrecognized))
        );
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        // sha1WithRSAEncryption in place of rsaEncryption
        let mut der = SPKI.to_vec();
        let oid = hex!("06092a864886f70d010101");
        let at = der.windows(oid.len()).position(|w| w == oid).unwrap();
        der[at + 10] = 0x05;
        assert_eq!(classify(&der), None);
    }
}
