//! RSA public and private keys held by a [`Backend`].
//!
//! A key is constructed from DER, PEM or base64 material, from an existing
//! backend reference, or from a named resource. Keys built from bytes keep
//! the bytes they were built from, so re-encoding returns exactly what was
//! supplied. Keys built from a reference export through the backend instead.

use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};
use pkcs8::der::Encode;
use zeroize::Zeroizing;

use crate::encoding::{self, KeyKind};
use crate::errors::{Error, FormatError, Result};
use crate::pem;
use crate::resource::ResourceLocator;
use crate::soft::Soft;
use crate::traits::Backend;

/// State shared by both key kinds.
struct KeyCore<B: Backend> {
    reference: B::KeyRef,
    original: Option<Zeroizing<Vec<u8>>>,
}

impl<B: Backend> KeyCore<B> {
    fn from_der(der: &[u8], kind: KeyKind) -> Result<Self> {
        let pkcs1 = encoding::normalize(der, kind)?;
        let reference = B::import_key(pkcs1, kind).map_err(|err| {
            tracing::debug!(kind = ?kind, error = %err, "backend rejected key");
            FormatError::Rejected
        })?;
        tracing::debug!(kind = ?kind, len = der.len(), "imported key");

        Ok(KeyCore {
            reference,
            original: Some(Zeroizing::new(der.to_vec())),
        })
    }

    fn from_pem(input: &str, kind: KeyKind) -> Result<Self> {
        let (_, der) = pem::strip_envelope(input)?;
        Self::from_der(&Zeroizing::new(der), kind)
    }

    fn from_base64(input: &str, kind: KeyKind) -> Result<Self> {
        let der = Zeroizing::new(pem::decode_base64(input)?);
        Self::from_der(&der, kind)
    }

    fn from_reference(reference: B::KeyRef, kind: KeyKind) -> Result<Self> {
        match B::key_kind(&reference) {
            Some(found) if found != kind => {
                tracing::debug!(expected = ?kind, found = ?found, "rejected key reference");
                Err(Error::KeyMismatch {
                    expected: kind,
                    found,
                })
            }
            _ => Ok(KeyCore {
                reference,
                original: None,
            }),
        }
    }

    fn from_pem_named(name: &str, locator: &impl ResourceLocator, kind: KeyKind) -> Result<Self> {
        let bytes = Zeroizing::new(locator.locate(name, "pem")?.ok_or(Error::ResourceNotFound)?);
        Self::from_pem(core::str::from_utf8(&bytes)?, kind)
    }

    fn from_der_named(name: &str, locator: &impl ResourceLocator, kind: KeyKind) -> Result<Self> {
        let bytes = Zeroizing::new(locator.locate(name, "der")?.ok_or(Error::ResourceNotFound)?);
        Self::from_der(&bytes, kind)
    }

    fn from_named_resource(
        name: &str,
        locator: &impl ResourceLocator,
        kind: KeyKind,
    ) -> Result<Self> {
        match Self::from_pem_named(name, locator, kind) {
            Err(Error::ResourceNotFound) => Self::from_der_named(name, locator, kind),
            result => result,
        }
    }

    fn data(&self) -> Result<Zeroizing<Vec<u8>>> {
        match &self.original {
            Some(original) => Ok(original.clone()),
            None => B::export_key(&self.reference),
        }
    }

    fn pem_string(&self, kind: KeyKind) -> Result<Zeroizing<String>> {
        let data = self.data()?;
        let label = match encoding::classify(&data) {
            Some(format) => format.pem_label(),
            None => match kind {
                KeyKind::Public => pem::PUBLIC_KEY_LABEL,
                KeyKind::Private => pem::PRIVATE_KEY_LABEL,
            },
        };
        Ok(Zeroizing::new(pem::encode(label, &data)?))
    }

    fn base64_string(&self) -> Result<Zeroizing<String>> {
        Ok(Zeroizing::new(pem::encode_base64(&self.data()?)))
    }
}

impl<B: Backend> Clone for KeyCore<B> {
    fn clone(&self) -> Self {
        KeyCore {
            reference: self.reference.clone(),
            original: self.original.clone(),
        }
    }
}

/// RSA public key.
pub struct PublicKey<B: Backend = Soft> {
    core: KeyCore<B>,
}

/// RSA private key.
///
/// The material the key was built from is zeroized on drop.
pub struct PrivateKey<B: Backend = Soft> {
    core: KeyCore<B>,
}

/// Constructors and accessors shared by [`PublicKey`] and [`PrivateKey`].
macro_rules! key_impl {
    ($key:ident, $kind:expr, $name:literal) => {
        impl<B: Backend> $key<B> {
            #[doc = concat!("Build a ", $name, " key from DER bytes.")]
            ///
            /// Both the bare PKCS#1 structure and its standard wrapper are
            /// accepted. The bytes are kept and returned by `data()`.
            pub fn from_der(der: &[u8]) -> Result<Self> {
                KeyCore::from_der(der, $kind).map(|core| Self { core })
            }

            #[doc = concat!("Build a ", $name, " key from a PEM document.")]
            ///
            /// The label is not interpreted, and a bare base64 body without
            /// any envelope is accepted.
            pub fn from_pem(input: &str) -> Result<Self> {
                KeyCore::from_pem(input, $kind).map(|core| Self { core })
            }

            #[doc = concat!("Build a ", $name, " key from base64 encoded DER.")]
            pub fn from_base64(input: &str) -> Result<Self> {
                KeyCore::from_base64(input, $kind).map(|core| Self { core })
            }

            #[doc = concat!("Wrap an existing backend reference to a ", $name, " key.")]
            ///
            /// Fails with [`Error::KeyMismatch`] when the backend reports a key
            /// of the other kind. Backends that cannot tell are trusted.
            pub fn from_reference(reference: B::KeyRef) -> Result<Self> {
                KeyCore::from_reference(reference, $kind).map(|core| Self { core })
            }

            /// Load the resource `name`, trying `name.pem` before `name.der`.
            pub fn from_named_resource(name: &str, locator: &impl ResourceLocator) -> Result<Self> {
                KeyCore::from_named_resource(name, locator, $kind).map(|core| Self { core })
            }

            /// Load the PEM resource `name.pem`.
            pub fn from_pem_named(name: &str, locator: &impl ResourceLocator) -> Result<Self> {
                KeyCore::from_pem_named(name, locator, $kind).map(|core| Self { core })
            }

            /// Load the DER resource `name.der`.
            pub fn from_der_named(name: &str, locator: &impl ResourceLocator) -> Result<Self> {
                KeyCore::from_der_named(name, locator, $kind).map(|core| Self { core })
            }

            /// Like [`Self::from_der`], discarding the error.
            pub fn try_from_der(der: &[u8]) -> Option<Self> {
                Self::from_der(der).ok()
            }

            /// Like [`Self::from_pem`], discarding the error.
            pub fn try_from_pem(input: &str) -> Option<Self> {
                Self::from_pem(input).ok()
            }

            /// Like [`Self::from_base64`], discarding the error.
            pub fn try_from_base64(input: &str) -> Option<Self> {
                Self::from_base64(input).ok()
            }

            /// Backend reference to the key.
            pub fn reference(&self) -> &B::KeyRef {
                &self.core.reference
            }

            /// Bytes the key was built from, if it was built from bytes.
            pub fn original_data(&self) -> Option<&[u8]> {
                self.core.original.as_deref().map(Vec::as_slice)
            }

            /// Modulus size in bytes.
            pub fn size(&self) -> usize {
                B::key_size(&self.core.reference)
            }
        }

        impl<B: Backend> Clone for $key<B> {
            fn clone(&self) -> Self {
                Self {
                    core: self.core.clone(),
                }
            }
        }

        impl<B: Backend> fmt::Debug for $key<B> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($key))
                    .field("reference", &self.core.reference)
                    .field("has_original_data", &self.core.original.is_some())
                    .finish()
            }
        }

        impl<B: Backend> FromStr for $key<B> {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::from_pem(s)
            }
        }

        impl<B: Backend> TryFrom<&[u8]> for $key<B> {
            type Error = Error;

            fn try_from(der: &[u8]) -> Result<Self> {
                Self::from_der(der)
            }
        }
    };
}

key_impl!(PublicKey, KeyKind::Public, "public");
key_impl!(PrivateKey, KeyKind::Private, "private");

impl<B: Backend> PublicKey<B> {
    /// Every public key found in a PEM document, in document order.
    ///
    /// Blocks holding private keys, other objects or malformed data are
    /// skipped.
    pub fn all_keys_in(input: &str) -> Vec<Self> {
        pem::blocks(input)
            .filter_map(|block| match Self::from_der(&block.contents) {
                Ok(key) => Some(key),
                Err(err) => {
                    tracing::debug!(label = block.label, error = ?err, "skipping PEM block");
                    None
                }
            })
            .collect()
    }

    /// DER encoding of the key.
    ///
    /// This is the original material when there is some, otherwise the
    /// backend's PKCS#1 export.
    pub fn data(&self) -> Result<Vec<u8>> {
        Ok(self.core.data()?.to_vec())
    }

    /// PKCS#1 `RSAPublicKey` as exported by the backend.
    pub fn export_der(&self) -> Result<Vec<u8>> {
        Ok(B::export_key(&self.core.reference)?.to_vec())
    }

    /// PEM encoding of [`Self::data`], labelled after its structure.
    pub fn pem_string(&self) -> Result<String> {
        Ok(self.core.pem_string(KeyKind::Public)?.as_str().into())
    }

    /// Base64 encoding of [`Self::data`].
    pub fn base64_string(&self) -> Result<String> {
        Ok(self.core.base64_string()?.as_str().into())
    }
}

#[cfg(feature = "serde")]
impl<B: Backend> serdect::serde::Serialize for PublicKey<B> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serdect::serde::Serializer,
    {
        use serdect::serde::ser::Error as _;

        let der = self.data().map_err(S::Error::custom)?;
        serdect::slice::serialize_hex_lower_or_bin(&der, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, B: Backend> serdect::serde::Deserialize<'de> for PublicKey<B> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serdect::serde::Deserializer<'de>,
    {
        use serdect::serde::de::Error as _;

        let der = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::from_der(&der).map_err(D::Error::custom)
    }
}

impl<B: Backend> PrivateKey<B> {
    /// DER encoding of the key.
    ///
    /// This is the original material when there is some, otherwise the
    /// backend's PKCS#1 export.
    pub fn data(&self) -> Result<Zeroizing<Vec<u8>>> {
        self.core.data()
    }

    /// PKCS#1 `RSAPrivateKey` as exported by the backend.
    pub fn export_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        B::export_key(&self.core.reference)
    }

    /// PEM encoding of [`Self::data`], labelled after its structure.
    pub fn pem_string(&self) -> Result<Zeroizing<String>> {
        self.core.pem_string(KeyKind::Private)
    }

    /// Base64 encoding of [`Self::data`].
    pub fn base64_string(&self) -> Result<Zeroizing<String>> {
        self.core.base64_string()
    }

    /// Public half of the key pair.
    ///
    /// Requires a backend that can export the private key.
    pub fn public_key(&self) -> Result<PublicKey<B>> {
        let der = self.export_der()?;
        let private = pkcs1::RsaPrivateKey::try_from(der.as_slice())?;
        let public = private.public_key().to_der()?;
        PublicKey::from_der(&public)
    }
}

impl<B: Backend> TryFrom<&PrivateKey<B>> for PublicKey<B> {
    type Error = Error;

    fn try_from(key: &PrivateKey<B>) -> Result<Self> {
        key.public_key()
    }
}
