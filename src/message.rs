//! Payloads of the message pipeline: clear text, ciphertext and signatures.

use alloc::{boxed::Box, string::String, vec::Vec};
use core::fmt::{self, Debug, Display, Formatter, LowerHex, UpperHex};

use crate::dispatch::Dispatcher;
use crate::errors::Result;
use crate::hash::DigestType;
use crate::key::{PrivateKey, PublicKey};
use crate::padding::Padding;
use crate::traits::{Backend, Message};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Implement [`Message`] and the byte conversions for a payload type.
macro_rules! message_impl {
    ($message:ident, $label:literal) => {
        impl Message for $message {
            const PEM_LABEL: &'static str = $label;

            fn from_data(data: Vec<u8>) -> Self {
                $message { data }
            }

            fn data(&self) -> &[u8] {
                &self.data
            }
        }

        impl From<Vec<u8>> for $message {
            fn from(data: Vec<u8>) -> Self {
                $message { data }
            }
        }

        impl From<&[u8]> for $message {
            fn from(data: &[u8]) -> Self {
                $message {
                    data: data.to_vec(),
                }
            }
        }

        impl From<$message> for Vec<u8> {
            fn from(message: $message) -> Vec<u8> {
                message.data
            }
        }

        impl AsRef<[u8]> for $message {
            fn as_ref(&self) -> &[u8] {
                &self.data
            }
        }

        #[cfg(feature = "serde")]
        impl Serialize for $message {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serdect::slice::serialize_hex_lower_or_bin(&self.data, serializer)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> Deserialize<'de> for $message {
            fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                serdect::slice::deserialize_hex_or_bin_vec(deserializer).map(Self::from_data)
            }
        }
    };
}

/// Unencrypted payload.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ClearMessage {
    data: Vec<u8>,
}

message_impl!(ClearMessage, "MESSAGE");

impl ClearMessage {
    /// UTF-8 encoding of `text`.
    pub fn from_string(text: &str) -> Self {
        ClearMessage {
            data: text.as_bytes().to_vec(),
        }
    }

    /// Payload decoded as UTF-8.
    pub fn to_utf8_string(&self) -> Result<String> {
        Ok(core::str::from_utf8(&self.data)?.into())
    }

    /// Encrypt to `key`.
    pub fn encrypted<B: Backend>(
        &self,
        key: &PublicKey<B>,
        padding: Padding,
    ) -> Result<EncryptedMessage> {
        Dispatcher::<B>::new().encrypt(self, key, padding)
    }

    /// PKCS#1 v1.5 signature with `key`.
    pub fn signed<B: Backend>(&self, key: &PrivateKey<B>, digest: DigestType) -> Result<Signature> {
        Dispatcher::<B>::new().sign(self, key, digest)
    }

    /// Check a PKCS#1 v1.5 `signature` with `key`.
    pub fn verify<B: Backend>(
        &self,
        key: &PublicKey<B>,
        signature: &Signature,
        digest: DigestType,
    ) -> Result<VerificationResult> {
        Dispatcher::<B>::new().verify(self, key, signature, digest)
    }
}

impl From<&str> for ClearMessage {
    fn from(text: &str) -> Self {
        ClearMessage::from_string(text)
    }
}

/// Ciphertext produced by encrypting a [`ClearMessage`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct EncryptedMessage {
    data: Vec<u8>,
}

message_impl!(EncryptedMessage, "ENCRYPTED MESSAGE");

impl EncryptedMessage {
    /// Decrypt with `key`.
    pub fn decrypted<B: Backend>(
        &self,
        key: &PrivateKey<B>,
        padding: Padding,
    ) -> Result<ClearMessage> {
        Dispatcher::<B>::new().decrypt(self, key, padding)
    }
}

/// RSA signature over a [`ClearMessage`].
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct Signature {
    data: Vec<u8>,
}

message_impl!(Signature, "SIGNATURE");

impl signature::SignatureEncoding for Signature {
    type Repr = Box<[u8]>;
}

impl From<Signature> for Box<[u8]> {
    fn from(signature: Signature) -> Box<[u8]> {
        signature.data.into_boxed_slice()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:X})", self)
    }
}

impl LowerHex for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.data.iter().try_for_each(|byte| write!(f, "{:02x}", byte))
    }
}

impl UpperHex for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.data.iter().try_for_each(|byte| write!(f, "{:02X}", byte))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self)
    }
}

/// Outcome of a signature verification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct VerificationResult {
    /// Whether the signature matches the message and key.
    pub is_successful: bool,
}

impl From<bool> for VerificationResult {
    fn from(is_successful: bool) -> Self {
        VerificationResult { is_successful }
    }
}
