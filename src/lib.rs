#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! RSA key ingestion and message cryptography.
//!
//! This crate loads RSA keys from the encodings they are found in the wild,
//! converts between those encodings, and runs a small message pipeline on
//! top of them:
//!
//! - [`PublicKey`] and [`PrivateKey`] accept PEM (with or without the
//!   envelope), DER and base64, in both the PKCS#1 and the X.509 / PKCS#8
//!   structures.
//! - [`PublicKey::all_keys_in`] scans a document holding many PEM blocks
//!   and returns the public keys among them.
//! - [`Dispatcher`] signs, verifies, encrypts and decrypts [`ClearMessage`],
//!   [`EncryptedMessage`] and [`Signature`] values, subject to a
//!   [`Capabilities`] table.
//!
//! Keys are held by a [`Backend`]. The default backend, [`Soft`], is the
//! pure Rust implementation from the [`rsa`] crate.
//!
//! # Usage
//!
//! ## Loading keys
//!
//! ```
//! # fn main() -> rsa_kit::Result<()> {
//! use rsa_kit::PublicKey;
//!
//! let pem = "-----BEGIN PUBLIC KEY-----
//! MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAulFyglWpf9EEYLCrvNh2
//! FhdysHatBrb5ppg5MEncEcaBSnNZHNyXVGAcpiaCl2il0uaQbZraXhKADiela1jj
//! 1DW+ej9Gzs1QXDEHs06v7/bvd75w/SVTL56fYG8CeO3PSkBXMgSqGgwiJWswWmke
//! PZ1vQ/RuY0ijPsZv2RccaCJwfhMCtwk1gBYv7z+iR3WiAHT2s/zACQlJmaFcd+r4
//! qWdV3j2mQGzFPfOL4K0PLXFWgLQYtSuFC/SMUwxMtXhTp+paBAPlyT1wa2M7AISV
//! MPqEdoe6FFc9wA/UMCaxkcJGGzhBaMUZSyLeMsoeFsKRgVYDNHRL2/MnEE6Ur0p2
//! MwIDAQAB
//! -----END PUBLIC KEY-----";
//!
//! let public_key: PublicKey = PublicKey::from_pem(pem)?;
//! assert_eq!(public_key.size(), 256);
//!
//! // Re-encoding returns the material the key was loaded from.
//! let again: PublicKey = PublicKey::from_base64(&public_key.base64_string()?)?;
//! assert_eq!(again.data()?, public_key.data()?);
//!
//! // Scanning skips anything that is not a public key.
//! let document = format!("garbage\n{}\n-----BEGIN PUBLIC KEY-----\nAAAA\n", pem);
//! assert_eq!(PublicKey::<rsa_kit::Soft>::all_keys_in(&document).len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Message pipeline
//!
//! ```
//! # fn main() -> rsa_kit::Result<()> {
//! use rsa_kit::{ClearMessage, DigestType, Directory, Padding, PrivateKey, Signature};
//! use rsa_kit::traits::Message;
//!
//! // Loads `rsa2048-priv.pem`, falling back to `rsa2048-priv.der`.
//! let keys = Directory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/examples/pkcs8"));
//! let private_key: PrivateKey = PrivateKey::from_named_resource("rsa2048-priv", &keys)?;
//! let public_key = private_key.public_key()?;
//!
//! let message = ClearMessage::from_string("hello");
//!
//! // Sign
//! let signature = message.signed(&private_key, DigestType::Sha256)?;
//! let signature = Signature::from_base64(&signature.base64_string())?;
//!
//! // Verify
//! assert!(message.verify(&public_key, &signature, DigestType::Sha256)?.is_successful);
//!
//! // Encrypt and decrypt
//! let encrypted = message.encrypted(&public_key, Padding::OAEP_SHA1)?;
//! let decrypted = encrypted.decrypted(&private_key, Padding::OAEP_SHA1)?;
//! assert_eq!(decrypted.to_utf8_string()?, "hello");
//! # Ok(())
//! # }
//! ```
//!
//! # Crate features
//!
//! - `std` (default): the [`Directory`] resource locator and `std` support
//!   in the RustCrypto dependencies.
//! - `sign`, `verify`, `encrypt`, `decrypt` (default): the operations this
//!   host allows. A disabled operation fails with [`Error::Unsupported`].
//! - `serde`: serialization of keys and messages.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use pkcs1;
pub use pkcs8;
pub use rsa;
pub use signature;

pub mod capabilities;
pub mod dispatch;
pub mod encoding;
pub mod errors;
pub mod hash;
pub mod key;
pub mod message;
pub mod padding;
pub mod pem;
pub mod resource;
pub mod soft;
pub mod traits;

pub use crate::{
    capabilities::{Capabilities, Operation},
    dispatch::Dispatcher,
    encoding::{KeyFormat, KeyKind},
    errors::{Error, Result},
    hash::DigestType,
    key::{PrivateKey, PublicKey},
    message::{ClearMessage, EncryptedMessage, Signature, VerificationResult},
    padding::{Padding, SignatureScheme},
    resource::ResourceLocator,
    soft::Soft,
    traits::{Backend, Message},
};

#[cfg(feature = "std")]
pub use crate::resource::Directory;
