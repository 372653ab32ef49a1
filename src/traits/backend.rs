//! Interface to the engine performing the RSA operations.

use alloc::vec::Vec;
use core::fmt::Debug;
use zeroize::Zeroizing;

use crate::capabilities::Capabilities;
use crate::encoding::KeyKind;
use crate::errors::Result;
use crate::hash::DigestType;
use crate::padding::{Padding, SignatureScheme};

/// RSA engine holding imported keys behind opaque references.
///
/// Keys cross this boundary as bare PKCS#1 DER: [`Backend::import_key`]
/// receives the output of [`normalize`](crate::encoding::normalize) and
/// [`Backend::export_key`] returns the same structure. Everything else
/// (padding, digests, exponentiation) happens inside the engine.
pub trait Backend {
    /// Owned handle to a key held by the engine.
    ///
    /// Dropping the last handle releases the key. Clones refer to the same
    /// underlying key.
    type KeyRef: Clone + Debug;

    /// Operations the engine implements.
    fn capabilities() -> Capabilities {
        Capabilities::ALL
    }

    /// Import a PKCS#1 `RSAPublicKey` or `RSAPrivateKey`.
    fn import_key(pkcs1_der: &[u8], kind: KeyKind) -> Result<Self::KeyRef>;

    /// Serialize a key back to PKCS#1 DER.
    ///
    /// Engines that cannot export return [`Error::Export`](crate::Error::Export).
    fn export_key(key: &Self::KeyRef) -> Result<Zeroizing<Vec<u8>>>;

    /// Kind of key behind `key`, if the engine can tell.
    fn key_kind(_key: &Self::KeyRef) -> Option<KeyKind> {
        None
    }

    /// Modulus size in bytes. Signatures and ciphertexts have this length.
    fn key_size(key: &Self::KeyRef) -> usize;

    /// Hash `msg` with `digest` and sign the result.
    fn sign(
        key: &Self::KeyRef,
        msg: &[u8],
        scheme: SignatureScheme,
        digest: DigestType,
    ) -> Result<Vec<u8>>;

    /// Verify `signature` over `msg`.
    ///
    /// A well-formed signature that does not match returns `Ok(false)`.
    fn verify(
        key: &Self::KeyRef,
        msg: &[u8],
        signature: &[u8],
        scheme: SignatureScheme,
        digest: DigestType,
    ) -> Result<bool>;

    /// Encrypt `msg` to `key`.
    fn encrypt(key: &Self::KeyRef, msg: &[u8], padding: Padding) -> Result<Vec<u8>>;

    /// Decrypt `ciphertext` with `key`.
    fn decrypt(key: &Self::KeyRef, ciphertext: &[u8], padding: Padding) -> Result<Vec<u8>>;
}
