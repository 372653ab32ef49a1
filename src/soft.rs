//! Software backend built on the RustCrypto [`rsa`] crate.

use alloc::{borrow::Cow, sync::Arc, vec::Vec};
use core::fmt;
use const_oid::AssociatedOid;
use digest::{Digest, DynDigest};
use rand_core::OsRng;
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey},
    traits::PublicKeyParts,
    Oaep, Pkcs1v15Encrypt, Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey,
};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::capabilities::Capabilities;
use crate::encoding::KeyKind;
use crate::errors::{Error, Result};
use crate::hash::DigestType;
use crate::padding::{Padding, SignatureScheme};
use crate::traits::Backend;

/// Pure Rust backend. Keys live on the heap and are zeroized on release.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Soft;

/// Key held by [`Soft`].
pub enum SoftKey {
    /// Public key.
    Public(RsaPublicKey),
    /// Private key.
    Private(RsaPrivateKey),
}

impl fmt::Debug for SoftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftKey::Public(key) => f.debug_tuple("Public").field(key).finish(),
            SoftKey::Private(key) => f
                .debug_struct("Private")
                .field("size", &key.size())
                .finish_non_exhaustive(),
        }
    }
}

/// Reference-counted handle to a [`SoftKey`].
#[derive(Clone, Debug)]
pub struct SoftKeyRef(Arc<SoftKey>);

impl SoftKeyRef {
    /// Borrow the key behind the handle.
    pub fn key(&self) -> &SoftKey {
        &self.0
    }

    fn kind(&self) -> KeyKind {
        match *self.0 {
            SoftKey::Public(_) => KeyKind::Public,
            SoftKey::Private(_) => KeyKind::Private,
        }
    }

    fn public_key(&self) -> Cow<'_, RsaPublicKey> {
        match &*self.0 {
            SoftKey::Public(key) => Cow::Borrowed(key),
            SoftKey::Private(key) => Cow::Owned(RsaPublicKey::from(key)),
        }
    }

    fn private_key(&self) -> Result<&RsaPrivateKey> {
        match &*self.0 {
            SoftKey::Private(key) => Ok(key),
            SoftKey::Public(_) => Err(Error::KeyMismatch {
                expected: KeyKind::Private,
                found: KeyKind::Public,
            }),
        }
    }
}

impl From<RsaPublicKey> for SoftKeyRef {
    fn from(key: RsaPublicKey) -> Self {
        SoftKeyRef(Arc::new(SoftKey::Public(key)))
    }
}

impl From<RsaPrivateKey> for SoftKeyRef {
    fn from(key: RsaPrivateKey) -> Self {
        SoftKeyRef(Arc::new(SoftKey::Private(key)))
    }
}

/// Call a function generic over the digest named by a [`DigestType`].
macro_rules! with_digest {
    ($digest:expr, $func:ident($($arg:expr),*)) => {
        match $digest {
            DigestType::Sha1 => $func::<Sha1>($($arg),*),
            DigestType::Sha224 => $func::<Sha224>($($arg),*),
            DigestType::Sha256 => $func::<Sha256>($($arg),*),
            DigestType::Sha384 => $func::<Sha384>($($arg),*),
            DigestType::Sha512 => $func::<Sha512>($($arg),*),
        }
    };
}

fn sign_digest<D>(key: &RsaPrivateKey, msg: &[u8], scheme: SignatureScheme) -> rsa::Result<Vec<u8>>
where
    D: 'static + Digest + DynDigest + AssociatedOid + Send + Sync,
{
    let hashed = D::digest(msg);
    match scheme {
        SignatureScheme::Pkcs1v15 => key.sign(Pkcs1v15Sign::new::<D>(), &hashed),
        SignatureScheme::Pss => key.sign_with_rng(&mut OsRng, Pss::new::<D>(), &hashed),
    }
}

fn verify_digest<D>(
    key: &RsaPublicKey,
    msg: &[u8],
    signature: &[u8],
    scheme: SignatureScheme,
) -> rsa::Result<()>
where
    D: 'static + Digest + DynDigest + AssociatedOid + Send + Sync,
{
    let hashed = D::digest(msg);
    match scheme {
        SignatureScheme::Pkcs1v15 => key.verify(Pkcs1v15Sign::new::<D>(), &hashed, signature),
        SignatureScheme::Pss => key.verify(Pss::new::<D>(), &hashed, signature),
    }
}

fn oaep<D>() -> Oaep
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    Oaep::new::<D>()
}

impl Backend for Soft {
    type KeyRef = SoftKeyRef;

    fn capabilities() -> Capabilities {
        Capabilities::ALL
    }

    fn import_key(pkcs1_der: &[u8], kind: KeyKind) -> Result<SoftKeyRef> {
        let key = match kind {
            KeyKind::Public => RsaPublicKey::from_pkcs1_der(pkcs1_der)?.into(),
            KeyKind::Private => RsaPrivateKey::from_pkcs1_der(pkcs1_der)?.into(),
        };
        Ok(key)
    }

    fn export_key(key: &SoftKeyRef) -> Result<Zeroizing<Vec<u8>>> {
        match key.key() {
            SoftKey::Public(key) => Ok(Zeroizing::new(key.to_pkcs1_der()?.as_bytes().to_vec())),
            SoftKey::Private(key) => Ok(key.to_pkcs1_der()?.to_bytes()),
        }
    }

    fn key_kind(key: &SoftKeyRef) -> Option<KeyKind> {
        Some(key.kind())
    }

    fn key_size(key: &SoftKeyRef) -> usize {
        match key.key() {
            SoftKey::Public(key) => key.size(),
            SoftKey::Private(key) => key.size(),
        }
    }

    fn sign(
        key: &SoftKeyRef,
        msg: &[u8],
        scheme: SignatureScheme,
        digest: DigestType,
    ) -> Result<Vec<u8>> {
        let key = key.private_key()?;
        Ok(with_digest!(digest, sign_digest(key, msg, scheme))?)
    }

    fn verify(
        key: &SoftKeyRef,
        msg: &[u8],
        signature: &[u8],
        scheme: SignatureScheme,
        digest: DigestType,
    ) -> Result<bool> {
        let key = key.public_key();
        match with_digest!(digest, verify_digest(&key, msg, signature, scheme)) {
            Ok(()) => Ok(true),
            Err(rsa::Error::Verification) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn encrypt(key: &SoftKeyRef, msg: &[u8], padding: Padding) -> Result<Vec<u8>> {
        let key = key.public_key();
        let ciphertext = match padding {
            Padding::Pkcs1v15 => key.encrypt(&mut OsRng, Pkcs1v15Encrypt, msg),
            Padding::Oaep(digest) => key.encrypt(&mut OsRng, with_digest!(digest, oaep()), msg),
        };
        Ok(ciphertext?)
    }

    fn decrypt(key: &SoftKeyRef, ciphertext: &[u8], padding: Padding) -> Result<Vec<u8>> {
        let key = key.private_key()?;
        let plaintext = match padding {
            Padding::Pkcs1v15 => key.decrypt_blinded(&mut OsRng, Pkcs1v15Encrypt, ciphertext),
            Padding::Oaep(digest) => {
                key.decrypt_blinded(&mut OsRng, with_digest!(digest, oaep()), ciphertext)
            }
        };
        Ok(plaintext?)
    }
}
