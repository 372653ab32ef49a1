//! Keys and the dispatcher over a backend with fewer abilities than `Soft`.

use std::cell::Cell;

use rsa_kit::{
    soft::SoftKeyRef, Backend, Capabilities, ClearMessage, DigestType, Dispatcher, Error,
    KeyKind, Operation, Padding, PrivateKey, PublicKey, Result, SignatureScheme, Soft,
};
use zeroize::Zeroizing;

const PRIVATE_DER: &[u8] = include_bytes!("examples/pkcs1/rsa2048-priv.der");
const PUBLIC_PEM: &str = include_str!("examples/pkcs8/rsa2048-pub.pem");

thread_local! {
    static CALLS: Cell<usize> = const { Cell::new(0) };
}

fn backend_calls() -> usize {
    CALLS.with(Cell::get)
}

fn record_call() {
    CALLS.with(|calls| calls.set(calls.get() + 1));
}

/// Hardware-style engine: keys cannot be exported or inspected, and
/// signing is not available.
struct Sealed;

impl Backend for Sealed {
    type KeyRef = SoftKeyRef;

    fn capabilities() -> Capabilities {
        Capabilities::ALL.without(Operation::Sign)
    }

    fn import_key(pkcs1_der: &[u8], kind: KeyKind) -> Result<SoftKeyRef> {
        Soft::import_key(pkcs1_der, kind)
    }

    fn export_key(_key: &SoftKeyRef) -> Result<Zeroizing<Vec<u8>>> {
        Err(Error::Export)
    }

    fn key_size(key: &SoftKeyRef) -> usize {
        Soft::key_size(key)
    }

    fn sign(
        key: &SoftKeyRef,
        msg: &[u8],
        scheme: SignatureScheme,
        digest: DigestType,
    ) -> Result<Vec<u8>> {
        record_call();
        Soft::sign(key, msg, scheme, digest)
    }

    fn verify(
        key: &SoftKeyRef,
        msg: &[u8],
        signature: &[u8],
        scheme: SignatureScheme,
        digest: DigestType,
    ) -> Result<bool> {
        record_call();
        Soft::verify(key, msg, signature, scheme, digest)
    }

    fn encrypt(key: &SoftKeyRef, msg: &[u8], padding: Padding) -> Result<Vec<u8>> {
        record_call();
        Soft::encrypt(key, msg, padding)
    }

    fn decrypt(key: &SoftKeyRef, ciphertext: &[u8], padding: Padding) -> Result<Vec<u8>> {
        record_call();
        Soft::decrypt(key, ciphertext, padding)
    }
}

fn sealed_private() -> PrivateKey<Sealed> {
    PrivateKey::from_der(PRIVATE_DER).unwrap()
}

#[test]
fn refused_operations_never_reach_the_backend() {
    let private = sealed_private();
    let message = ClearMessage::from_string("hello");
    let before = backend_calls();

    assert_eq!(
        message.signed(&private, DigestType::Sha256),
        Err(Error::Unsupported(Operation::Sign))
    );
    assert_eq!(backend_calls(), before);

    let dispatcher = Dispatcher::<Sealed>::with_capabilities(Capabilities::NONE);
    let public = PublicKey::<Sealed>::from_pem(PUBLIC_PEM).unwrap();
    assert_eq!(
        dispatcher.encrypt(&message, &public, Padding::Pkcs1v15),
        Err(Error::Unsupported(Operation::Encrypt))
    );
    assert_eq!(backend_calls(), before);
}

#[test]
fn capabilities_are_intersected() {
    let capabilities = Dispatcher::<Sealed>::new().capabilities();
    assert!(!capabilities.supports(Operation::Sign));
    assert_eq!(
        capabilities.supports(Operation::Decrypt),
        cfg!(feature = "decrypt")
    );
}

#[test]
#[cfg(all(feature = "encrypt", feature = "decrypt"))]
fn allowed_operations_still_work() {
    let private = sealed_private();
    let public = PublicKey::<Sealed>::from_pem(PUBLIC_PEM).unwrap();
    let message = ClearMessage::from_string("hello");
    let before = backend_calls();

    let encrypted = message.encrypted(&public, Padding::OAEP_SHA1).unwrap();
    let decrypted = encrypted.decrypted(&private, Padding::OAEP_SHA1).unwrap();
    assert_eq!(decrypted, message);
    assert_eq!(backend_calls(), before + 2);
}

#[test]
fn keys_without_original_data_cannot_export() {
    let private = sealed_private();
    assert_eq!(private.data().unwrap().as_slice(), PRIVATE_DER);
    assert_eq!(private.export_der().unwrap_err(), Error::Export);
    assert_eq!(private.public_key().unwrap_err(), Error::Export);

    let copy = PrivateKey::<Sealed>::from_reference(private.reference().clone()).unwrap();
    assert_eq!(copy.original_data(), None);
    assert_eq!(copy.data().unwrap_err(), Error::Export);
    assert_eq!(copy.pem_string().unwrap_err(), Error::Export);
    assert_eq!(copy.base64_string().unwrap_err(), Error::Export);
}

#[test]
#[cfg(all(feature = "encrypt", feature = "decrypt"))]
fn uninspectable_references_are_trusted() {
    // Without introspection the kind cannot be checked, so a private
    // reference is accepted as a public key.
    let private = sealed_private();
    let public = PublicKey::<Sealed>::from_reference(private.reference().clone()).unwrap();

    let message = ClearMessage::from_string("hello");
    let encrypted = message.encrypted(&public, Padding::Pkcs1v15).unwrap();
    assert_eq!(encrypted.decrypted(&private, Padding::Pkcs1v15).unwrap(), message);
}

#[test]
fn inspectable_references_are_checked() {
    let soft = PrivateKey::<Soft>::from_der(PRIVATE_DER).unwrap();
    assert_eq!(
        PublicKey::<Soft>::from_reference(soft.reference().clone()).unwrap_err(),
        Error::KeyMismatch {
            expected: KeyKind::Public,
            found: KeyKind::Private,
        }
    );
}
