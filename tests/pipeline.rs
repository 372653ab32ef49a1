//! Sign, verify, encrypt and decrypt against the software backend.

use hex_literal::hex;
use rsa_kit::{
    ClearMessage, DigestType, Dispatcher, EncryptedMessage, Error, Message, Padding, PrivateKey,
    PublicKey, Signature, SignatureScheme, Soft,
};

const PRIVATE_PEM: &str = include_str!("examples/pkcs8/rsa2048-priv.pem");
const PUBLIC_PEM: &str = include_str!("examples/pkcs8/rsa2048-pub.pem");
const HELLO_SIGNATURE: &str = include_str!("examples/hello-sha256.sig.b64");
const HELLO_PKCS1: &str = include_str!("examples/hello-pkcs1.enc.b64");
const HELLO_OAEP: &str = include_str!("examples/hello-oaep.enc.b64");

fn keys() -> (PrivateKey, PublicKey) {
    (
        PrivateKey::from_pem(PRIVATE_PEM).unwrap(),
        PublicKey::from_pem(PUBLIC_PEM).unwrap(),
    )
}

#[test]
#[cfg(feature = "sign")]
fn pkcs1v15_signature_is_deterministic() {
    let (private, _) = keys();
    let message = ClearMessage::from_string("hello");

    let signature = message.signed(&private, DigestType::Sha256).unwrap();
    assert_eq!(signature.base64_string(), HELLO_SIGNATURE.trim());
    assert_eq!(signature.data()[..8], hex!("35D01756A8F91048"));
    assert!(signature.to_string().starts_with("35D01756A8F91048AA7167490B583C44"));
}

#[test]
#[cfg(feature = "verify")]
fn verify_known_signature() {
    let (_, public) = keys();
    let dispatcher = Dispatcher::<Soft>::new();
    let signature = Signature::from_base64(HELLO_SIGNATURE).unwrap();

    let result = dispatcher
        .verify(&ClearMessage::from_string("hello"), &public, &signature, DigestType::Sha256)
        .unwrap();
    assert!(result.is_successful);

    let result = dispatcher
        .verify(&ClearMessage::from_string("hellO"), &public, &signature, DigestType::Sha256)
        .unwrap();
    assert!(!result.is_successful);

    let result = dispatcher
        .verify(&ClearMessage::from_string("hello"), &public, &signature, DigestType::Sha512)
        .unwrap();
    assert!(!result.is_successful);
}

#[test]
#[cfg(all(feature = "sign", feature = "verify"))]
fn altered_signature_fails() {
    let (private, public) = keys();
    let message = ClearMessage::from_string("attack at dawn");

    for digest in DigestType::ALL {
        let signature = message.signed(&private, digest).unwrap();
        assert!(message.verify(&public, &signature, digest).unwrap().is_successful);

        let mut altered = signature.data().to_vec();
        altered[10] ^= 0x01;
        let altered = Signature::from_data(altered);
        assert!(!message.verify(&public, &altered, digest).unwrap().is_successful);
    }
}

#[test]
#[cfg(feature = "verify")]
fn malformed_signature_length() {
    let (_, public) = keys();
    let message = ClearMessage::from_string("hello");
    let signature = Signature::from_data(vec![0; 512]);

    assert_eq!(
        message.verify(&public, &signature, DigestType::Sha256),
        Err(Error::SignatureLength {
            expected: 256,
            actual: 512,
        })
    );
}

#[test]
#[cfg(all(feature = "sign", feature = "verify"))]
fn pss_signatures_are_randomized() {
    let (private, public) = keys();
    let dispatcher = Dispatcher::<Soft>::new();
    let message = ClearMessage::from_string("hello");

    let first = dispatcher
        .sign_with(&message, &private, SignatureScheme::Pss, DigestType::Sha256)
        .unwrap();
    let second = dispatcher
        .sign_with(&message, &private, SignatureScheme::Pss, DigestType::Sha256)
        .unwrap();
    assert_ne!(first, second);

    for signature in [&first, &second] {
        let result = dispatcher
            .verify_with(&message, &public, signature, SignatureScheme::Pss, DigestType::Sha256)
            .unwrap();
        assert!(result.is_successful);
    }

    // a PSS signature is not a PKCS#1 v1.5 signature
    let result = dispatcher
        .verify(&message, &public, &first, DigestType::Sha256)
        .unwrap();
    assert!(!result.is_successful);
}

#[test]
#[cfg(feature = "decrypt")]
fn decrypt_external_ciphertexts() {
    let (private, _) = keys();

    let encrypted = EncryptedMessage::from_base64(HELLO_PKCS1).unwrap();
    let clear = encrypted.decrypted(&private, Padding::Pkcs1v15).unwrap();
    assert_eq!(clear.to_utf8_string().unwrap(), "hello");

    let encrypted = EncryptedMessage::from_base64(HELLO_OAEP).unwrap();
    let clear = encrypted.decrypted(&private, Padding::OAEP_SHA1).unwrap();
    assert_eq!(clear.to_utf8_string().unwrap(), "hello");

    // wrong padding
    assert!(matches!(
        encrypted.decrypted(&private, Padding::Oaep(DigestType::Sha256)),
        Err(Error::Crypto(_))
    ));
}

#[test]
#[cfg(all(feature = "encrypt", feature = "decrypt"))]
fn encrypt_decrypt_round_trip() {
    let (private, public) = keys();
    let message = ClearMessage::from_string("the quick brown fox");

    for padding in [
        Padding::Pkcs1v15,
        Padding::OAEP_SHA1,
        Padding::Oaep(DigestType::Sha256),
        Padding::Oaep(DigestType::Sha512),
    ] {
        let encrypted = message.encrypted(&public, padding).unwrap();
        assert_eq!(encrypted.data().len(), 256);
        assert_ne!(encrypted.data(), message.data());

        let armored = EncryptedMessage::from_pem(&encrypted.pem_string().unwrap()).unwrap();
        assert_eq!(armored.decrypted(&private, padding).unwrap(), message);
    }
}

#[test]
#[cfg(feature = "encrypt")]
fn message_too_long() {
    let (_, public) = keys();
    let padding = Padding::OAEP_SHA1;
    let limit = padding.max_message_len(public.size()).unwrap();

    let fits = ClearMessage::from_data(vec![7; limit]);
    assert!(fits.encrypted(&public, padding).is_ok());

    let too_long = ClearMessage::from_data(vec![7; limit + 1]);
    assert_eq!(
        too_long.encrypted(&public, padding),
        Err(Error::Crypto(rsa_kit::rsa::Error::MessageTooLong))
    );
}

#[test]
#[cfg(feature = "verify")]
fn public_key_derived_from_private_key_verifies() {
    let (private, _) = keys();
    let public = private.public_key().unwrap();
    let message = ClearMessage::from_string("hello");
    let signature = Signature::from_base64(HELLO_SIGNATURE).unwrap();

    assert!(message.verify(&public, &signature, DigestType::Sha256).unwrap().is_successful);
}
