//! Crypto operations on keys and messages.
//!
//! The dispatcher checks the capability table, hands the raw bytes to the
//! backend and wraps the result in the matching message type. A refused
//! operation never reaches the backend.

use core::fmt;
use core::marker::PhantomData;

use crate::capabilities::{Capabilities, Operation};
use crate::errors::{Error, Result};
use crate::hash::DigestType;
use crate::key::{PrivateKey, PublicKey};
use crate::message::{ClearMessage, EncryptedMessage, Signature, VerificationResult};
use crate::padding::{Padding, SignatureScheme};
use crate::soft::Soft;
use crate::traits::{Backend, Message};

/// Runs the message pipeline against backend `B`.
pub struct Dispatcher<B: Backend = Soft> {
    capabilities: Capabilities,
    backend: PhantomData<fn() -> B>,
}

impl<B: Backend> Dispatcher<B> {
    /// Dispatcher limited to what both this build and the backend support.
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::host().intersect(B::capabilities()))
    }

    /// Dispatcher with an explicit capability table.
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Dispatcher {
            capabilities,
            backend: PhantomData,
        }
    }

    /// Operations this dispatcher will perform.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Sign `message` with PKCS#1 v1.5 padding.
    pub fn sign(
        &self,
        message: &ClearMessage,
        key: &PrivateKey<B>,
        digest: DigestType,
    ) -> Result<Signature> {
        self.sign_with(message, key, SignatureScheme::Pkcs1v15, digest)
    }

    /// Sign `message` with the given scheme.
    pub fn sign_with(
        &self,
        message: &ClearMessage,
        key: &PrivateKey<B>,
        scheme: SignatureScheme,
        digest: DigestType,
    ) -> Result<Signature> {
        self.capabilities.check(Operation::Sign)?;
        tracing::debug!(scheme = ?scheme, digest = %digest, "sign");

        B::sign(key.reference(), message.data(), scheme, digest).map(Signature::from_data)
    }

    /// Verify a PKCS#1 v1.5 `signature` over `message`.
    ///
    /// A signature that does not match is reported through
    /// [`VerificationResult::is_successful`]. A signature whose length
    /// differs from the key modulus fails with [`Error::SignatureLength`].
    pub fn verify(
        &self,
        message: &ClearMessage,
        key: &PublicKey<B>,
        signature: &Signature,
        digest: DigestType,
    ) -> Result<VerificationResult> {
        self.verify_with(message, key, signature, SignatureScheme::Pkcs1v15, digest)
    }

    /// Verify `signature` over `message` with the given scheme.
    pub fn verify_with(
        &self,
        message: &ClearMessage,
        key: &PublicKey<B>,
        signature: &Signature,
        scheme: SignatureScheme,
        digest: DigestType,
    ) -> Result<VerificationResult> {
        self.capabilities.check(Operation::Verify)?;

        let expected = B::key_size(key.reference());
        let actual = signature.data().len();
        if actual != expected {
            return Err(Error::SignatureLength { expected, actual });
        }

        let is_successful = B::verify(
            key.reference(),
            message.data(),
            signature.data(),
            scheme,
            digest,
        )?;
        tracing::debug!(scheme = ?scheme, digest = %digest, is_successful, "verify");

        Ok(VerificationResult { is_successful })
    }

    /// Encrypt `message` to `key`.
    pub fn encrypt(
        &self,
        message: &ClearMessage,
        key: &PublicKey<B>,
        padding: Padding,
    ) -> Result<EncryptedMessage> {
        self.capabilities.check(Operation::Encrypt)?;
        tracing::debug!(padding = %padding, len = message.data().len(), "encrypt");

        B::encrypt(key.reference(), message.data(), padding).map(EncryptedMessage::from_data)
    }

    /// Decrypt `message` with `key`.
    pub fn decrypt(
        &self,
        message: &EncryptedMessage,
        key: &PrivateKey<B>,
        padding: Padding,
    ) -> Result<ClearMessage> {
        self.capabilities.check(Operation::Decrypt)?;
        tracing::debug!(padding = %padding, len = message.data().len(), "decrypt");

        B::decrypt(key.reference(), message.data(), padding).map(ClearMessage::from_data)
    }
}

impl<B: Backend> Clone for Dispatcher<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Backend> Copy for Dispatcher<B> {}

impl<B: Backend> fmt::Debug for Dispatcher<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl<B: Backend> Default for Dispatcher<B> {
    fn default() -> Self {
        Self::new()
    }
}
