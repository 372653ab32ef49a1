//! Encodings shared by every message type.

use alloc::{string::String, vec::Vec};

use crate::errors::Result;
use crate::pem;

/// Byte payload that travels through the pipeline.
pub trait Message: Sized {
    /// Label used by [`Message::pem_string`].
    const PEM_LABEL: &'static str;

    /// Wrap raw bytes.
    fn from_data(data: Vec<u8>) -> Self;

    /// Raw bytes.
    fn data(&self) -> &[u8];

    /// Decode a base64 string. Embedded whitespace is ignored.
    fn from_base64(input: &str) -> Result<Self> {
        pem::decode_base64(input).map(Self::from_data)
    }

    /// Decode a PEM document with any label, or a bare base64 body.
    fn from_pem(input: &str) -> Result<Self> {
        let (_, data) = pem::strip_envelope(input)?;
        Ok(Self::from_data(data))
    }

    /// Base64 without line breaks.
    fn base64_string(&self) -> String {
        pem::encode_base64(self.data())
    }

    /// PEM document labelled with [`Message::PEM_LABEL`].
    fn pem_string(&self) -> Result<String> {
        pem::encode(Self::PEM_LABEL, self.data())
    }
}
