//! Error types.

use core::fmt;

use crate::capabilities::Operation;
use crate::encoding::KeyKind;

/// Alias for [`core::result::Result`] with the `rsa-kit` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed base64 payload or PEM armor.
    Encoding(EncodingError),

    /// DER bytes are not an RSA key of the requested kind.
    Format(FormatError),

    /// A key reference holds a key of the other kind.
    KeyMismatch {
        /// Kind the caller asked for.
        expected: KeyKind,
        /// Kind the backend reported.
        found: KeyKind,
    },

    /// The key cannot be serialized back to bytes.
    Export,

    /// The operation is disabled on this host.
    Unsupported(Operation),

    /// Signature length does not match the key modulus.
    SignatureLength {
        /// Modulus size in bytes.
        expected: usize,
        /// Length of the supplied signature.
        actual: usize,
    },

    /// Named resource was not found by the locator.
    ResourceNotFound,

    /// Named resource exists but could not be read.
    ResourceUnreadable,

    /// Failure reported by the RSA backend.
    Crypto(rsa::Error),
}

/// Details of an [`Error::Encoding`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum EncodingError {
    /// Invalid base64.
    Base64,

    /// `-----BEGIN` marker without a matching `-----END` marker.
    Armor,

    /// Text payload is not valid UTF-8.
    Utf8,

    /// PEM encoder rejected the label or input.
    Pem,
}

/// Details of an [`Error::Format`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum FormatError {
    /// Input is not a recognized RSA key structure.
    Unrecognized,

    /// Structure holds a key of the other kind.
    KindMismatch {
        /// Kind the caller asked for.
        expected: KeyKind,
        /// Kind found in the structure.
        found: KeyKind,
    },

    /// ASN.1 DER error.
    Der(pkcs8::der::Error),

    /// Well-formed structure the backend refused to import.
    Rejected,
}

impl core::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Encoding(err) => write!(f, "encoding error: {}", err),
            Error::Format(err) => write!(f, "key format error: {}", err),
            Error::KeyMismatch { expected, found } => {
                write!(f, "expected {} key reference, found {} key", expected, found)
            }
            Error::Export => f.write_str("key cannot be exported"),
            Error::Unsupported(op) => write!(f, "{} is not supported on this host", op),
            Error::SignatureLength { expected, actual } => write!(
                f,
                "signature is {} bytes, key modulus is {} bytes",
                actual, expected
            ),
            Error::ResourceNotFound => f.write_str("resource not found"),
            Error::ResourceUnreadable => f.write_str("resource could not be read"),
            Error::Crypto(err) => write!(f, "crypto error: {}", err),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EncodingError::Base64 => "invalid base64",
            EncodingError::Armor => "unterminated PEM envelope",
            EncodingError::Utf8 => "invalid UTF-8",
            EncodingError::Pem => "PEM encoding failed",
        })
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Unrecognized => f.write_str("unrecognized key structure"),
            FormatError::KindMismatch { expected, found } => {
                write!(f, "expected {} key, found {} key", expected, found)
            }
            FormatError::Der(err) => write!(f, "{}", err),
            FormatError::Rejected => f.write_str("key rejected by backend"),
        }
    }
}

impl From<EncodingError> for Error {
    fn from(err: EncodingError) -> Error {
        Error::Encoding(err)
    }
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Error {
        Error::Format(err)
    }
}

impl From<base64ct::Error> for Error {
    fn from(_err: base64ct::Error) -> Error {
        Error::Encoding(EncodingError::Base64)
    }
}

impl From<pkcs8::der::pem::Error> for Error {
    fn from(_err: pkcs8::der::pem::Error) -> Error {
        Error::Encoding(EncodingError::Pem)
    }
}

impl From<pkcs8::der::Error> for Error {
    fn from(err: pkcs8::der::Error) -> Error {
        Error::Format(FormatError::Der(err))
    }
}

impl From<pkcs1::Error> for Error {
    fn from(err: pkcs1::Error) -> Error {
        Error::Crypto(rsa::Error::Pkcs1(err))
    }
}

impl From<rsa::Error> for Error {
    fn from(err: rsa::Error) -> Error {
        Error::Crypto(err)
    }
}

impl From<core::str::Utf8Error> for Error {
    fn from(_err: core::str::Utf8Error) -> Error {
        Error::Encoding(EncodingError::Utf8)
    }
}
