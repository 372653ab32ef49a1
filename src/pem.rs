//! Base64 and PEM armor.
//!
//! Decoding is lenient in the ways real key files need: whitespace inside
//! base64 payloads is ignored, CRLF line endings are accepted, and text
//! around the envelopes is skipped. Encoding is strict RFC 7468 output.

use alloc::{string::String, vec::Vec};
use base64ct::{Base64, Encoding};
use pkcs8::der::pem::LineEnding;

use crate::errors::{EncodingError, Result};

/// Type label of an X.509 `SubjectPublicKeyInfo`.
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// Type label of a PKCS#1 `RSAPublicKey`.
pub const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";

/// Type label of a PKCS#8 `PrivateKeyInfo`.
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// Type label of a PKCS#1 `RSAPrivateKey`.
pub const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

const DASHES: &str = "-----";
const BEGIN: &str = "-----BEGIN ";
const END: &str = "-----END ";

/// Decode standard base64, ignoring any ASCII whitespace in the input.
pub fn decode_base64(input: &str) -> Result<Vec<u8>> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(Base64::decode_vec(&compact)?)
}

/// Encode as standard padded base64 on a single line.
pub fn encode_base64(input: &[u8]) -> String {
    Base64::encode_string(input)
}

/// Encode `der` as an RFC 7468 PEM document with the given type label.
pub fn encode(label: &str, der: &[u8]) -> Result<String> {
    Ok(pkcs8::der::pem::encode_string(label, LineEnding::LF, der)?)
}

/// Strip the PEM envelope from `input` and decode its body.
///
/// Input without any `-----BEGIN` marker is treated as a bare base64 body
/// and returned with no label. Otherwise the first complete envelope is
/// used; a marker without a matching trailer is an error.
pub fn strip_envelope(input: &str) -> Result<(Option<&str>, Vec<u8>)> {
    if !input.contains(BEGIN) {
        return Ok((None, decode_base64(input)?));
    }

    let mut lines = input.lines();
    let envelope = next_envelope(&mut lines).ok_or(EncodingError::Armor)?;
    Ok((Some(envelope.label), envelope.decode()?))
}

/// Iterate over every complete PEM block in `input`, in document order.
///
/// Blocks without a matching trailer and blocks whose body is not base64
/// are skipped.
pub fn blocks(input: &str) -> Blocks<'_> {
    Blocks {
        lines: input.lines(),
    }
}

/// A decoded PEM block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block<'a> {
    /// Type label from the encapsulation boundary, e.g. `PUBLIC KEY`.
    pub label: &'a str,

    /// Decoded body.
    pub contents: Vec<u8>,
}

/// Iterator returned by [`blocks`].
///
/// Cloning the iterator restarts scanning from the clone's position.
#[derive(Clone, Debug)]
pub struct Blocks<'a> {
    lines: core::str::Lines<'a>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        loop {
            let envelope = next_envelope(&mut self.lines)?;
            match envelope.decode() {
                Ok(contents) => {
                    return Some(Block {
                        label: envelope.label,
                        contents,
                    })
                }
                Err(err) => {
                    tracing::debug!(label = envelope.label, error = ?err, "skipping PEM block");
                }
            }
        }
    }
}

/// Raw envelope: label plus undecoded body.
struct Envelope<'a> {
    label: &'a str,
    body: String,
}

impl Envelope<'_> {
    fn decode(&self) -> Result<Vec<u8>> {
        decode_base64(&self.body)
    }
}

fn boundary<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.trim()
        .strip_prefix(prefix)?
        .strip_suffix(DASHES)
        .map(str::trim)
}

/// Advance `lines` past the next complete envelope and return it.
///
/// A new `BEGIN` before the current block's `END` restarts the block. An
/// `END` whose label differs from its `BEGIN` discards the block.
fn next_envelope<'a>(lines: &mut core::str::Lines<'a>) -> Option<Envelope<'a>> {
    let mut open: Option<Envelope<'a>> = None;

    for line in lines {
        if let Some(label) = boundary(line, BEGIN) {
            open = Some(Envelope {
                label,
                body: String::new(),
            });
        } else if let Some(label) = boundary(line, END) {
            match open.take() {
                Some(envelope) if envelope.label == label => return Some(envelope),
                Some(envelope) => {
                    tracing::debug!(begin = envelope.label, end = label, "mismatched PEM trailer");
                }
                None => {}
            }
        } else if let Some(envelope) = open.as_mut() {
            envelope.body.push_str(line.trim());
        }
    }

    None
}
