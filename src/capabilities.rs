//! Per-host table of the operations the message pipeline may perform.
//!
//! The host table is fixed at build time by the `sign`, `verify`, `encrypt`
//! and `decrypt` Cargo features. It is consulted on every call, so a
//! disabled operation fails with [`Error::Unsupported`] instead of being
//! compiled out.

use core::fmt;

use crate::errors::{Error, Result};

/// Operations of the message pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operation {
    /// Private key signature.
    Sign,
    /// Public key signature verification.
    Verify,
    /// Public key encryption.
    Encrypt,
    /// Private key decryption.
    Decrypt,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Sign => "sign",
            Operation::Verify => "verify",
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
        })
    }
}

/// Set of supported [`Operation`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Capabilities {
    sign: bool,
    verify: bool,
    encrypt: bool,
    decrypt: bool,
}

impl Capabilities {
    /// Every operation is supported.
    pub const ALL: Capabilities = Capabilities {
        sign: true,
        verify: true,
        encrypt: true,
        decrypt: true,
    };

    /// No operation is supported.
    pub const NONE: Capabilities = Capabilities {
        sign: false,
        verify: false,
        encrypt: false,
        decrypt: false,
    };

    /// Capabilities this build was configured with.
    pub const fn host() -> Capabilities {
        Capabilities {
            sign: cfg!(feature = "sign"),
            verify: cfg!(feature = "verify"),
            encrypt: cfg!(feature = "encrypt"),
            decrypt: cfg!(feature = "decrypt"),
        }
    }

    /// Whether `op` is supported.
    pub const fn supports(&self, op: Operation) -> bool {
        match op {
            Operation::Sign => self.sign,
            Operation::Verify => self.verify,
            Operation::Encrypt => self.encrypt,
            Operation::Decrypt => self.decrypt,
        }
    }

    /// Copy of `self` with `op` enabled.
    pub const fn with(self, op: Operation) -> Capabilities {
        self.set(op, true)
    }

    /// Copy of `self` with `op` disabled.
    pub const fn without(self, op: Operation) -> Capabilities {
        self.set(op, false)
    }

    /// Operations supported by both `self` and `other`.
    pub const fn intersect(self, other: Capabilities) -> Capabilities {
        Capabilities {
            sign: self.sign && other.sign,
            verify: self.verify && other.verify,
            encrypt: self.encrypt && other.encrypt,
            decrypt: self.decrypt && other.decrypt,
        }
    }

    /// Fail with [`Error::Unsupported`] unless `op` is supported.
    pub fn check(&self, op: Operation) -> Result<()> {
        if self.supports(op) {
            Ok(())
        } else {
            tracing::warn!(operation = %op, "operation refused by capability table");
            Err(Error::Unsupported(op))
        }
    }

    const fn set(self, op: Operation, enabled: bool) -> Capabilities {
        let only = Capabilities {
            sign: matches!(op, Operation::Sign),
            verify: matches!(op, Operation::Verify),
            encrypt: matches!(op, Operation::Encrypt),
            decrypt: matches!(op, Operation::Decrypt),
        };

        Capabilities {
            sign: if only.sign { enabled } else { self.sign },
            verify: if only.verify { enabled } else { self.verify },
            encrypt: if only.encrypt { enabled } else { self.encrypt },
            decrypt: if only.decrypt { enabled } else { self.decrypt },
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities::host()
    }
}
