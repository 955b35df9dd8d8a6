// src/error.rs

use thiserror::Error;

/// Terminal error kinds surfaced by the codec.
///
/// Parsers never swallow a failure: every variant that can occur mid-stream
/// carries the byte offset (and field name, where one is known) at which it
/// was detected.
#[derive(Error, Debug)]
pub enum Error {
    #[error("truncated at offset {offset}{}", field.map(|f| format!(" reading {f}")).unwrap_or_default())]
    Truncated {
        offset: usize,
        field: Option<&'static str>,
    },

    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("bad auth_magic: not an openssh-key-v1 container")]
    BadMagic,

    #[error("malformed key material: {0}")]
    Malformed(String),

    #[error("unknown key algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown cipher: {0}")]
    UnknownCipher(String),

    #[error("unknown KDF: {0}")]
    UnknownKdf(String),

    #[error("invalid padding: {0}")]
    InvalidPadding(String),

    #[error("incorrect passphrase, or the key file is corrupt")]
    BadPassphraseOrCorrupt,

    #[error("public/private key mismatch at index {index}")]
    InconsistentKeyPair { index: usize },
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal invariant violations. Parsers continue past these and return
/// them alongside the parsed value rather than aborting, per the two-tier
/// warnings-vs-errors model (see `SPEC_FULL.md` §9 / §7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A key-size or structural relation that the format tolerates but
    /// that most tooling never violates intentionally.
    InvalidKeySize { field: &'static str, expected: usize, actual: usize },
    /// `n != p * q` for an RSA key — OpenSSH itself does not recompute this
    /// on write, so many real-world files carry it uncorrected.
    RsaModulusMismatch,
    /// `e * d != 1 (mod lcm(p-1, q-1))` for an RSA key.
    RsaExponentMismatch,
    /// The Ed25519 `private_public` suffix does not equal `public`.
    Ed25519PublicKeyMismatch,
    /// Classical FIPS-186 DSA parameter relations did not hold.
    DsaParameterMismatch,
    /// An ECDSA key's declared `curve` field does not match the
    /// nistp-identifier embedded in its `key_type`.
    EcdsaCurveMismatch { declared: String, expected: &'static str },
    /// An empty passphrase was supplied to a KDF that accepts but
    /// discourages it.
    EmptyPassphrase,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::InvalidKeySize { field, expected, actual } => write!(
                f,
                "field '{field}' has length {actual}, expected {expected}"
            ),
            Warning::RsaModulusMismatch => write!(f, "RSA modulus n does not equal p * q"),
            Warning::RsaExponentMismatch => {
                write!(f, "RSA exponents do not satisfy e * d = 1 (mod lcm(p-1, q-1))")
            }
            Warning::Ed25519PublicKeyMismatch => {
                write!(f, "Ed25519 private_public suffix does not match public")
            }
            Warning::DsaParameterMismatch => write!(f, "DSA parameters do not satisfy FIPS-186 relations"),
            Warning::EcdsaCurveMismatch { declared, expected } => write!(
                f,
                "ECDSA 'curve' field is '{declared}', expected '{expected}'"
            ),
            Warning::EmptyPassphrase => write!(f, "empty passphrase supplied to a passphrase-based KDF"),
        }
    }
}

/// A successfully parsed or constructed value together with whatever
/// non-fatal warnings were observed along the way.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Parsed<T> {
    pub fn new(value: T) -> Self {
        Parsed { value, warnings: Vec::new() }
    }

    pub fn with_warnings(value: T, warnings: Vec<Warning>) -> Self {
        Parsed { value, warnings }
    }

    /// Promote the first warning (if any) into an error, for callers that
    /// opt into strict mode instead of the default tolerant parsing.
    pub fn strict(self) -> Result<T> {
        if let Some(first) = self.warnings.first() {
            log::warn!("strict mode rejected parse: {first}");
            return Err(Error::Malformed(first.to_string()));
        }
        Ok(self.value)
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
