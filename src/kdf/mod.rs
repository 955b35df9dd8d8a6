// src/kdf/mod.rs
//
// The password-based key-derivation registry: maps a passphrase plus a
// KDF's options to a (cipher-key, IV) pair. Derivation is deterministic
// and side-effect-free; the only variable-latency operation in the crate
// lives here, under `bcrypt`.

pub mod bcrypt;
pub mod none;

use crate::byte_stream::{FormatInstructionsDict, ValuesDict};
use crate::error::{Error, Result, Warning};
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KdfAlgorithm {
    None,
    Bcrypt,
}

/// The derived cipher key and initialization vector. Zeroized on drop.
pub struct KdfResult {
    pub cipher_key: Zeroizing<Vec<u8>>,
    pub initialization_vector: Zeroizing<Vec<u8>>,
}

impl KdfAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            KdfAlgorithm::None => none::NAME,
            KdfAlgorithm::Bcrypt => bcrypt::NAME,
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            none::NAME => Ok(KdfAlgorithm::None),
            bcrypt::NAME => Ok(KdfAlgorithm::Bcrypt),
            other => Err(Error::UnknownKdf(other.to_string())),
        }
    }

    pub fn options_format_instructions_dict(self) -> FormatInstructionsDict {
        match self {
            KdfAlgorithm::None => none::OPTIONS_FORMAT,
            KdfAlgorithm::Bcrypt => bcrypt::OPTIONS_FORMAT,
        }
    }

    pub fn derive(self, passphrase: &str, options: &ValuesDict) -> Result<(KdfResult, Vec<Warning>)> {
        match self {
            KdfAlgorithm::None => Ok((none::derive_key(), Vec::new())),
            KdfAlgorithm::Bcrypt => bcrypt::derive_key(passphrase, options),
        }
    }

    pub fn generate_options(self, salt_length: Option<usize>, rounds: Option<u32>) -> ValuesDict {
        match self {
            KdfAlgorithm::None => Vec::new(),
            KdfAlgorithm::Bcrypt => bcrypt::generate_options(salt_length, rounds),
        }
    }
}
