// src/kdf/none.rs

use super::KdfResult;
use zeroize::Zeroizing;

pub const NAME: &str = "none";

pub const OPTIONS_FORMAT: crate::byte_stream::FormatInstructionsDict = &[];

pub fn derive_key() -> KdfResult {
    KdfResult {
        cipher_key: Zeroizing::new(Vec::new()),
        initialization_vector: Zeroizing::new(Vec::new()),
    }
}
