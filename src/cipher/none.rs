// src/cipher/none.rs

use crate::error::{Error, Result};

pub const NAME: &str = "none";

pub fn encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    if !key.is_empty() || !iv.is_empty() {
        return Err(Error::Malformed("cipher 'none' requires an empty key and IV".into()));
    }
    Ok(plaintext.to_vec())
}
