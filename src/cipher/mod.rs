// src/cipher/mod.rs
//
// The symmetric-cipher registry: `none` (identity) and the three AES-CTR
// key sizes OpenSSH private keys support.

pub mod aes_ctr;
pub mod none;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherAlgorithm {
    None,
    Aes128Ctr,
    Aes192Ctr,
    Aes256Ctr,
}

impl CipherAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            CipherAlgorithm::None => none::NAME,
            CipherAlgorithm::Aes128Ctr => aes_ctr::NAME_128,
            CipherAlgorithm::Aes192Ctr => aes_ctr::NAME_192,
            CipherAlgorithm::Aes256Ctr => aes_ctr::NAME_256,
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            none::NAME => Ok(CipherAlgorithm::None),
            aes_ctr::NAME_128 => Ok(CipherAlgorithm::Aes128Ctr),
            aes_ctr::NAME_192 => Ok(CipherAlgorithm::Aes192Ctr),
            aes_ctr::NAME_256 => Ok(CipherAlgorithm::Aes256Ctr),
            other => Err(Error::UnknownCipher(other.to_string())),
        }
    }

    pub fn block_size(self) -> usize {
        match self {
            CipherAlgorithm::None => 1,
            _ => 16,
        }
    }

    pub fn key_len(self) -> usize {
        match self {
            CipherAlgorithm::None => 0,
            CipherAlgorithm::Aes128Ctr => 16,
            CipherAlgorithm::Aes192Ctr => 24,
            CipherAlgorithm::Aes256Ctr => 32,
        }
    }

    pub fn iv_len(self) -> usize {
        match self {
            CipherAlgorithm::None => 0,
            _ => 16,
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, CipherAlgorithm::None)
    }

    pub fn encrypt(self, key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        match self {
            CipherAlgorithm::None => none::encrypt(key, iv, plaintext),
            CipherAlgorithm::Aes128Ctr => aes_ctr::encrypt_128(key, iv, plaintext),
            CipherAlgorithm::Aes192Ctr => aes_ctr::encrypt_192(key, iv, plaintext),
            CipherAlgorithm::Aes256Ctr => aes_ctr::encrypt_256(key, iv, plaintext),
        }
    }

    pub fn decrypt(self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        // CTR mode is its own inverse.
        self.encrypt(key, iv, ciphertext)
    }
}
