// src/cipher/aes_ctr.rs
//
// AES in counter mode, per NIST SP 800-38A, with a 128-bit counter
// initialized from the IV and treated as a big-endian unsigned integer
// (`ctr::Ctr128BE`). Encryption and decryption are the same keystream
// XOR, so both directions share one implementation per key size.

use aes::{Aes128, Aes192, Aes256};
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;

use crate::error::{Error, Result};

pub const NAME_128: &str = "aes128-ctr";
pub const NAME_192: &str = "aes192-ctr";
pub const NAME_256: &str = "aes256-ctr";

pub const BLOCK_SIZE: usize = 16;

type Aes128Ctr = Ctr128BE<Aes128>;
type Aes192Ctr = Ctr128BE<Aes192>;
type Aes256Ctr = Ctr128BE<Aes256>;

fn check_lengths(key: &[u8], iv: &[u8], expected_key_len: usize, data: &[u8]) -> Result<()> {
    if key.len() != expected_key_len {
        return Err(Error::Malformed(format!(
            "expected a {expected_key_len}-byte key, got {}",
            key.len()
        )));
    }
    if iv.len() != BLOCK_SIZE {
        return Err(Error::Malformed(format!("expected a {BLOCK_SIZE}-byte IV, got {}", iv.len())));
    }
    if data.len() % BLOCK_SIZE != 0 {
        return Err(Error::InvalidPadding(format!(
            "ciphertext length {} is not a multiple of the {BLOCK_SIZE}-byte block size",
            data.len()
        )));
    }
    Ok(())
}

pub fn encrypt_128(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_lengths(key, iv, 16, plaintext)?;
    let mut buf = plaintext.to_vec();
    let mut cipher = Aes128Ctr::new(key.into(), iv.into());
    cipher.apply_keystream(&mut buf);
    Ok(buf)
}

pub fn encrypt_192(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_lengths(key, iv, 24, plaintext)?;
    let mut buf = plaintext.to_vec();
    let mut cipher = Aes192Ctr::new(key.into(), iv.into());
    cipher.apply_keystream(&mut buf);
    Ok(buf)
}

pub fn encrypt_256(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_lengths(key, iv, 32, plaintext)?;
    let mut buf = plaintext.to_vec();
    let mut cipher = Aes256Ctr::new(key.into(), iv.into());
    cipher.apply_keystream(&mut buf);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrypt_is_encrypt_applied_twice() {
        let key = [0x42u8; 32];
        let iv = [0x24u8; 16];
        let plaintext = b"sixteen-byte-blk".to_vec();
        let ciphertext = encrypt_256(&key, &iv, &plaintext).unwrap();
        let roundtrip = encrypt_256(&key, &iv, &ciphertext).unwrap();
        assert_eq!(roundtrip, plaintext);
    }

    #[test]
    fn rejects_non_block_multiple_length() {
        let key = [0u8; 16];
        let iv = [0u8; 16];
        let err = encrypt_128(&key, &iv, b"not-16-bytes").unwrap_err();
        assert!(matches!(err, Error::InvalidPadding(_)));
    }
}
