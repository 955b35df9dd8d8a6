// src/kdf/bcrypt.rs

use rand::RngCore;
use zeroize::Zeroizing;

use super::KdfResult;
use crate::byte_stream::{get, FormatInstruction, FormatInstructionsDict, Value, ValuesDict};
use crate::error::{Error, Result, Warning};

pub const NAME: &str = "bcrypt";

pub const KEY_LENGTH: usize = 32;
pub const IV_LENGTH: usize = 16;
pub const SALT_LENGTH: usize = 16;
pub const ROUNDS: u32 = 16;

pub const OPTIONS_FORMAT: FormatInstructionsDict = &[
    ("salt", FormatInstruction::Bytes),
    ("rounds", FormatInstruction::FixedU32),
];

pub fn derive_key(passphrase: &str, options: &ValuesDict) -> Result<(KdfResult, Vec<Warning>)> {
    let salt = get(options, "salt")
        .and_then(Value::as_bytes)
        .ok_or_else(|| Error::Malformed("bcrypt KDF options missing 'salt'".into()))?;
    let rounds = get(options, "rounds")
        .and_then(Value::as_u32)
        .ok_or_else(|| Error::Malformed("bcrypt KDF options missing 'rounds'".into()))?;

    let mut warnings = Vec::new();
    if passphrase.is_empty() {
        warnings.push(Warning::EmptyPassphrase);
    }

    let mut output = Zeroizing::new(vec![0u8; KEY_LENGTH + IV_LENGTH]);
    bcrypt_pbkdf::bcrypt_pbkdf(passphrase.as_bytes(), salt, rounds, &mut output)
        .map_err(|e| Error::Malformed(format!("bcrypt_pbkdf failed: {e}")))?;

    let cipher_key = Zeroizing::new(output[..KEY_LENGTH].to_vec());
    let initialization_vector = Zeroizing::new(output[KEY_LENGTH..].to_vec());

    Ok((
        KdfResult { cipher_key, initialization_vector },
        warnings,
    ))
}

pub fn generate_options(salt_length: Option<usize>, rounds: Option<u32>) -> ValuesDict {
    let mut salt = vec![0u8; salt_length.unwrap_or(SALT_LENGTH)];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    vec![
        ("salt", Value::Bytes(salt)),
        ("rounds", Value::U32(rounds.unwrap_or(ROUNDS))),
    ]
}
