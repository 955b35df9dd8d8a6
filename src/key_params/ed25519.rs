// src/key_params/ed25519.rs

use ed25519_dalek::SigningKey;
use rand_core::OsRng;

use crate::byte_stream::{FormatInstruction, FormatInstructionsDict, Value, ValuesDict};
use crate::error::{Result, Warning};

pub const KEY_TYPE: &str = "ssh-ed25519";
pub const KEY_SIZE: usize = 32;

pub const PUBLIC_FORMAT: FormatInstructionsDict = &[("public", FormatInstruction::Bytes)];

pub const PRIVATE_FORMAT: FormatInstructionsDict = &[
    ("public", FormatInstruction::Bytes),
    ("private_public", FormatInstruction::Bytes),
];

pub fn check_public_params(values: &ValuesDict) -> Result<Vec<Warning>> {
    let mut warnings = Vec::new();
    if let Some(public) = crate::byte_stream::get(values, "public").and_then(Value::as_bytes) {
        if public.len() != KEY_SIZE {
            warnings.push(Warning::InvalidKeySize {
                field: "public",
                expected: KEY_SIZE,
                actual: public.len(),
            });
        }
    }
    Ok(warnings)
}

pub fn check_private_params(values: &ValuesDict) -> Result<Vec<Warning>> {
    let mut warnings = check_public_params(values)?;
    let public = crate::byte_stream::get(values, "public").and_then(Value::as_bytes);
    let private_public = crate::byte_stream::get(values, "private_public").and_then(Value::as_bytes);
    if let Some(private_public) = private_public {
        if private_public.len() != 2 * KEY_SIZE {
            warnings.push(Warning::InvalidKeySize {
                field: "private_public",
                expected: 2 * KEY_SIZE,
                actual: private_public.len(),
            });
        } else if let Some(public) = public {
            if &private_public[KEY_SIZE..] != public {
                warnings.push(Warning::Ed25519PublicKeyMismatch);
            }
        }
    }
    Ok(warnings)
}

/// Generates a fresh Ed25519 keypair. There are no generation options for
/// this algorithm.
pub fn generate_private_params() -> ValuesDict {
    let signing_key = SigningKey::generate(&mut OsRng);
    let verifying_key = signing_key.verifying_key();

    let public_bytes = verifying_key.to_bytes().to_vec();
    let mut private_public = signing_key.to_bytes().to_vec();
    private_public.extend_from_slice(&public_bytes);

    vec![
        ("public", Value::Bytes(public_bytes)),
        ("private_public", Value::Bytes(private_public)),
    ]
}
