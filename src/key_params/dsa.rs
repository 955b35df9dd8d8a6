// src/key_params/dsa.rs

use dsa::{Components, KeySize, SigningKey};
use num_bigint_dig::BigUint;
use rand::rngs::OsRng;

use crate::byte_stream::{get, FormatInstruction, FormatInstructionsDict, Mpint, Value, ValuesDict};
use crate::error::{Error, Result, Warning};

pub const KEY_TYPE: &str = "ssh-dss";
pub const DEFAULT_KEY_SIZE: u32 = 1024;

pub const PUBLIC_FORMAT: FormatInstructionsDict = &[
    ("p", FormatInstruction::Mpint),
    ("q", FormatInstruction::Mpint),
    ("g", FormatInstruction::Mpint),
    ("y", FormatInstruction::Mpint),
];

pub const PRIVATE_FORMAT: FormatInstructionsDict = &[
    ("p", FormatInstruction::Mpint),
    ("q", FormatInstruction::Mpint),
    ("g", FormatInstruction::Mpint),
    ("y", FormatInstruction::Mpint),
    ("x", FormatInstruction::Mpint),
];

fn mpint_field(values: &ValuesDict, name: &str) -> Option<BigUint> {
    get(values, name)
        .and_then(Value::as_mpint)
        .map(BigUint::from)
}

fn key_size_for(p_bits: u64) -> Option<KeySize> {
    match p_bits {
        1024 => Some(KeySize::DSA_1024_160),
        2048 => Some(KeySize::DSA_2048_256),
        3072 => Some(KeySize::DSA_3072_256),
        _ => None,
    }
}

pub fn check_public_params(values: &ValuesDict) -> Result<Vec<Warning>> {
    // Classical FIPS-186 checks need p, q, g, y together; on the public
    // schema alone we can only sanity-check that y < p when both are
    // present.
    let mut warnings = Vec::new();
    if let (Some(p), Some(y)) = (mpint_field(values, "p"), mpint_field(values, "y")) {
        if y >= p {
            warnings.push(Warning::DsaParameterMismatch);
        }
    }
    Ok(warnings)
}

pub fn check_private_params(values: &ValuesDict) -> Result<Vec<Warning>> {
    let mut warnings = check_public_params(values)?;
    if let (Some(p), Some(q), Some(g), Some(x)) = (
        mpint_field(values, "p"),
        mpint_field(values, "q"),
        mpint_field(values, "g"),
        mpint_field(values, "x"),
    ) {
        if x >= q {
            warnings.push(Warning::DsaParameterMismatch);
        }
        let one = BigUint::from(1u8);
        if g <= one || g >= p {
            warnings.push(Warning::DsaParameterMismatch);
        }
    }
    Ok(warnings)
}

pub fn generate_private_params(key_size: u32) -> Result<ValuesDict> {
    let size = key_size_for(key_size as u64).ok_or_else(|| {
        Error::Malformed(format!("unsupported DSA key size {key_size}"))
    })?;

    let components = Components::generate(&mut OsRng, size);
    let signing_key = SigningKey::generate(&mut OsRng, components.clone());
    let verifying_key = signing_key.verifying_key();

    Ok(vec![
        ("p", Value::Mpint(Mpint::from(components.p().clone()))),
        ("q", Value::Mpint(Mpint::from(components.q().clone()))),
        ("g", Value::Mpint(Mpint::from(components.g().clone()))),
        ("y", Value::Mpint(Mpint::from(verifying_key.y().clone()))),
        ("x", Value::Mpint(Mpint::from(signing_key.x().clone()))),
    ])
}
