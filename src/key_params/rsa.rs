// src/key_params/rsa.rs

use num_bigint_dig::{BigUint, ModInverse};
use rand::rngs::OsRng;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::byte_stream::{get, FormatInstruction, FormatInstructionsDict, Mpint, Value, ValuesDict};
use crate::error::{Error, Result, Warning};

pub const KEY_TYPE: &str = "ssh-rsa";
pub const DEFAULT_KEY_SIZE: u32 = 4096;
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

pub const PUBLIC_FORMAT: FormatInstructionsDict = &[
    ("e", FormatInstruction::Mpint),
    ("n", FormatInstruction::Mpint),
];

pub const PRIVATE_FORMAT: FormatInstructionsDict = &[
    ("e", FormatInstruction::Mpint),
    ("n", FormatInstruction::Mpint),
    ("d", FormatInstruction::Mpint),
    ("iqmp", FormatInstruction::Mpint),
    ("p", FormatInstruction::Mpint),
    ("q", FormatInstruction::Mpint),
];

fn mpint_field(values: &ValuesDict, name: &str) -> Option<BigUint> {
    get(values, name)
        .and_then(Value::as_mpint)
        .map(BigUint::from)
}

pub fn check_public_params(_values: &ValuesDict) -> Result<Vec<Warning>> {
    // No structural relation is checkable from (e, n) alone.
    Ok(Vec::new())
}

pub fn check_private_params(values: &ValuesDict) -> Result<Vec<Warning>> {
    let mut warnings = Vec::new();
    let (n, e, d, p, q) = (
        mpint_field(values, "n"),
        mpint_field(values, "e"),
        mpint_field(values, "d"),
        mpint_field(values, "p"),
        mpint_field(values, "q"),
    );

    if let (Some(n), Some(p), Some(q)) = (&n, &p, &q) {
        if *n != p * q {
            warnings.push(Warning::RsaModulusMismatch);
        }
    }

    if let (Some(e), Some(d), Some(p), Some(q)) = (&e, &d, &p, &q) {
        let one = BigUint::from(1u8);
        let p_minus_1 = p - &one;
        let q_minus_1 = q - &one;
        let lcm = &p_minus_1 * &q_minus_1 / p_minus_1.gcd(&q_minus_1);
        if (e * d) % lcm != one {
            warnings.push(Warning::RsaExponentMismatch);
        }
    }

    Ok(warnings)
}

pub fn generate_private_params(key_size: u32, public_exponent: u64) -> Result<ValuesDict> {
    let exponent = BigUint::from(public_exponent);
    let private_key = RsaPrivateKey::new_with_exp(&mut OsRng, key_size as usize, &exponent)
        .map_err(|e| Error::Malformed(format!("RSA key generation failed: {e}")))?;

    let public_key: RsaPublicKey = private_key.to_public_key();
    let primes = private_key.primes();
    let p = primes[0].clone();
    let q = primes[1].clone();
    let iqmp = q
        .clone()
        .mod_inverse(&p)
        .ok_or_else(|| Error::Malformed("q has no inverse mod p".into()))?
        .to_biguint()
        .ok_or_else(|| Error::Malformed("unexpected negative iqmp".into()))?;

    Ok(vec![
        ("e", Value::Mpint(Mpint::from(public_key.e().clone()))),
        ("n", Value::Mpint(Mpint::from(public_key.n().clone()))),
        ("d", Value::Mpint(Mpint::from(private_key.d().clone()))),
        ("iqmp", Value::Mpint(Mpint::from(iqmp))),
        ("p", Value::Mpint(Mpint::from(p))),
        ("q", Value::Mpint(Mpint::from(q))),
    ])
}
