// src/key_params/ecdsa.rs

use elliptic_curve::sec1::ToEncodedPoint;
use rand_core::OsRng;

use crate::byte_stream::{get, FormatInstruction, FormatInstructionsDict, Mpint, Value, ValuesDict};
use crate::error::{Result, Warning};

pub const KEY_TYPE_P256: &str = "ecdsa-sha2-nistp256";
pub const KEY_TYPE_P384: &str = "ecdsa-sha2-nistp384";
pub const KEY_TYPE_P521: &str = "ecdsa-sha2-nistp521";

pub const PUBLIC_FORMAT: FormatInstructionsDict = &[
    ("curve", FormatInstruction::String),
    ("public", FormatInstruction::Bytes),
];

pub const PRIVATE_FORMAT: FormatInstructionsDict = &[
    ("curve", FormatInstruction::String),
    ("public", FormatInstruction::Bytes),
    ("private", FormatInstruction::Mpint),
];

/// The three NIST curves OpenSSH's `ecdsa-sha2-nistp*` key types cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    P256,
    P384,
    P521,
}

impl Curve {
    pub fn algorithm(self) -> super::Algorithm {
        match self {
            Curve::P256 => super::Algorithm::EcdsaP256,
            Curve::P384 => super::Algorithm::EcdsaP384,
            Curve::P521 => super::Algorithm::EcdsaP521,
        }
    }

    /// The `curve` field's value: the "nistp*" identifier embedded inside
    /// the key type string (e.g. `ecdsa-sha2-nistp256` -> `nistp256`).
    pub fn identifier(self) -> &'static str {
        match self {
            Curve::P256 => "nistp256",
            Curve::P384 => "nistp384",
            Curve::P521 => "nistp521",
        }
    }
}

pub fn check_public_params(values: &ValuesDict, curve: Curve) -> Result<Vec<Warning>> {
    let mut warnings = Vec::new();
    if let Some(declared) = get(values, "curve").and_then(Value::as_text) {
        if declared != curve.identifier() {
            warnings.push(Warning::EcdsaCurveMismatch {
                declared: declared.to_string(),
                expected: curve.identifier(),
            });
        }
    }
    if let Some(public) = get(values, "public").and_then(Value::as_bytes) {
        if public.first() != Some(&0x04) {
            warnings.push(Warning::InvalidKeySize {
                field: "public",
                expected: expected_point_len(curve),
                actual: public.len(),
            });
        } else if public.len() != expected_point_len(curve) {
            warnings.push(Warning::InvalidKeySize {
                field: "public",
                expected: expected_point_len(curve),
                actual: public.len(),
            });
        }
    }
    Ok(warnings)
}

pub fn check_private_params(values: &ValuesDict, curve: Curve) -> Result<Vec<Warning>> {
    check_public_params(values, curve)
}

fn expected_point_len(curve: Curve) -> usize {
    // Uncompressed SEC1 point: 1 tag byte + 2 field-element widths.
    match curve {
        Curve::P256 => 1 + 2 * 32,
        Curve::P384 => 1 + 2 * 48,
        Curve::P521 => 1 + 2 * 66,
    }
}

pub fn generate_private_params(curve: Curve) -> crate::error::Result<ValuesDict> {
    let (public, private) = match curve {
        Curve::P256 => {
            let signing_key = p256::ecdsa::SigningKey::random(&mut OsRng);
            let verifying_key = signing_key.verifying_key();
            let public = verifying_key.to_encoded_point(false).as_bytes().to_vec();
            let private = signing_key.to_bytes().to_vec();
            (public, private)
        }
        Curve::P384 => {
            let signing_key = p384::ecdsa::SigningKey::random(&mut OsRng);
            let verifying_key = signing_key.verifying_key();
            let public = verifying_key.to_encoded_point(false).as_bytes().to_vec();
            let private = signing_key.to_bytes().to_vec();
            (public, private)
        }
        Curve::P521 => {
            let signing_key = p521::ecdsa::SigningKey::random(&mut OsRng);
            let verifying_key = signing_key.verifying_key();
            let public = verifying_key.to_encoded_point(false).as_bytes().to_vec();
            let private = signing_key.to_bytes().to_vec();
            (public, private)
        }
    };

    Ok(vec![
        ("curve", Value::Text(curve.identifier().to_string())),
        ("public", Value::Bytes(public)),
        ("private", Value::Mpint(Mpint::from_sign_magnitude(false, private))),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_params_satisfy_invariants_for_each_curve() {
        for curve in [Curve::P256, Curve::P384, Curve::P521] {
            let values = generate_private_params(curve).unwrap();
            assert!(check_private_params(&values, curve).unwrap().is_empty());
        }
    }

    #[test]
    fn curve_mismatch_warns() {
        let values = generate_private_params(Curve::P256).unwrap();
        let warnings = check_private_params(&values, Curve::P384).unwrap();
        assert!(!warnings.is_empty());
    }
}
