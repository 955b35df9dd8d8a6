// src/key_params/mod.rs
//
// The key-parameter registry: one variant per supported SSH key algorithm,
// each declaring a public and a private format-instructions schema, a
// validity check that yields warnings rather than aborting, and a
// generator for fresh key material.

pub mod dsa;
pub mod ecdsa;
pub mod ed25519;
pub mod rsa;

use crate::byte_stream::{FormatInstructionsDict, ValuesDict};
use crate::error::{Error, Result, Warning};

/// The SSH `key_type` strings this crate understands, and the algorithm
/// they dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Ed25519,
    Rsa,
    Dsa,
    EcdsaP256,
    EcdsaP384,
    EcdsaP521,
}

impl Algorithm {
    pub fn key_type(self) -> &'static str {
        match self {
            Algorithm::Ed25519 => ed25519::KEY_TYPE,
            Algorithm::Rsa => rsa::KEY_TYPE,
            Algorithm::Dsa => dsa::KEY_TYPE,
            Algorithm::EcdsaP256 => ecdsa::KEY_TYPE_P256,
            Algorithm::EcdsaP384 => ecdsa::KEY_TYPE_P384,
            Algorithm::EcdsaP521 => ecdsa::KEY_TYPE_P521,
        }
    }

    pub fn from_key_type(key_type: &str) -> Result<Self> {
        Ok(match key_type {
            ed25519::KEY_TYPE => Algorithm::Ed25519,
            rsa::KEY_TYPE => Algorithm::Rsa,
            dsa::KEY_TYPE => Algorithm::Dsa,
            ecdsa::KEY_TYPE_P256 => Algorithm::EcdsaP256,
            ecdsa::KEY_TYPE_P384 => Algorithm::EcdsaP384,
            ecdsa::KEY_TYPE_P521 => Algorithm::EcdsaP521,
            other => return Err(Error::UnknownAlgorithm(other.to_string())),
        })
    }

    pub fn public_format_instructions_dict(self) -> FormatInstructionsDict {
        match self {
            Algorithm::Ed25519 => ed25519::PUBLIC_FORMAT,
            Algorithm::Rsa => rsa::PUBLIC_FORMAT,
            Algorithm::Dsa => dsa::PUBLIC_FORMAT,
            Algorithm::EcdsaP256 | Algorithm::EcdsaP384 | Algorithm::EcdsaP521 => {
                ecdsa::PUBLIC_FORMAT
            }
        }
    }

    pub fn private_format_instructions_dict(self) -> FormatInstructionsDict {
        match self {
            Algorithm::Ed25519 => ed25519::PRIVATE_FORMAT,
            Algorithm::Rsa => rsa::PRIVATE_FORMAT,
            Algorithm::Dsa => dsa::PRIVATE_FORMAT,
            Algorithm::EcdsaP256 | Algorithm::EcdsaP384 | Algorithm::EcdsaP521 => {
                ecdsa::PRIVATE_FORMAT
            }
        }
    }

    /// Validates that `values` conform to this algorithm's public schema,
    /// returning non-fatal warnings for soft invariant violations.
    pub fn check_public_params(self, values: &ValuesDict) -> Result<Vec<Warning>> {
        match self {
            Algorithm::Ed25519 => ed25519::check_public_params(values),
            Algorithm::Rsa => rsa::check_public_params(values),
            Algorithm::Dsa => dsa::check_public_params(values),
            Algorithm::EcdsaP256 => ecdsa::check_public_params(values, ecdsa::Curve::P256),
            Algorithm::EcdsaP384 => ecdsa::check_public_params(values, ecdsa::Curve::P384),
            Algorithm::EcdsaP521 => ecdsa::check_public_params(values, ecdsa::Curve::P521),
        }
    }

    pub fn check_private_params(self, values: &ValuesDict) -> Result<Vec<Warning>> {
        match self {
            Algorithm::Ed25519 => ed25519::check_private_params(values),
            Algorithm::Rsa => rsa::check_private_params(values),
            Algorithm::Dsa => dsa::check_private_params(values),
            Algorithm::EcdsaP256 => ecdsa::check_private_params(values, ecdsa::Curve::P256),
            Algorithm::EcdsaP384 => ecdsa::check_private_params(values, ecdsa::Curve::P384),
            Algorithm::EcdsaP521 => ecdsa::check_private_params(values, ecdsa::Curve::P521),
        }
    }

    /// Projects a private values-dict down to the fields its public
    /// schema declares, in that schema's order.
    pub fn project_to_public(self, private_values: &ValuesDict) -> ValuesDict {
        let public_schema = self.public_format_instructions_dict();
        public_schema
            .iter()
            .filter_map(|(name, _)| {
                private_values
                    .iter()
                    .find(|(n, _)| n == name)
                    .cloned()
            })
            .collect()
    }
}

/// Generation options, one enum arm per algorithm family. `Default` picks
/// the same defaults spec.md §4.2 names.
#[derive(Debug, Clone)]
pub enum GenerateOptions {
    Ed25519,
    Rsa { key_size: u32, public_exponent: u64 },
    Dsa { key_size: u32 },
    Ecdsa { curve: ecdsa::Curve },
}

impl GenerateOptions {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            GenerateOptions::Ed25519 => Algorithm::Ed25519,
            GenerateOptions::Rsa { .. } => Algorithm::Rsa,
            GenerateOptions::Dsa { .. } => Algorithm::Dsa,
            GenerateOptions::Ecdsa { curve } => curve.algorithm(),
        }
    }

    pub fn rsa_default() -> Self {
        GenerateOptions::Rsa { key_size: rsa::DEFAULT_KEY_SIZE, public_exponent: rsa::DEFAULT_PUBLIC_EXPONENT }
    }

    pub fn dsa_default() -> Self {
        GenerateOptions::Dsa { key_size: dsa::DEFAULT_KEY_SIZE }
    }

    pub fn ecdsa_default() -> Self {
        GenerateOptions::Ecdsa { curve: ecdsa::Curve::P256 }
    }
}

/// Generates a fresh private-key values-dict (in private-schema field
/// order) for the algorithm `options` selects.
pub fn generate_private_params(options: &GenerateOptions) -> Result<ValuesDict> {
    match options {
        GenerateOptions::Ed25519 => Ok(ed25519::generate_private_params()),
        GenerateOptions::Rsa { key_size, public_exponent } => {
            rsa::generate_private_params(*key_size, *public_exponent)
        }
        GenerateOptions::Dsa { key_size } => dsa::generate_private_params(*key_size),
        GenerateOptions::Ecdsa { curve } => ecdsa::generate_private_params(*curve),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_round_trips_key_type_strings() {
        for alg in [
            Algorithm::Ed25519,
            Algorithm::Rsa,
            Algorithm::Dsa,
            Algorithm::EcdsaP256,
            Algorithm::EcdsaP384,
            Algorithm::EcdsaP521,
        ] {
            assert_eq!(Algorithm::from_key_type(alg.key_type()).unwrap(), alg);
        }
    }

    #[test]
    fn unknown_key_type_errors() {
        let err = Algorithm::from_key_type("ssh-made-up").unwrap_err();
        assert!(matches!(err, Error::UnknownAlgorithm(_)));
    }
}
