// src/public_key.rs
//
// A public-key record: `{header: {key_type}, params: PublicKeyParams,
// footer: {}}`. The algorithm is determined entirely by `header.key_type`.

use crate::byte_stream::{ByteStreamReader, ByteStreamWriter, ValuesDict};
use crate::error::{Parsed, Result};
use crate::key_params::Algorithm;

#[derive(Debug, Clone)]
pub struct PublicKey {
    pub algorithm: Algorithm,
    pub params: ValuesDict,
}

impl PublicKey {
    pub fn new(algorithm: Algorithm, params: ValuesDict) -> Self {
        PublicKey { algorithm, params }
    }

    pub fn key_type(&self) -> &'static str {
        self.algorithm.key_type()
    }

    /// Parses a public-key record from the current stream position. The
    /// caller owns whatever bytes remain afterward.
    pub fn from_byte_stream(reader: &mut ByteStreamReader) -> Result<Parsed<Self>> {
        let key_type = reader.read_string(Some("key_type"))?;
        let algorithm = Algorithm::from_key_type(&key_type)?;
        let params = reader.read_from_format_instructions_dict(algorithm.public_format_instructions_dict())?;
        let warnings = algorithm.check_public_params(&params)?;
        Ok(Parsed::with_warnings(PublicKey { algorithm, params }, warnings))
    }

    pub fn to_byte_stream(&self, writer: &mut ByteStreamWriter) -> Result<()> {
        writer.write_string(self.key_type());
        writer.write_from_format_instructions_dict(self.algorithm.public_format_instructions_dict(), &self.params)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = ByteStreamWriter::new();
        self.to_byte_stream(&mut writer)?;
        Ok(writer.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_params::{generate_private_params, GenerateOptions};

    #[test]
    fn round_trips_ed25519_public_key() {
        let private = generate_private_params(&GenerateOptions::Ed25519).unwrap();
        let public_params = Algorithm::Ed25519.project_to_public(&private);
        let key = PublicKey::new(Algorithm::Ed25519, public_params.clone());

        let bytes = key.to_bytes().unwrap();
        let mut reader = ByteStreamReader::new(&bytes);
        let parsed = PublicKey::from_byte_stream(&mut reader).unwrap();

        assert!(reader.at_end());
        assert_eq!(parsed.value.algorithm, key.algorithm);
        assert_eq!(parsed.value.params, public_params);
        assert!(parsed.warnings.is_empty());
    }
}
