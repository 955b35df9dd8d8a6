// src/private_key.rs
//
// A private-key record: `{header: {key_type}, params: PrivateKeyParams,
// footer: {comment}}`.

use crate::byte_stream::{ByteStreamReader, ByteStreamWriter, ValuesDict};
use crate::error::{Parsed, Result};
use crate::key_params::Algorithm;

#[derive(Debug, Clone)]
pub struct PrivateKey {
    pub algorithm: Algorithm,
    pub params: ValuesDict,
    pub comment: String,
}

impl PrivateKey {
    pub fn new(algorithm: Algorithm, params: ValuesDict, comment: String) -> Self {
        PrivateKey { algorithm, params, comment }
    }

    pub fn key_type(&self) -> &'static str {
        self.algorithm.key_type()
    }

    pub fn from_byte_stream(reader: &mut ByteStreamReader) -> Result<Parsed<Self>> {
        let key_type = reader.read_string(Some("key_type"))?;
        let algorithm = Algorithm::from_key_type(&key_type)?;
        let params = reader.read_from_format_instructions_dict(algorithm.private_format_instructions_dict())?;
        let comment = reader.read_string(Some("comment"))?;
        let warnings = algorithm.check_private_params(&params)?;
        Ok(Parsed::with_warnings(
            PrivateKey { algorithm, params, comment },
            warnings,
        ))
    }

    pub fn to_byte_stream(&self, writer: &mut ByteStreamWriter) -> Result<()> {
        writer.write_string(self.key_type());
        writer.write_from_format_instructions_dict(self.algorithm.private_format_instructions_dict(), &self.params)?;
        writer.write_string(&self.comment);
        Ok(())
    }

    pub fn public_params(&self) -> ValuesDict {
        self.algorithm.project_to_public(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_params::{generate_private_params, GenerateOptions};

    #[test]
    fn round_trips_private_key_with_comment() {
        let params = generate_private_params(&GenerateOptions::Ed25519).unwrap();
        let key = PrivateKey::new(Algorithm::Ed25519, params, "user@host".to_string());

        let mut writer = crate::byte_stream::ByteStreamWriter::new();
        key.to_byte_stream(&mut writer).unwrap();
        let bytes = writer.into_bytes();

        let mut reader = ByteStreamReader::new(&bytes);
        let parsed = PrivateKey::from_byte_stream(&mut reader).unwrap();

        assert!(reader.at_end());
        assert_eq!(parsed.value.comment, "user@host");
        assert_eq!(parsed.value.params, key.params);
    }
}
