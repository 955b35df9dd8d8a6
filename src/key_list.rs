// src/key_list.rs
//
// The `openssh-key-v1` envelope: N (public, private) key pairs bound
// under one cipher/KDF pair, with check-int consistency and padding.
// Control flow for a read is outer PEM/base64 decode (external, see
// `pem.rs`) -> envelope parse -> KDF derive -> cipher decrypt -> inner
// parse -> per-key parameter decode -> invariant checks. Write reverses
// the pipeline.

use rand::RngCore;
use zeroize::Zeroizing;

use crate::byte_stream::{ByteStreamReader, ByteStreamWriter, ValuesDict};
use crate::cipher::CipherAlgorithm;
use crate::error::{Error, Parsed, Result};
use crate::kdf::KdfAlgorithm;
use crate::private_key::PrivateKey;
use crate::public_key::PublicKey;

pub const AUTH_MAGIC: &[u8; 15] = b"openssh-key-v1\0";

/// One (public, private) key pair, consistent by construction once
/// validated by `PrivateKeyList::parse`.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

/// The parsed, decrypted contents of an `openssh-key-v1` container.
#[derive(Debug, Clone)]
pub struct PrivateKeyList {
    pub cipher: CipherAlgorithm,
    pub kdf: KdfAlgorithm,
    pub kdf_options: ValuesDict,
    pub pairs: Vec<KeyPair>,
}

/// Supplies a passphrase on demand. Invoked at most once, and only when
/// the envelope's cipher is not `none` — callers are never asked for a
/// passphrase to read an unencrypted file.
pub type PassphraseProvider<'a> = &'a mut dyn FnMut() -> Result<Zeroizing<String>>;

impl PrivateKeyList {
    pub fn parse(data: &[u8], passphrase_provider: PassphraseProvider) -> Result<Parsed<Self>> {
        let mut reader = ByteStreamReader::new(data);
        let mut warnings = Vec::new();

        let magic = reader.read_exact(AUTH_MAGIC.len(), Some("auth_magic"))?;
        if magic != AUTH_MAGIC.as_slice() {
            return Err(Error::BadMagic);
        }

        let cipher_name = reader.read_string(Some("cipher"))?;
        let kdf_name = reader.read_string(Some("kdf"))?;
        let kdf_options_bytes = reader.read_framed_sub_stream(Some("kdf_options"))?;
        let num_keys = reader.read_i32(Some("num_keys"))?;

        if num_keys < 0 {
            return Err(Error::Malformed(format!("num_keys is negative: {num_keys}")));
        }
        let num_keys = num_keys as usize;

        if (cipher_name == "none") != (kdf_name == "none") {
            return Err(Error::Malformed(
                "cipher and KDF must both be 'none' or both be something else".into(),
            ));
        }

        let cipher = CipherAlgorithm::from_name(&cipher_name)?;
        let kdf = KdfAlgorithm::from_name(&kdf_name)?;
        let kdf_options = {
            let mut sub = ByteStreamReader::new(&kdf_options_bytes);
            let values = sub.read_from_format_instructions_dict(kdf.options_format_instructions_dict())?;
            if !sub.at_end() {
                return Err(Error::Malformed("trailing bytes in kdf_options".into()));
            }
            values
        };

        let mut public_keys = Vec::with_capacity(num_keys);
        for _ in 0..num_keys {
            let framed = reader.read_framed_sub_stream(Some("public_key"))?;
            let mut sub = ByteStreamReader::new(&framed);
            let parsed = PublicKey::from_byte_stream(&mut sub)?;
            warnings.extend(parsed.warnings);
            public_keys.push(parsed.value);
        }

        let encrypted_payload = reader.read_framed_sub_stream(Some("encrypted_payload"))?;
        if encrypted_payload.len() % cipher.block_size() != 0 {
            return Err(Error::InvalidPadding(format!(
                "encrypted payload length {} is not a multiple of the block size {}",
                encrypted_payload.len(),
                cipher.block_size()
            )));
        }

        let plaintext = if cipher.is_none() {
            encrypted_payload
        } else {
            let passphrase = passphrase_provider()?;
            let (derived, kdf_warnings) = kdf.derive(&passphrase, &kdf_options)?;
            warnings.extend(kdf_warnings);
            cipher.decrypt(&derived.cipher_key, &derived.initialization_vector, &encrypted_payload)?
        };

        let mut inner = ByteStreamReader::new(&plaintext);
        let check_int_1 = inner.read_u32(Some("check_int_1"))?;
        let check_int_2 = inner.read_u32(Some("check_int_2"))?;
        if check_int_1 != check_int_2 {
            return Err(Error::BadPassphraseOrCorrupt);
        }

        let mut pairs = Vec::with_capacity(num_keys);
        for (index, public) in public_keys.into_iter().enumerate() {
            let parsed = PrivateKey::from_byte_stream(&mut inner)?;
            warnings.extend(parsed.warnings);
            let private = parsed.value;

            if private.key_type() != public.key_type() {
                return Err(Error::InconsistentKeyPair { index });
            }
            if private.public_params() != public.params {
                return Err(Error::InconsistentKeyPair { index });
            }

            pairs.push(KeyPair { public, private });
        }

        let padding = inner.remaining_bytes();
        for (i, &b) in padding.iter().enumerate() {
            let expected = (i + 1) as u8;
            if b != expected {
                return Err(Error::InvalidPadding(format!(
                    "padding byte at offset {i} is {b}, expected {expected}"
                )));
            }
        }
        if padding.len() >= cipher.block_size().max(1) {
            return Err(Error::InvalidPadding("padding is at least one full block".into()));
        }

        Ok(Parsed::with_warnings(
            PrivateKeyList { cipher, kdf, kdf_options, pairs },
            warnings,
        ))
    }

    /// Serializes `pairs` under `cipher`/`kdf`, deriving a cipher key and
    /// IV from `passphrase` (ignored when `cipher` is `none`). Generates
    /// fresh `kdf_options` when none are supplied.
    pub fn pack(
        pairs: &[KeyPair],
        passphrase: Option<&str>,
        cipher: CipherAlgorithm,
        kdf: KdfAlgorithm,
        kdf_options: Option<ValuesDict>,
    ) -> Result<Vec<u8>> {
        if cipher.is_none() != matches!(kdf, KdfAlgorithm::None) {
            return Err(Error::Malformed(
                "cipher and KDF must both be 'none' or both be something else".into(),
            ));
        }

        let kdf_options = kdf_options.unwrap_or_else(|| kdf.generate_options(None, None));

        let (cipher_key, iv) = if cipher.is_none() {
            (Zeroizing::new(Vec::new()), Zeroizing::new(Vec::new()))
        } else {
            let passphrase = passphrase.unwrap_or("");
            let (derived, _warnings) = kdf.derive(passphrase, &kdf_options)?;
            (derived.cipher_key, derived.initialization_vector)
        };

        let mut inner = ByteStreamWriter::new();
        let check_int = rand::rngs::OsRng.next_u32();
        inner.write_u32(check_int);
        inner.write_u32(check_int);
        for pair in pairs {
            pair.private.to_byte_stream(&mut inner)?;
        }
        let mut plaintext = inner.into_bytes();

        let block_size = cipher.block_size();
        let remainder = plaintext.len() % block_size;
        if remainder != 0 {
            let pad_len = block_size - remainder;
            for i in 1..=pad_len {
                plaintext.push(i as u8);
            }
        }

        let ciphertext = cipher.encrypt(&cipher_key, &iv, &plaintext)?;

        let mut outer = ByteStreamWriter::new();
        outer.write_raw(AUTH_MAGIC.as_slice());
        outer.write_string(cipher.name());
        outer.write_string(kdf.name());
        let mut options_writer = ByteStreamWriter::new();
        options_writer.write_from_format_instructions_dict(kdf.options_format_instructions_dict(), &kdf_options)?;
        outer.write_framed(&options_writer.into_bytes());
        outer.write_i32(pairs.len() as i32);

        for pair in pairs {
            let mut public_writer = ByteStreamWriter::new();
            pair.public.to_byte_stream(&mut public_writer)?;
            outer.write_framed(&public_writer.into_bytes());
        }
        outer.write_framed(&ciphertext);

        Ok(outer.into_bytes())
    }
}
