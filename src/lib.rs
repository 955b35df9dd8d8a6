// src/lib.rs
//
// `openssh-keys-rs`: read, write, and generate OpenSSH public and
// private key material. No SSH transport, no signing — just the wire
// formats described in the `openssh-key-v1` container and the
// `authorized_keys`/`.pub` line format.
//
// Module order below follows the dependency order the codec is built
// in: the byte-stream primitives at the bottom, the envelope and text
// forms at the top.

pub mod byte_stream;
pub mod cipher;
pub mod error;
pub mod kdf;
pub mod key_list;
pub mod key_params;
pub mod pem;
pub mod private_key;
pub mod public_key;

pub use byte_stream::{ByteStreamReader, ByteStreamWriter, Mpint, Value, ValuesDict};
pub use error::{Error, Parsed, Result, Warning};
pub use key_list::{KeyPair, PassphraseProvider, PrivateKeyList};
pub use key_params::{Algorithm, GenerateOptions};
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
