// tests/kdf_tests.rs

use openssh_keys_rs::kdf::KdfAlgorithm;
use openssh_keys_rs::Error;

#[test]
fn none_kdf_derives_empty_key_and_iv() {
    let (result, warnings) = KdfAlgorithm::None.derive("", &Vec::new()).unwrap();
    assert!(result.cipher_key.is_empty());
    assert!(result.initialization_vector.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn bcrypt_derivation_is_deterministic_given_the_same_options() {
    let options = KdfAlgorithm::Bcrypt.generate_options(Some(16), Some(4));
    let (a, _) = KdfAlgorithm::Bcrypt.derive("correct horse battery staple", &options).unwrap();
    let (b, _) = KdfAlgorithm::Bcrypt.derive("correct horse battery staple", &options).unwrap();
    assert_eq!(*a.cipher_key, *b.cipher_key);
    assert_eq!(*a.initialization_vector, *b.initialization_vector);
    assert_eq!(a.cipher_key.len(), 32);
    assert_eq!(a.initialization_vector.len(), 16);
}

#[test]
fn bcrypt_derivation_differs_across_passphrases() {
    let options = KdfAlgorithm::Bcrypt.generate_options(Some(16), Some(4));
    let (a, _) = KdfAlgorithm::Bcrypt.derive("hunter2", &options).unwrap();
    let (b, _) = KdfAlgorithm::Bcrypt.derive("hunter3", &options).unwrap();
    assert_ne!(*a.cipher_key, *b.cipher_key);
}

#[test]
fn empty_passphrase_is_accepted_with_a_warning_not_an_error() {
    let options = KdfAlgorithm::Bcrypt.generate_options(Some(16), Some(4));
    let (_, warnings) = KdfAlgorithm::Bcrypt.derive("", &options).unwrap();
    assert_eq!(warnings.len(), 1);
}

#[test]
fn unknown_kdf_name_is_rejected() {
    let err = KdfAlgorithm::from_name("scrypt").unwrap_err();
    assert!(matches!(err, Error::UnknownKdf(_)));
}
