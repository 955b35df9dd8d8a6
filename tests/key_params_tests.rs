// tests/key_params_tests.rs
//
// Per-algorithm generation and public/private projection, exercised
// through the crate's public API only.

use openssh_keys_rs::key_params::ecdsa::Curve;
use openssh_keys_rs::key_params::{generate_private_params, Algorithm, GenerateOptions};
use openssh_keys_rs::public_key::PublicKey;
use openssh_keys_rs::Error;

fn round_trip_public_projection(algorithm: Algorithm, options: GenerateOptions) {
    let private_params = generate_private_params(&options).unwrap();
    let public_params = algorithm.project_to_public(&private_params);

    let public_key = PublicKey::new(algorithm, public_params.clone());
    let bytes = public_key.to_bytes().unwrap();

    let mut reader = openssh_keys_rs::byte_stream::ByteStreamReader::new(&bytes);
    let parsed = PublicKey::from_byte_stream(&mut reader).unwrap();
    assert!(reader.at_end());
    assert_eq!(parsed.value.params, public_params);
    assert!(parsed.warnings.is_empty());
}

#[test]
fn ed25519_generated_key_has_a_32_byte_public_component() {
    let params = generate_private_params(&GenerateOptions::Ed25519).unwrap();
    let public = openssh_keys_rs::byte_stream::get(&params, "public").unwrap();
    assert_eq!(public.as_bytes().unwrap().len(), 32);
    round_trip_public_projection(Algorithm::Ed25519, GenerateOptions::Ed25519);
}

#[test]
fn rsa_projects_only_e_and_n_to_the_public_record() {
    round_trip_public_projection(
        Algorithm::Rsa,
        GenerateOptions::Rsa { key_size: 1024, public_exponent: 65537 },
    );
}

#[test]
fn dsa_projects_p_q_g_y_to_the_public_record() {
    round_trip_public_projection(Algorithm::Dsa, GenerateOptions::Dsa { key_size: 1024 });
}

#[test]
fn ecdsa_round_trips_for_all_three_curves() {
    for curve in [Curve::P256, Curve::P384, Curve::P521] {
        round_trip_public_projection(curve.algorithm(), GenerateOptions::Ecdsa { curve });
    }
}

#[test]
fn unknown_key_type_string_is_rejected() {
    let err = Algorithm::from_key_type("ssh-not-a-real-algorithm").unwrap_err();
    assert!(matches!(err, Error::UnknownAlgorithm(_)));
}
