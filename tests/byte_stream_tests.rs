// tests/byte_stream_tests.rs
//
// Black-box coverage of the length-prefixed codec: round-trips and
// truncation behavior, from the outside of the crate.

use openssh_keys_rs::byte_stream::{ByteStreamReader, ByteStreamWriter, Mpint};
use openssh_keys_rs::Error;

#[test]
fn mpint_canonicalization_round_trips_across_a_range_of_integers() {
    let magnitudes: &[&[u8]] = &[&[], &[0x01], &[0x7F], &[0x80], &[0xFF], &[0x01, 0x00, 0x00]];
    for magnitude in magnitudes {
        for negative in [false, true] {
            let original = Mpint::from_sign_magnitude(negative, magnitude.to_vec());
            let wire = original.to_twos_complement();
            let decoded = Mpint::from_twos_complement(&wire);
            assert_eq!(decoded, original);
        }
    }
}

#[test]
fn fixed_fields_and_strings_round_trip_through_a_writer_and_reader() {
    let mut writer = ByteStreamWriter::new();
    writer.write_u32(0xDEAD_BEEF);
    writer.write_i32(-7);
    writer.write_string("ssh-ed25519");
    writer.write_bytes(&[1, 2, 3, 4, 5]);
    let bytes = writer.into_bytes();

    let mut reader = ByteStreamReader::new(&bytes);
    assert_eq!(reader.read_u32(None).unwrap(), 0xDEAD_BEEF);
    assert_eq!(reader.read_i32(None).unwrap(), -7);
    assert_eq!(reader.read_string(None).unwrap(), "ssh-ed25519");
    assert_eq!(reader.read_bytes(None).unwrap(), vec![1, 2, 3, 4, 5]);
    assert!(reader.at_end());
}

#[test]
fn reading_past_the_end_fails_truncated() {
    let mut reader = ByteStreamReader::new(&[0, 0, 0, 10, 1, 2, 3]);
    let err = reader.read_bytes(Some("blob")).unwrap_err();
    assert!(matches!(err, Error::Truncated { field: Some("blob"), .. }));
}

#[test]
fn invalid_utf8_in_a_string_field_fails() {
    let mut writer = ByteStreamWriter::new();
    writer.write_bytes(&[0xFF, 0xFE]);
    let bytes = writer.into_bytes();
    let mut reader = ByteStreamReader::new(&bytes);
    let err = reader.read_string(None).unwrap_err();
    assert!(matches!(err, Error::InvalidUtf8 { .. }));
}
