mod common;

use pretty_assertions::assert_eq;
use rope_bytestring::{
    rope, RopeByteString, RopeError, RopeOptions, ToRopeByteString, DEFAULT_CHUNK_SIZE,
    MAX_CHUNK_SIZE,
};
use rstest::rstest;

use common::{chunked, sequential};

#[test]
fn test_empty_rope() {
    let rope = RopeByteString::new();
    assert_eq!(rope.len(), 0);
    assert!(rope.is_empty());
    assert!(!rope.is_not_empty());
    assert_eq!(rope.indices(), 0..0);
    assert_eq!(rope.to_string(), "RopeByteString(size=0)");
    assert_eq!(RopeByteString::default(), rope);
}

#[test]
fn test_from_byte_values() {
    let rope = rope![1, 2, 3, 4, 5];
    assert_eq!(rope.len(), 5);
    assert_eq!(rope.get(0), Ok(1));
    assert_eq!(rope.get(4), Ok(5));
    assert!(rope.is_not_empty());
}

#[rstest]
#[case(1)]
#[case(DEFAULT_CHUNK_SIZE - 1)]
#[case(DEFAULT_CHUNK_SIZE)]
#[case(DEFAULT_CHUNK_SIZE + 1)]
#[case(3 * DEFAULT_CHUNK_SIZE + 17)]
fn test_size_matches_input(#[case] len: usize) {
    let data = sequential(len);
    assert_eq!(RopeByteString::from_bytes(&data).len(), len);
    assert_eq!(RopeByteString::from(data.clone()).len(), len);
    assert_eq!(data.to_rope_byte_string(DEFAULT_CHUNK_SIZE).len(), len);
}

#[test]
fn test_custom_chunk_size() {
    let data = sequential(2000);
    let rope = chunked(&data, 500);
    assert_eq!(rope.len(), 2000);
    assert_eq!(rope.leaf_count(), 4);
    assert_eq!(rope.get(0), Ok(0));
    assert_eq!(rope.get(200), Ok(200));
}

#[rstest]
#[case(0)]
#[case(MAX_CHUNK_SIZE + 1)]
#[case(usize::MAX)]
fn test_invalid_chunk_size_falls_back_to_default(#[case] chunk_size: usize) {
    let data = sequential(DEFAULT_CHUNK_SIZE * 2 + 5);
    let rope = data.to_rope_byte_string(chunk_size);
    assert_eq!(rope.leaf_count(), 3);
    assert_eq!(rope.to_vec(), data);
}

#[test]
fn test_from_slice_range() {
    let data = sequential(100);
    let options = RopeOptions::new().with_chunk_size(8);
    let rope = RopeByteString::from_slice(&data, 10, 60, &options).unwrap();
    assert_eq!(rope.len(), 50);
    assert_eq!(rope.to_vec(), data[10..60].to_vec());
    assert_eq!(rope.leaf_count(), 7);
}

#[test]
fn test_from_slice_empty_range() {
    let data = sequential(10);
    let options = RopeOptions::default();
    let rope = RopeByteString::from_slice(&data, 4, 4, &options).unwrap();
    assert!(rope.is_empty());
}

#[test]
fn test_from_slice_rejects_bad_ranges() {
    let data = sequential(10);
    let options = RopeOptions::default();

    let err = RopeByteString::from_slice(&data, 6, 5, &options).unwrap_err();
    assert_eq!(err, RopeError::InvalidRange { start: 6, end: 5 });
    assert!(err.is_invalid_argument());

    let err = RopeByteString::from_slice(&data, 0, 11, &options).unwrap_err();
    assert_eq!(err, RopeError::EndOutOfBounds { end: 11, size: 10 });
    assert!(err.is_range_error());
}

#[test]
fn test_from_iterator_and_arrays() {
    let collected: RopeByteString = (1..=3u8).collect();
    assert_eq!(collected, RopeByteString::from(b"\x01\x02\x03"));
    assert_eq!(collected, RopeByteString::from(&[1u8, 2, 3][..]));
}

#[test]
fn test_to_rope_byte_string_empty() {
    let empty: &[u8] = &[];
    assert!(empty.to_rope_byte_string(DEFAULT_CHUNK_SIZE).is_empty());
}

#[test]
fn test_chunking_is_not_observable() {
    let data = sequential(5000);
    let a = chunked(&data, 7);
    let b = chunked(&data, 4096);

    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());
    assert_eq!(a.to_string(), b.to_string());
}

#[rstest]
#[case(&[0xab], "RopeByteString(size=1 hex=ab)")]
#[case(&[1, 2, 3], "RopeByteString(size=3 hex=010203)")]
#[case(&[0x00, 0xff, 0x7f, 0x80, 0xa5], "RopeByteString(size=5 hex=00ff7f80a5)")]
#[case("Hello, 世界".as_bytes(), "RopeByteString(size=13 hex=48656c6c6f2c20e4b896e7958c)")]
fn test_to_string(#[case] bytes: &[u8], #[case] expected: &str) {
    assert_eq!(RopeByteString::from_bytes(bytes).to_string(), expected);
    assert_eq!(format!("{:?}", RopeByteString::from_bytes(bytes)), expected);
}

#[test]
fn test_to_string_is_untruncated() {
    let size = DEFAULT_CHUNK_SIZE + 10;
    let rope = rope![0x41; size];
    let expected = format!("RopeByteString(size={} hex={})", size, "41".repeat(size));
    assert_eq!(rope.to_string(), expected);
}

#[test]
fn test_to_string_concatenated() {
    let rope = rope![1, 2] + rope![3, 4];
    assert_eq!(rope.to_string(), "RopeByteString(size=4 hex=01020304)");
}
