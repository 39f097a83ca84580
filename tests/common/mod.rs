#![allow(dead_code)]

use rope_bytestring::{RopeByteString, RopeOptions};

/// `0, 1, 2, ...` wrapping at 256.
pub fn sequential(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

pub fn chunked(data: &[u8], chunk_size: usize) -> RopeByteString {
    RopeByteString::with_options(data, &RopeOptions::new().with_chunk_size(chunk_size))
}

pub fn balanced(data: &[u8]) -> RopeByteString {
    RopeByteString::with_options(data, &RopeOptions::new().with_maintain_balance(true))
}

/// Concatenates `count` two-byte fragments left to right.
pub fn fragments(count: usize, maintain_balance: bool) -> (RopeByteString, Vec<u8>) {
    let options = RopeOptions::new().with_maintain_balance(maintain_balance);
    let mut rope = RopeByteString::with_options(&[], &options);
    let mut expected = Vec::with_capacity(count * 2);

    for i in 0..count {
        let fragment = [(i % 256) as u8, (i * 7 % 256) as u8];
        rope = rope.concat(&RopeByteString::with_options(&fragment, &options));
        expected.extend_from_slice(&fragment);
    }

    (rope, expected)
}
