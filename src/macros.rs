/// Builds a [`RopeByteString`](crate::RopeByteString) from literal byte values.
///
/// ```
/// use rope_bytestring::rope;
///
/// let empty = rope![];
/// let abc = rope![0x61, 0x62, 0x63];
/// let zeros = rope![0; 2048];
///
/// assert!(empty.is_empty());
/// assert!(abc.starts_with(b"ab"));
/// assert_eq!(zeros.len(), 2048);
/// ```
#[macro_export]
macro_rules! rope {
    () => {
        $crate::RopeByteString::new()
    };

    ($byte:expr; $count:expr) => {{
        let bytes: ::std::vec::Vec<u8> = ::std::vec![$byte; $count];
        $crate::RopeByteString::from_bytes(&bytes)
    }};

    ($($byte:expr),+ $(,)?) => {
        $crate::RopeByteString::from_bytes(&[$($byte),+])
    };
}
