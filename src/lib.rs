//! Persistent rope of bytes: O(1) concatenation, structurally shared
//! substrings and cached sequential access over an immutable chunk tree.

#[macro_use]
mod macros;

mod error;
mod options;
mod rope;
mod util;

pub use crate::error::{Result, RopeError};
pub use crate::options::RopeOptions;
pub use crate::rope::{Bytes, RopeByteString, ToRopeByteString};
pub use crate::util::chunks::{normalize_chunk_size, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
