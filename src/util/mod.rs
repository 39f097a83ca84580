pub(crate) mod cache;
pub(crate) mod chunks;
pub(crate) mod leaves;
pub(crate) mod node;

pub(crate) use self::cache::AccessCache;
pub(crate) use self::chunks::{chunk_leaves, merge, split_into_chunks, DEFAULT_CHUNK_SIZE};
pub(crate) use self::leaves::{chunks as chunks_of, Leaves};
pub(crate) use self::node::Node;
