use std::sync::Arc;

use crate::error::{check_range, Result};
use crate::util::node::Node;

/// Leaf size used when no chunk size is given or the given one is out of range.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Largest accepted chunk size.
pub const MAX_CHUNK_SIZE: usize = 8192;

/// Out-of-range chunk sizes fall back to [`DEFAULT_CHUNK_SIZE`].
pub fn normalize_chunk_size(chunk_size: usize) -> usize {
    if (1..=MAX_CHUNK_SIZE).contains(&chunk_size) {
        chunk_size
    } else {
        DEFAULT_CHUNK_SIZE
    }
}

/// Cuts `data[start..end]` into leaves of at most `chunk_size` bytes, each owning its bytes.
pub(crate) fn split_into_chunks(
    data: &[u8],
    start: usize,
    end: usize,
    chunk_size: usize,
) -> Result<Vec<Arc<Node>>> {
    check_range(start, end, data.len())?;

    Ok(chunk_leaves(&data[start..end], chunk_size))
}

/// Infallible form of [`split_into_chunks`] over a whole buffer.
pub(crate) fn chunk_leaves(data: &[u8], chunk_size: usize) -> Vec<Arc<Node>> {
    let chunk_size = normalize_chunk_size(chunk_size);
    let leaves: Vec<_> = data.chunks(chunk_size).map(Node::new_leaf).collect();

    tracing::trace!(
        len = data.len(),
        chunk_size,
        leaves = leaves.len(),
        "split into chunks"
    );
    leaves
}

/// Builds a perfectly balanced tree over `nodes`, preserving their order.
pub(crate) fn merge(nodes: &[Arc<Node>]) -> Arc<Node> {
    match nodes {
        [] => Node::empty(),
        [node] => node.clone(),
        _ => {
            let mid = nodes.len() / 2;
            Node::new_branch(merge(&nodes[..mid]), merge(&nodes[mid..]))
        }
    }
}
