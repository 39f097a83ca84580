//! Immutable byte sequence stored as a binary tree of chunks.
//!
//! Concatenation and substring share existing subtrees instead of copying
//! bytes; only a partially covered leaf is ever sliced. Reads go through a
//! single-slot cache that remembers the last leaf touched, so sequential scans
//! only descend the tree once per leaf.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::{Add, AddAssign, Range};
use std::sync::atomic::{self, AtomicI32};
use std::sync::Arc;

use crate::error::{check_range, Result, RopeError};
use crate::options::RopeOptions;
use crate::util::{
    chunk_leaves, chunks_of, merge, split_into_chunks, AccessCache, Leaves, Node,
    DEFAULT_CHUNK_SIZE,
};

pub struct RopeByteString {
    root: Arc<Node>,
    maintain_balance: bool,
    // 0 until first computed; a genuine hash of 0 is simply recomputed
    hash: AtomicI32,
    cache: AccessCache,
}

impl RopeByteString {
    pub fn new() -> Self {
        Self::from_node(Node::empty(), false)
    }

    pub(crate) fn from_node(root: Arc<Node>, maintain_balance: bool) -> Self {
        Self {
            root,
            maintain_balance,
            hash: AtomicI32::new(0),
            cache: AccessCache::new(),
        }
    }

    /// Builds a rope from explicit byte values.
    ///
    /// Inputs up to [`DEFAULT_CHUNK_SIZE`] bytes become a single leaf.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            Self::new()
        } else if bytes.len() <= DEFAULT_CHUNK_SIZE {
            Self::from_node(Node::new_leaf(bytes), false)
        } else {
            Self::with_options(bytes, &RopeOptions::default())
        }
    }

    /// Builds a rope over `data[start..end]`.
    ///
    /// An out-of-range chunk size is silently replaced by the default. Fails
    /// with [`RopeError::InvalidRange`] when `start > end` and with
    /// [`RopeError::EndOutOfBounds`] when `end > data.len()`.
    pub fn from_slice(
        data: &[u8],
        start: usize,
        end: usize,
        options: &RopeOptions,
    ) -> Result<Self> {
        let leaves = split_into_chunks(data, start, end, options.chunk_size)?;
        Ok(Self::from_node(merge(&leaves), options.maintain_balance))
    }

    /// Builds a rope over all of `data`.
    pub fn with_options(data: &[u8], options: &RopeOptions) -> Self {
        Self::from_node(
            merge(&chunk_leaves(data, options.chunk_size)),
            options.maintain_balance,
        )
    }

    pub fn len(&self) -> usize {
        self.root.weight()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Range of valid byte indices.
    pub fn indices(&self) -> Range<usize> {
        0..self.len()
    }

    /// Longest root-to-leaf path, counting the leaf.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn maintains_balance(&self) -> bool {
        self.maintain_balance
    }

    pub fn leaf_count(&self) -> usize {
        Leaves::new(&self.root).count()
    }

    /// Joins `self` and `other` under a new branch.
    ///
    /// The result maintains balance if either operand does; in that case an
    /// unbalanced root is rebuilt with [`rebalance`](Self::rebalance).
    pub fn concat(&self, other: &Self) -> Self {
        let root = Node::new_branch(self.root.clone(), other.root.clone());
        Self::with_balance_check(root, self.maintain_balance || other.maintain_balance)
    }

    /// Bytes `start..end` as a new rope sharing every fully covered subtree.
    pub fn substring(&self, start: usize, end: usize) -> Result<Self> {
        check_range(start, end, self.len())?;
        if start == end {
            return Ok(Self::new());
        }

        let root = slice_node(&self.root, start, end);
        Ok(Self::with_balance_check(root, self.maintain_balance))
    }

    pub fn substring_from(&self, start: usize) -> Result<Self> {
        self.substring(start, self.len())
    }

    pub fn get(&self, index: usize) -> Result<u8> {
        if index >= self.len() {
            return Err(RopeError::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(self.byte_at(index))
    }

    /// Copies bytes `start..end` into a new buffer.
    pub fn to_byte_array(&self, start: usize, end: usize) -> Result<Vec<u8>> {
        check_range(start, end, self.len())?;
        Ok((start..end).map(|i| self.byte_at(i)).collect())
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes().collect()
    }

    pub fn bytes(&self) -> Bytes<'_> {
        Bytes {
            rope: self,
            range: self.indices(),
        }
    }

    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        prefix.len() <= self.len() && self.range_equals(0, prefix)
    }

    pub fn ends_with(&self, suffix: &[u8]) -> bool {
        suffix.len() <= self.len() && self.range_equals(self.len() - suffix.len(), suffix)
    }

    pub fn starts_with_rope(&self, prefix: &Self) -> bool {
        match prefix.len().cmp(&self.len()) {
            Ordering::Greater => false,
            Ordering::Equal => self == prefix,
            Ordering::Less => self.range_equals_rope(0, prefix),
        }
    }

    pub fn ends_with_rope(&self, suffix: &Self) -> bool {
        match suffix.len().cmp(&self.len()) {
            Ordering::Greater => false,
            Ordering::Equal => self == suffix,
            Ordering::Less => self.range_equals_rope(self.len() - suffix.len(), suffix),
        }
    }

    /// Rebuilds the tree as a perfectly balanced one over the same leaves.
    ///
    /// The returned rope never maintains balance, whatever `self` requested.
    pub fn rebalance(&self) -> Self {
        let leaves: Vec<_> = Leaves::new(&self.root).cloned().collect();
        let root = merge(&leaves);

        tracing::debug!(
            leaves = leaves.len(),
            depth_before = self.depth(),
            depth_after = root.depth(),
            "rebalanced rope"
        );

        Self::from_node(root, false)
    }

    /// Content hash: `h = 1; h = 31 * h + b` over the bytes read as signed values, computed once.
    pub fn hash_code(&self) -> i32 {
        let cached = self.hash.load(atomic::Ordering::Relaxed);
        if cached != 0 {
            return cached;
        }

        let mut hc = 1i32;
        for b in self.bytes() {
            hc = hc.wrapping_mul(31).wrapping_add(b as i8 as i32);
        }
        self.hash.store(hc, atomic::Ordering::Relaxed);
        hc
    }

    fn with_balance_check(root: Arc<Node>, maintain_balance: bool) -> Self {
        if !maintain_balance || root.is_balanced() {
            return Self::from_node(root, maintain_balance);
        }

        tracing::debug!(
            size = root.weight(),
            depth = root.depth(),
            "root out of balance"
        );
        Self::from_node(root, true).rebalance()
    }

    /// Caller guarantees `index < self.len()`.
    fn byte_at(&self, index: usize) -> u8 {
        if let Some(byte) = self.cache.get(index) {
            return byte;
        }

        let mut node = &self.root;
        let mut offset = index;
        loop {
            match node.as_ref() {
                Node::Leaf { data } => {
                    self.cache.update(data, index, offset);
                    return data[offset];
                }
                Node::Branch { left, right, .. } => {
                    if offset < left.weight() {
                        node = left;
                    } else {
                        offset -= left.weight();
                        node = right;
                    }
                }
            }
        }
    }

    fn range_equals(&self, offset: usize, bytes: &[u8]) -> bool {
        bytes
            .iter()
            .enumerate()
            .all(|(i, &b)| self.byte_at(offset + i) == b)
    }

    fn range_equals_rope(&self, offset: usize, other: &Self) -> bool {
        other
            .indices()
            .all(|i| self.byte_at(offset + i) == other.byte_at(i))
    }
}

/// `node[start..end]`, reusing any subtree whose span matches exactly.
fn slice_node(root: &Arc<Node>, mut start: usize, mut end: usize) -> Arc<Node> {
    let mut node = root;
    loop {
        if node.weight() == end - start {
            return node.clone();
        }

        match node.as_ref() {
            Node::Leaf { data } => return Node::new_leaf(&data[start..end]),
            Node::Branch { left, right, .. } => {
                let split = left.weight();
                if end <= split {
                    node = left;
                } else if start >= split {
                    start -= split;
                    end -= split;
                    node = right;
                } else {
                    return Node::new_branch(
                        suffix_node(left, start),
                        prefix_node(right, end - split),
                    );
                }
            }
        }
    }
}

/// `node[start..]`, for `start < node.weight()`.
fn suffix_node(mut node: &Arc<Node>, mut start: usize) -> Arc<Node> {
    let mut kept = Vec::new();
    let mut tail = loop {
        if start == 0 {
            break node.clone();
        }

        match node.as_ref() {
            Node::Leaf { data } => break Node::new_leaf(&data[start..]),
            Node::Branch { left, right, .. } => {
                let split = left.weight();
                if start >= split {
                    start -= split;
                    node = right;
                } else if right.weight() == 0 {
                    node = left;
                } else {
                    kept.push(right);
                    node = left;
                }
            }
        }
    };

    for right in kept.into_iter().rev() {
        tail = Node::new_branch(tail, right.clone());
    }
    tail
}

/// `node[..end]`, for `0 < end`.
fn prefix_node(mut node: &Arc<Node>, mut end: usize) -> Arc<Node> {
    let mut kept = Vec::new();
    let mut head = loop {
        if node.weight() == end {
            break node.clone();
        }

        match node.as_ref() {
            Node::Leaf { data } => break Node::new_leaf(&data[..end]),
            Node::Branch { left, right, .. } => {
                let split = left.weight();
                if end <= split {
                    node = left;
                } else if split == 0 {
                    node = right;
                } else {
                    kept.push(left);
                    end -= split;
                    node = right;
                }
            }
        }
    };

    for left in kept.into_iter().rev() {
        head = Node::new_branch(left.clone(), head);
    }
    head
}

/// Iterator over the bytes of a rope, read through its access cache.
pub struct Bytes<'a> {
    rope: &'a RopeByteString,
    range: Range<usize>,
}

impl Iterator for Bytes<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.range.next().map(|i| self.rope.byte_at(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Bytes<'_> {
    fn next_back(&mut self) -> Option<u8> {
        self.range.next_back().map(|i| self.rope.byte_at(i))
    }
}

impl ExactSizeIterator for Bytes<'_> {}

impl FusedIterator for Bytes<'_> {}

/// Conversion of a flat buffer into a rope with a given chunk size.
pub trait ToRopeByteString {
    fn to_rope_byte_string(&self, chunk_size: usize) -> RopeByteString;
}

impl ToRopeByteString for [u8] {
    fn to_rope_byte_string(&self, chunk_size: usize) -> RopeByteString {
        RopeByteString::with_options(self, &RopeOptions::new().with_chunk_size(chunk_size))
    }
}

impl Default for RopeByteString {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RopeByteString {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            maintain_balance: self.maintain_balance,
            hash: AtomicI32::new(self.hash.load(atomic::Ordering::Relaxed)),
            cache: AccessCache::new(),
        }
    }
}

impl From<&[u8]> for RopeByteString {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<const N: usize> From<&[u8; N]> for RopeByteString {
    fn from(bytes: &[u8; N]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for RopeByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(&bytes)
    }
}

impl FromIterator<u8> for RopeByteString {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::from_bytes(&iter.into_iter().collect::<Vec<_>>())
    }
}

impl Add<&RopeByteString> for &RopeByteString {
    type Output = RopeByteString;

    fn add(self, other: &RopeByteString) -> RopeByteString {
        self.concat(other)
    }
}

impl Add for RopeByteString {
    type Output = RopeByteString;

    fn add(self, other: RopeByteString) -> RopeByteString {
        self.concat(&other)
    }
}

impl AddAssign<&RopeByteString> for RopeByteString {
    fn add_assign(&mut self, other: &RopeByteString) {
        *self = self.concat(other);
    }
}

impl PartialEq for RopeByteString {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) || Arc::ptr_eq(&self.root, &other.root) {
            return true;
        }

        if self.len() != other.len() {
            return false;
        }

        let hc = self.hash.load(atomic::Ordering::Relaxed);
        let other_hc = other.hash.load(atomic::Ordering::Relaxed);
        if hc != 0 && other_hc != 0 && hc != other_hc {
            return false;
        }

        self.indices().all(|i| self.byte_at(i) == other.byte_at(i))
    }
}

impl Eq for RopeByteString {}

impl Hash for RopeByteString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl PartialOrd for RopeByteString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Unsigned lexicographic order; a strict prefix sorts first.
impl Ord for RopeByteString {
    fn cmp(&self, other: &Self) -> Ordering {
        if std::ptr::eq(self, other) {
            return Ordering::Equal;
        }

        let shared = self.len().min(other.len());
        (0..shared)
            .map(|i| self.byte_at(i).cmp(&other.byte_at(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| self.len().cmp(&other.len()))
    }
}

impl fmt::Display for RopeByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("RopeByteString(size=0)");
        }

        let mut encoded = String::with_capacity(self.len() * 2);
        for chunk in chunks_of(&self.root) {
            encoded.push_str(&hex::encode(chunk));
        }

        write!(f, "RopeByteString(size={} hex={})", self.len(), encoded)
    }
}

impl fmt::Debug for RopeByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
