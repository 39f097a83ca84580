use std::sync::Arc;

use crate::util::node::Node;

/// Left-to-right walk over the leaves of a tree.
///
/// Uses an explicit stack, so an unbalanced tree whose depth grows with the
/// number of concatenations cannot exhaust the call stack.
pub(crate) struct Leaves<'a> {
    stack: Vec<&'a Arc<Node>>,
}

impl<'a> Leaves<'a> {
    pub fn new(root: &'a Arc<Node>) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Arc<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node.as_ref() {
                Node::Leaf { .. } => return Some(node),
                Node::Branch { left, right, .. } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

/// Byte slices of every leaf, in order.
pub(crate) fn chunks(root: &Arc<Node>) -> impl Iterator<Item = &[u8]> {
    Leaves::new(root).map(|leaf| match leaf.as_ref() {
        Node::Leaf { data } => &data[..],
        Node::Branch { .. } => unreachable!("Leaves only yields leaf nodes"),
    })
}
