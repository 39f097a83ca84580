use std::sync::{Arc, OnceLock};

/// Immutable rope tree node. Weight and depth are fixed when the node is built.
#[derive(Debug)]
pub(crate) enum Node {
    Leaf { data: Arc<[u8]> },
    Branch {
        left: Arc<Node>,
        right: Arc<Node>,
        weight: usize,
        depth: usize,
    },
}

impl Node {
    /// Copies `data` into a new leaf.
    pub fn new_leaf(data: &[u8]) -> Arc<Self> {
        Arc::new(Node::Leaf {
            data: Arc::from(data),
        })
    }

    pub fn new_branch(left: Arc<Self>, right: Arc<Self>) -> Arc<Self> {
        Arc::new(Node::Branch {
            weight: left.weight() + right.weight(),
            depth: left.depth().max(right.depth()) + 1,
            left,
            right,
        })
    }

    /// Shared zero-length leaf backing every empty rope.
    pub fn empty() -> Arc<Self> {
        static EMPTY: OnceLock<Arc<Node>> = OnceLock::new();
        EMPTY.get_or_init(|| Node::new_leaf(&[])).clone()
    }

    pub fn weight(&self) -> usize {
        match self {
            Node::Leaf { data } => data.len(),
            Node::Branch { weight, .. } => *weight,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Branch { depth, .. } => *depth,
        }
    }

    /// Depth-ratio test: `left.depth / right.depth` must lie in `[0.5, 2.0]`.
    pub fn is_balanced(&self) -> bool {
        match self {
            Node::Leaf { .. } => true,
            Node::Branch { left, right, .. } => {
                let (l, r) = (left.depth(), right.depth());
                2 * l >= r && l <= 2 * r
            }
        }
    }
}

// Unbalanced ropes can be as deep as the number of concatenations, so
// branches are torn down with an explicit stack instead of recursive drops.
impl Drop for Node {
    fn drop(&mut self) {
        let Node::Branch { left, right, .. } = self else {
            return;
        };
        let mut stack = vec![
            std::mem::replace(left, Node::empty()),
            std::mem::replace(right, Node::empty()),
        ];

        while let Some(node) = stack.pop() {
            if let Some(mut node) = Arc::into_inner(node) {
                if let Node::Branch { left, right, .. } = &mut node {
                    stack.push(std::mem::replace(left, Node::empty()));
                    stack.push(std::mem::replace(right, Node::empty()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_owns_copy() {
        let mut source = vec![1u8, 2, 3];
        let leaf = Node::new_leaf(&source);
        source[0] = 9;

        match leaf.as_ref() {
            Node::Leaf { data } => assert_eq!(&data[..], &[1, 2, 3]),
            Node::Branch { .. } => panic!("expected a leaf"),
        }
        assert_eq!(leaf.weight(), 3);
        assert_eq!(leaf.depth(), 1);
    }

    #[test]
    fn test_branch_weight_and_depth() {
        let a = Node::new_leaf(b"ab");
        let b = Node::new_leaf(b"cde");
        let ab = Node::new_branch(a.clone(), b);
        assert_eq!(ab.weight(), 5);
        assert_eq!(ab.depth(), 2);

        let abc = Node::new_branch(ab, a);
        assert_eq!(abc.weight(), 7);
        assert_eq!(abc.depth(), 3);
    }

    #[test]
    fn test_empty_is_shared() {
        let a = Node::empty();
        let b = Node::empty();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.weight(), 0);
    }

    #[test]
    fn test_is_balanced_uses_depth_ratio() {
        let leaf = Node::new_leaf(b"x");
        assert!(leaf.is_balanced());

        // depth 2 vs depth 1: ratio 2.0 is still balanced
        let two = Node::new_branch(leaf.clone(), leaf.clone());
        assert!(Node::new_branch(two.clone(), leaf.clone()).is_balanced());
        assert!(Node::new_branch(leaf.clone(), two.clone()).is_balanced());

        // depth 3 vs depth 1: ratio 3.0
        let three = Node::new_branch(two.clone(), leaf.clone());
        assert!(!Node::new_branch(three.clone(), leaf.clone()).is_balanced());
        assert!(!Node::new_branch(leaf.clone(), three).is_balanced());
    }

    #[test]
    fn test_is_balanced_ignores_weights() {
        let big = Node::new_leaf(&[0u8; 4096]);
        let small = Node::new_leaf(b"x");
        assert!(Node::new_branch(big, small).is_balanced());
    }

    #[test]
    fn test_drop_deep_tree() {
        let mut tree = Node::new_leaf(b"x");
        for _ in 0..200_000 {
            tree = Node::new_branch(tree, Node::new_leaf(b"y"));
        }
        assert_eq!(tree.weight(), 200_001);
        drop(tree);
    }

    #[test]
    fn test_drop_keeps_shared_subtrees() {
        let shared = Node::new_branch(Node::new_leaf(b"ab"), Node::new_leaf(b"cd"));
        let parent = Node::new_branch(shared.clone(), Node::new_leaf(b"ef"));
        drop(parent);

        assert_eq!(shared.weight(), 4);
        match shared.as_ref() {
            Node::Branch { left, right, .. } => {
                assert_eq!(left.weight(), 2);
                assert_eq!(right.weight(), 2);
            }
            Node::Leaf { .. } => panic!("expected a branch"),
        }
    }
}
