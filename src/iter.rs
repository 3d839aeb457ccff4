use alloc::vec::Vec;

use crate::{Bentwood, NodeIndex};

/// In-order iterator over a [`Bentwood`], yielding elements in ascending
/// order regardless of the current splay shape.
pub struct BentwoodSortedIterator<'a, K: Ord> {
    pub(crate) tree: &'a Bentwood<K>,
    pub(crate) curr: Option<NodeIndex>,
    pub(crate) stack: Vec<NodeIndex>,
}

impl<'a, K: Ord> Iterator for BentwoodSortedIterator<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.curr {
            self.stack.push(idx);
            self.curr = self.tree.node(idx).left;
        }

        if let Some(node) = self.stack.pop() {
            self.curr = self.tree.node(node).right;

            return Some(self.tree.element(node));
        }

        None
    }
}

impl<'a, K: Ord> IntoIterator for &'a Bentwood<K> {
    type Item = &'a K;
    type IntoIter = BentwoodSortedIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
