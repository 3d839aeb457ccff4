//! Splay tree based containers.
//!
//! An ordered set and map over a self-adjusting binary search tree: every
//! access splays the touched element to the root, so recently used elements
//! stay cheap to reach again while any operation sequence stays amortized
//! `O(log n)` per operation, with no balance metadata stored in the nodes.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use core::cmp::Ordering;
use core::fmt;
use core::mem;

use alloc::vec::Vec;

mod dot;
mod iter;
mod map;
mod view;

pub use dot::Dot;
pub use iter::BentwoodSortedIterator;
pub use map::BentwoodMap;
pub use view::{NodeView, TreeNode};

/*
vacant storage cells form an intrusive free list: each vacant slot holds the
index of the next vacant one and the tree keeps the head. allocating pops the
head before growing the backing vector, releasing pushes the freed cell.
occupied slots never move, so node indices stay stable across removals.
*/

/// Stable handle of a node slot inside the tree storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeIndex(pub(crate) usize);

#[derive(Debug)]
enum Slot<K> {
    Occupied(BentwoodNode<K>),
    Vacant { next_free: Option<NodeIndex> },
}

#[derive(Debug)]
pub(crate) struct BentwoodNode<K> {
    pub(crate) element: K,
    pub(crate) left: Option<NodeIndex>,
    pub(crate) right: Option<NodeIndex>,
}

impl<K> BentwoodNode<K> {
    fn new_isolated(element: K) -> Self {
        Self {
            element,
            left: None,
            right: None,
        }
    }
}

/// Error returned by [`Bentwood::find_min`] and [`Bentwood::find_max`] when
/// the tree holds no elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnderflowError;

impl fmt::Display for UnderflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("empty tree has no minimum or maximum")
    }
}

impl core::error::Error for UnderflowError {}

/// Self-adjusting ordered set.
///
/// Searches restructure the tree (the visited element, or the closest one
/// when it is absent, ends up at the root), so lookups take `&mut self`
/// like the mutating operations do.
///
/// ```
/// let mut tree = bentwood::Bentwood::new();
///
/// assert!(tree.insert(3));
/// assert!(tree.insert(1));
/// assert!(!tree.insert(3));
///
/// assert!(tree.contains(&1));
/// assert_eq!(tree.find_min(), Ok(&1));
/// assert_eq!(tree.find_max(), Ok(&3));
/// ```
#[derive(Debug)]
pub struct Bentwood<K: Ord> {
    storage: Vec<Slot<K>>,
    root: Option<NodeIndex>,
    free_head: Option<NodeIndex>,
    length: usize,
}

impl<K: Ord> Bentwood<K> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            root: None,
            free_head: None,
            length: 0,
        }
    }

    /// Number of elements currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Checks whether the tree holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Reserves storage for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional);
    }

    /// Drops every element and resets the storage.
    pub fn clear(&mut self) {
        tracing::trace!(len = self.length, "clearing tree");
        self.storage.clear();
        self.root = None;
        self.free_head = None;
        self.length = 0;
    }

    /// Inserts `element`, returning whether it was newly added.
    ///
    /// A duplicate of an already stored element is silently rejected, but
    /// the existing occurrence still gets splayed to the root.
    pub fn insert(&mut self, element: K) -> bool {
        if self.root.is_some() {
            self.splay_root(&element);
        }

        let Some(root) = self.root else {
            let idx = self.allocate(BentwoodNode::new_isolated(element));
            self.root = Some(idx);
            return true;
        };

        match element.cmp(self.element(root)) {
            Ordering::Equal => false,
            Ordering::Less => {
                let left = self.node_mut(root).left.take();
                let idx = self.allocate(BentwoodNode {
                    element,
                    left,
                    right: Some(root),
                });
                self.root = Some(idx);
                true
            }
            Ordering::Greater => {
                let right = self.node_mut(root).right.take();
                let idx = self.allocate(BentwoodNode {
                    element,
                    left: Some(root),
                    right,
                });
                self.root = Some(idx);
                true
            }
        }
    }

    /// Checks whether `element` is stored, splaying it (or the closest
    /// element on its search path) to the root either way.
    pub fn contains(&mut self, element: &K) -> bool {
        self.splay_root(element);

        match self.root {
            Some(root) => self.element(root) == element,
            None => false,
        }
    }

    /// Removes `element`, returning whether it was present. Removing an
    /// absent element leaves the stored set untouched, though the search
    /// still splays its closest neighbour to the root.
    pub fn remove(&mut self, element: &K) -> bool {
        self.remove_by(&|candidate| element.cmp(candidate))
    }

    /// Smallest element, splayed to the root.
    pub fn find_min(&mut self) -> Result<&K, UnderflowError> {
        self.splay_root_by(&|_| Ordering::Less);

        match self.root {
            Some(root) => Ok(self.element(root)),
            None => Err(UnderflowError),
        }
    }

    /// Largest element, splayed to the root.
    pub fn find_max(&mut self) -> Result<&K, UnderflowError> {
        self.splay_root_by(&|_| Ordering::Greater);

        match self.root {
            Some(root) => Ok(self.element(root)),
            None => Err(UnderflowError),
        }
    }

    /// Nodes on the longest root-to-leaf path; 0 for the empty tree. Purely
    /// diagnostic: splay trees bound this only in the amortized sense.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending = Vec::new();

        if let Some(root) = self.root {
            pending.push((root, 1));
        }
        while let Some((idx, depth)) = pending.pop() {
            deepest = deepest.max(depth);

            let node = self.node(idx);
            if let Some(left) = node.left {
                pending.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                pending.push((right, depth + 1));
            }
        }

        deepest
    }

    /// Read-only view of the current root node, if any.
    #[must_use]
    pub fn root(&self) -> Option<NodeView<'_, K>> {
        self.root.map(|idx| NodeView::new(self, idx))
    }

    /// Visits the stored elements in ascending order.
    #[must_use]
    pub fn iter(&self) -> BentwoodSortedIterator<'_, K> {
        BentwoodSortedIterator {
            tree: self,
            curr: self.root,
            stack: Vec::new(),
        }
    }

    /// Graphviz rendering of the current structure.
    ///
    /// ```
    /// let mut tree = bentwood::Bentwood::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// println!("{}", tree.dot());
    /// ```
    #[must_use]
    pub fn dot(&self) -> Dot<NodeView<'_, K>> {
        Dot::new(self.root())
    }

    /// Panics unless the structure upholds its invariants: the in-order
    /// sequence is strictly ascending and reaches exactly [`len`] nodes.
    ///
    /// [`len`]: Bentwood::len
    pub fn assert_valid(&self) {
        let mut reachable = 0;
        let mut previous: Option<&K> = None;

        for element in self.iter() {
            if let Some(previous) = previous {
                assert!(previous < element, "in-order sequence out of order");
            }
            previous = Some(element);
            reachable += 1;
        }

        assert_eq!(reachable, self.length, "reachable nodes disagree with len");
    }

    /// Top-down splay of the subtree rooted at `subtree`.
    ///
    /// Restructures the subtree, through rotations only, so that the node
    /// the comparator reports `Equal` for becomes its root; when no node
    /// matches, the node where the search bottoms out (an in-order
    /// neighbour of the target) is surfaced instead. `compare` gives the
    /// ordering of the search target relative to a stored element.
    fn splay<F>(&mut self, compare: &F, subtree: Option<NodeIndex>) -> Option<NodeIndex>
    where
        F: Fn(&K) -> Ordering,
    {
        let Some(mut current) = subtree else {
            return None;
        };

        match compare(self.element(current)) {
            Ordering::Less => {
                let Some(left) = self.node(current).left else {
                    return Some(current);
                };

                match compare(self.element(left)) {
                    Ordering::Less => {
                        // zig-zig: surface the target within left-left, then
                        // rotate twice (once here, once in the tail below)
                        let grandchild = self.node(left).left;
                        let splayed = self.splay(compare, grandchild);
                        self.node_mut(left).left = splayed;
                        current = self.rotate_with_left_child(current, left);
                    }
                    Ordering::Greater => {
                        // zig-zag: surface the target within left-right and
                        // lift it over the left child
                        let grandchild = self.node(left).right;
                        let splayed = self.splay(compare, grandchild);
                        self.node_mut(left).right = splayed;
                        if let Some(grandchild) = self.node(left).right {
                            let lifted = self.rotate_with_right_child(left, grandchild);
                            self.node_mut(current).left = Some(lifted);
                        }
                    }
                    Ordering::Equal => {}
                }

                match self.node(current).left {
                    Some(left) => Some(self.rotate_with_left_child(current, left)),
                    None => Some(current),
                }
            }
            Ordering::Greater => {
                let Some(right) = self.node(current).right else {
                    return Some(current);
                };

                match compare(self.element(right)) {
                    Ordering::Greater => {
                        // zag-zag, mirror of zig-zig
                        let grandchild = self.node(right).right;
                        let splayed = self.splay(compare, grandchild);
                        self.node_mut(right).right = splayed;
                        current = self.rotate_with_right_child(current, right);
                    }
                    Ordering::Less => {
                        // zag-zig, mirror of zig-zag
                        let grandchild = self.node(right).left;
                        let splayed = self.splay(compare, grandchild);
                        self.node_mut(right).left = splayed;
                        if let Some(grandchild) = self.node(right).left {
                            let lifted = self.rotate_with_left_child(right, grandchild);
                            self.node_mut(current).right = Some(lifted);
                        }
                    }
                    Ordering::Equal => {}
                }

                match self.node(current).right {
                    Some(right) => Some(self.rotate_with_right_child(current, right)),
                    None => Some(current),
                }
            }
            Ordering::Equal => Some(current),
        }
    }

    fn splay_root(&mut self, target: &K) {
        self.splay_root_by(&|element| target.cmp(element));
    }

    pub(crate) fn splay_root_by<F>(&mut self, compare: &F)
    where
        F: Fn(&K) -> Ordering,
    {
        let root = self.root;
        self.root = self.splay(compare, root);
    }

    pub(crate) fn remove_by<F>(&mut self, compare: &F) -> bool
    where
        F: Fn(&K) -> Ordering,
    {
        self.splay_root_by(compare);

        let Some(root) = self.root else {
            return false;
        };
        if compare(self.element(root)) != Ordering::Equal {
            return false;
        }

        tracing::trace!(index = root.0, len = self.length, "removing splayed root");
        let removed = self.release(root);
        self.root = match removed.left {
            None => removed.right,
            Some(left) => {
                // the removed element orders above everything to its left,
                // so this splay surfaces the in-order predecessor, which
                // then has a free right link for the old right subtree
                let predecessor = self.splay(compare, Some(left));
                if let Some(idx) = predecessor {
                    self.node_mut(idx).right = removed.right;
                }
                predecessor
            }
        };

        true
    }

    pub(crate) fn root_element(&self) -> Option<&K> {
        self.root.map(|idx| self.element(idx))
    }

    pub(crate) fn root_element_mut(&mut self) -> Option<&mut K> {
        match self.root {
            Some(idx) => Some(&mut self.node_mut(idx).element),
            None => None,
        }
    }

    /// Single rotation lifting `left` over its parent. The caller already
    /// fetched `left` out of `parent`, so both links are known present.
    fn rotate_with_left_child(&mut self, parent: NodeIndex, left: NodeIndex) -> NodeIndex {
        let middle = self.node(left).right;
        self.node_mut(parent).left = middle;
        self.node_mut(left).right = Some(parent);
        left
    }

    fn rotate_with_right_child(&mut self, parent: NodeIndex, right: NodeIndex) -> NodeIndex {
        let middle = self.node(right).left;
        self.node_mut(parent).right = middle;
        self.node_mut(right).left = Some(parent);
        right
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &BentwoodNode<K> {
        match &self.storage[idx.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("tree link points at a vacant slot"),
        }
    }

    fn node_mut(&mut self, idx: NodeIndex) -> &mut BentwoodNode<K> {
        match &mut self.storage[idx.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("tree link points at a vacant slot"),
        }
    }

    pub(crate) fn element(&self, idx: NodeIndex) -> &K {
        &self.node(idx).element
    }

    fn allocate(&mut self, node: BentwoodNode<K>) -> NodeIndex {
        self.length += 1;

        match self.free_head {
            Some(idx) => {
                self.free_head = match &self.storage[idx.0] {
                    Slot::Vacant { next_free } => *next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                };
                self.storage[idx.0] = Slot::Occupied(node);
                idx
            }
            None => {
                let idx = NodeIndex(self.storage.len());
                self.storage.push(Slot::Occupied(node));
                idx
            }
        }
    }

    fn release(&mut self, idx: NodeIndex) -> BentwoodNode<K> {
        let slot = mem::replace(
            &mut self.storage[idx.0],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(idx);
        self.length -= 1;

        match slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("tree link points at a vacant slot"),
        }
    }
}

impl<K: Ord> Default for Bentwood<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for Bentwood<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<K: Ord> FromIterator<K> for Bentwood<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;

    use crate::{Bentwood, TreeNode, UnderflowError};

    #[test]
    pub fn create_tree() {
        let mut tree = Bentwood::<usize>::new();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.find_min(), Err(UnderflowError));
        assert_eq!(tree.find_max(), Err(UnderflowError));
        assert!(tree.root().is_none());
    }

    #[test]
    pub fn empty_tree_insertion() {
        let mut tree = Bentwood::new();

        assert!(tree.insert(5));
        assert!(tree.insert(7));
        assert!(tree.insert(9));
        assert!(tree.insert(3));
        assert_eq!(tree.len(), 4);
        tree.assert_valid();
    }

    #[test]
    pub fn insertion_splays_new_element_to_root() {
        let mut tree = Bentwood::new();

        for element in [5, 7, 9, 3] {
            tree.insert(element);
            assert_eq!(tree.root().map(|root| *root.element()), Some(element));
        }
    }

    #[test]
    pub fn duplicate_insertion_is_rejected() {
        let mut tree = Bentwood::new();

        assert!(tree.insert(5));
        assert!(tree.insert(2));
        assert!(!tree.insert(5));

        assert_eq!(tree.len(), 2);
        assert!(tree.iter().eq([&2, &5]));
        // the duplicate probe still splayed the stored occurrence up
        assert_eq!(tree.root().map(|root| *root.element()), Some(5));
    }

    #[test]
    pub fn contains_splays_target_to_root() {
        let mut tree = Bentwood::new();
        tree.extend([4, 8, 1, 6, 2]);

        assert!(tree.contains(&1));
        assert_eq!(tree.root().map(|root| *root.element()), Some(1));

        assert!(tree.contains(&6));
        assert_eq!(tree.root().map(|root| *root.element()), Some(6));

        assert!(!tree.contains(&7));
        assert!(tree.iter().eq([&1, &2, &4, &6, &8]));
    }

    #[test]
    pub fn ascending_chain_keeps_new_maximum_at_root() {
        let mut tree = Bentwood::new();
        tree.insert(1);
        tree.insert(2);
        tree.insert(3);

        let root = tree.root().unwrap();
        assert_eq!(*root.element(), 3);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    pub fn search_zig_zig_reverses_left_spine() {
        let mut tree = Bentwood::new();
        tree.insert(1);
        tree.insert(2);
        tree.insert(3);

        assert!(tree.contains(&1));

        let root = tree.root().unwrap();
        assert_eq!(*root.element(), 1);
        assert!(root.left().is_none());
        let child = root.right().unwrap();
        assert_eq!(*child.element(), 2);
        let grandchild = child.right().unwrap();
        assert_eq!(*grandchild.element(), 3);
    }

    #[test]
    pub fn search_zag_zag_hoists_deep_right_target() {
        let mut tree = Bentwood::new();
        for element in [2, 6, 4, 1] {
            tree.insert(element);
        }

        assert!(tree.contains(&4));

        let root = tree.root().unwrap();
        assert_eq!(*root.element(), 4);
        let left = root.left().unwrap();
        assert_eq!(*left.element(), 2);
        assert_eq!(*left.left().unwrap().element(), 1);
        assert!(left.right().is_none());
        assert_eq!(*root.right().unwrap().element(), 6);
    }

    #[test]
    pub fn removal_hoists_predecessor() {
        let mut tree = Bentwood::new();
        for element in [2, 6, 4, 1] {
            tree.insert(element);
        }

        assert!(tree.contains(&4));
        assert!(tree.remove(&4));

        assert_eq!(tree.root().map(|root| *root.element()), Some(2));
        assert_eq!(tree.len(), 3);
        assert!(tree.iter().eq([&1, &2, &6]));
        tree.assert_valid();
    }

    #[test]
    pub fn removing_leftless_root_promotes_right_subtree() {
        let mut tree = Bentwood::new();
        tree.insert(5);
        tree.insert(7);

        assert!(tree.remove(&5));

        assert_eq!(tree.root().map(|root| *root.element()), Some(7));
        assert_eq!(tree.len(), 1);
        tree.assert_valid();
    }

    #[test]
    pub fn removal_of_absent_element_is_a_noop() {
        let mut tree = Bentwood::new();
        tree.extend([1, 3]);

        assert!(!tree.remove(&2));

        assert_eq!(tree.len(), 2);
        assert!(tree.iter().eq([&1, &3]));
    }

    #[test]
    pub fn extremes_become_the_root() {
        let mut tree = Bentwood::new();
        tree.extend([4, 8, 1, 6, 2]);

        assert_eq!(tree.find_min(), Ok(&1));
        assert_eq!(tree.root().map(|root| *root.element()), Some(1));

        assert_eq!(tree.find_max(), Ok(&8));
        assert_eq!(tree.root().map(|root| *root.element()), Some(8));
        tree.assert_valid();
    }

    #[test]
    pub fn clearing_resets_the_tree() {
        let mut tree = Bentwood::new();
        tree.extend([4, 8, 1]);

        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.find_min(), Err(UnderflowError));

        assert!(tree.insert(9));
        assert!(tree.contains(&9));
    }

    #[test]
    pub fn vacated_slots_are_recycled() {
        let mut tree = Bentwood::new();
        for element in 0..8 {
            tree.insert(element);
        }
        let cells = tree.storage.len();

        for element in 0..4 {
            assert!(tree.remove(&element));
        }
        for element in 10..14 {
            assert!(tree.insert(element));
        }

        assert_eq!(tree.storage.len(), cells);
        assert_eq!(tree.len(), 8);
        tree.assert_valid();
    }

    #[test]
    pub fn sorted_iteration() {
        let mut rng = rand::thread_rng();
        let mut elements: Vec<i32> = (0..50).collect();
        elements.shuffle(&mut rng);

        let tree: Bentwood<i32> = elements.iter().copied().collect();

        assert!(tree.iter().copied().eq(0..50));
    }

    #[test]
    pub fn randomized_insert_remove_search() {
        let mut rng = rand::thread_rng();
        let mut elements: Vec<i32> = (0..400).collect();
        elements.shuffle(&mut rng);

        let mut tree = Bentwood::new();
        for &element in &elements {
            assert!(tree.insert(element));
            tree.assert_valid();
        }
        assert_eq!(tree.len(), 400);

        elements.shuffle(&mut rng);
        for &element in &elements[..200] {
            assert!(tree.remove(&element));
            tree.assert_valid();
        }
        assert_eq!(tree.len(), 200);

        for &element in &elements[..200] {
            assert!(!tree.contains(&element));
        }
        for &element in &elements[200..] {
            assert!(tree.contains(&element));
        }
    }

    #[test]
    pub fn underflow_error_message() {
        assert_eq!(
            UnderflowError.to_string(),
            "empty tree has no minimum or maximum"
        );
    }
}
