use crate::{Bentwood, NodeIndex};

/// Read-only access to one binary-tree vertex: its element and its two
/// optional children.
///
/// Rendering and printing code consumes this capability instead of the
/// concrete tree, so it can never depend on (or interfere with) the
/// self-adjusting machinery.
pub trait TreeNode: Sized {
    /// Element type carried by the node.
    type Element;

    /// The node's element.
    fn element(&self) -> &Self::Element;

    /// View of the left child, if present.
    fn left(&self) -> Option<Self>;

    /// View of the right child, if present.
    fn right(&self) -> Option<Self>;
}

/// Borrowed view of a [`Bentwood`] node, reflecting the structure at the
/// time of the call.
pub struct NodeView<'a, K: Ord> {
    tree: &'a Bentwood<K>,
    idx: NodeIndex,
}

impl<'a, K: Ord> NodeView<'a, K> {
    pub(crate) fn new(tree: &'a Bentwood<K>, idx: NodeIndex) -> Self {
        Self { tree, idx }
    }
}

impl<K: Ord> Clone for NodeView<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Ord> Copy for NodeView<'_, K> {}

impl<K: Ord> TreeNode for NodeView<'_, K> {
    type Element = K;

    fn element(&self) -> &K {
        self.tree.element(self.idx)
    }

    fn left(&self) -> Option<Self> {
        self.tree
            .node(self.idx)
            .left
            .map(|idx| NodeView::new(self.tree, idx))
    }

    fn right(&self) -> Option<Self> {
        self.tree
            .node(self.idx)
            .right
            .map(|idx| NodeView::new(self.tree, idx))
    }
}
