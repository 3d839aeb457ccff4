use core::fmt;

use crate::view::TreeNode;

/// Graphviz description of a tree, obtained from [`Bentwood::dot`].
///
/// Displays as a `digraph` with one edge per parent/child pair, naming
/// vertices by their element. The [`pretty`] variant instead declares a
/// labeled circle per vertex and anchors single children with invisible
/// placeholders, so a lone child keeps its left or right position when the
/// graph is laid out.
///
/// [`Bentwood::dot`]: crate::Bentwood::dot
/// [`pretty`]: Dot::pretty
pub struct Dot<N> {
    root: Option<N>,
    pretty: bool,
}

impl<N> Dot<N> {
    pub(crate) fn new(root: Option<N>) -> Self {
        Self {
            root,
            pretty: false,
        }
    }

    /// Switches to the labeled rendering with placeholder anchors.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl<N> Dot<N>
where
    N: TreeNode,
    N::Element: fmt::Display,
{
    fn plain_fmt(&self, f: &mut fmt::Formatter<'_>, node: &N) -> fmt::Result {
        if let Some(left) = node.left() {
            writeln!(f, "    {} -> {}", node.element(), left.element())?;
            self.plain_fmt(f, &left)?;
        }
        if let Some(right) = node.right() {
            writeln!(f, "    {} -> {}", node.element(), right.element())?;
            self.plain_fmt(f, &right)?;
        }

        Ok(())
    }

    /// Declares `node` and its subtree, returning the vertex id assigned to
    /// `node`. Ids are handed out in visit order, placeholders separately.
    fn pretty_fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &N,
        vertices: &mut usize,
        anchors: &mut usize,
    ) -> Result<usize, fmt::Error> {
        *vertices += 1;
        let id = *vertices;
        writeln!(
            f,
            "    n{id} [label=\"{}\", shape=\"circle\"]",
            node.element()
        )?;

        match (node.left(), node.right()) {
            (Some(left), Some(right)) => {
                let left_id = self.pretty_fmt(f, &left, vertices, anchors)?;
                writeln!(f, "    n{id} -> n{left_id}")?;
                let right_id = self.pretty_fmt(f, &right, vertices, anchors)?;
                writeln!(f, "    n{id} -> n{right_id}")?;
            }
            (Some(left), None) => {
                let left_id = self.pretty_fmt(f, &left, vertices, anchors)?;
                writeln!(f, "    n{id} -> n{left_id}")?;
                self.anchor_fmt(f, id, anchors)?;
            }
            (None, Some(right)) => {
                // anchor first so the real child lands on the right
                self.anchor_fmt(f, id, anchors)?;
                let right_id = self.pretty_fmt(f, &right, vertices, anchors)?;
                writeln!(f, "    n{id} -> n{right_id}")?;
            }
            (None, None) => {}
        }

        Ok(id)
    }

    fn anchor_fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
        parent: usize,
        anchors: &mut usize,
    ) -> fmt::Result {
        *anchors += 1;
        let id = *anchors;
        writeln!(f, "    null{id} [shape=\"point\", label=\"\", color=\"invis\"]")?;
        writeln!(f, "    n{parent} -> null{id} [color=\"invis\"]")
    }
}

impl<N> fmt::Display for Dot<N>
where
    N: TreeNode,
    N::Element: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph G {{")?;

        if let Some(root) = &self.root {
            if self.pretty {
                let mut vertices = 0;
                let mut anchors = 0;
                self.pretty_fmt(f, root, &mut vertices, &mut anchors)?;
            } else {
                self.plain_fmt(f, root)?;
            }
        }

        writeln!(f, "}}")
    }
}

impl<N> fmt::Debug for Dot<N>
where
    N: TreeNode,
    N::Element: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
