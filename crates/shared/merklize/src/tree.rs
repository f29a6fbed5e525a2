use crate::{Node, TreeLayout};

/// Fully constructed Merkle Tree that owns all of its nodes above the leaves.
///
/// Nodes are stored according to [`TreeLayout`], the root is the last node.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MerkleTree {
    layout: TreeLayout,
    nodes: Vec<Node>,
}

impl MerkleTree {
    /// `nodes` must have been fully written according to `layout`
    pub(crate) fn from_parts(layout: TreeLayout, nodes: Vec<Node>) -> Self {
        debug_assert_eq!(nodes.len(), layout.num_nodes());

        Self { layout, nodes }
    }

    /// Layout of nodes in this tree
    #[inline]
    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    /// Number of leaves the tree was built from
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.layout.leaf_count()
    }

    /// Number of levels above the leaves, including the root level
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.layout.num_levels()
    }

    /// Root of the tree
    #[inline]
    pub fn root(&self) -> Node {
        *self
            .nodes
            .last()
            .expect("There are always at least two leaves and hence at least one node; qed")
    }

    /// Nodes of the `level` (0 is right above the leaves), `None` if there is no such level
    #[inline]
    pub fn level(&self, level: usize) -> Option<&[Node]> {
        self.nodes.get(self.layout.level_range(level)?)
    }

    /// Node `index` of the `level`, `None` if there is no such node
    #[inline]
    pub fn node(&self, level: usize, index: usize) -> Option<&Node> {
        self.level(level)?.get(index)
    }

    /// All nodes in layout order
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All nodes as a flat words buffer, identical to what
    /// [`Merklizer::construct()`](crate::Merklizer::construct) writes into `intermediates`
    #[inline]
    pub fn as_words(&self) -> &[u32] {
        self.nodes.as_flattened()
    }

    /// Take nodes out of the tree
    #[inline]
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
