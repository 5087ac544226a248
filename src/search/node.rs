//! Proof-number tree nodes.
//!
//! Nodes live in an arena and refer to each other by `NodeId`. A node either
//! owns the list of children it generated or, when it is a transposition of an
//! already expanded node, points at that node's list without owning it.

use crate::board::Pos;

/// Saturated proof/disproof value ("proven the other way")
pub const INFINITY: u32 = u32::MAX;

/// Index into the `PnTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Node polarity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// The prover is to move: proof is the minimum over children
    Or,
    /// The defender is to move: disproof is the minimum over children
    And,
}

impl NodeKind {
    #[inline]
    pub fn flip(self) -> NodeKind {
        match self {
            NodeKind::Or => NodeKind::And,
            NodeKind::And => NodeKind::Or,
        }
    }
}

/// Child list of a node
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Children {
    /// Generated by this node, in generation order
    Owned(Vec<NodeId>),
    /// Borrowed from the node that was expanded first for the same position
    Shared(NodeId),
}

/// One position of the search tree, reached by playing `pos`.
#[derive(Clone, Debug)]
pub struct PnNode {
    pub pos: Pos,
    pub kind: NodeKind,
    pub proof: u32,
    pub disproof: u32,
    /// Threat flags created by the move that led here
    pub threat: u8,
    pub parent: Option<NodeId>,
    pub children: Children,
    pub subtree_size: u32,
    pub expanded: bool,
}

impl PnNode {
    #[must_use]
    pub fn new(pos: Pos, kind: NodeKind, proof: u32, disproof: u32, threat: u8) -> Self {
        Self {
            pos,
            kind,
            proof,
            disproof,
            threat,
            parent: None,
            children: Children::Owned(Vec::new()),
            subtree_size: 1,
            expanded: false,
        }
    }

    #[inline]
    pub fn is_proved(&self) -> bool {
        self.proof == 0
    }

    #[inline]
    pub fn is_disproved(&self) -> bool {
        self.disproof == 0
    }

    /// proof / disproof as used for picking the most promising unresolved move
    #[inline]
    pub fn ratio(&self) -> f32 {
        self.proof as f32 / self.disproof as f32
    }
}

/// Arena-based proof-number tree.
#[derive(Clone, Debug, Default)]
pub struct PnTree {
    nodes: Vec<PnNode>,
}

impl PnTree {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Drop every node and start over with `root`.
    pub fn reset(&mut self, root: PnNode) -> NodeId {
        self.nodes.clear();
        self.nodes.push(root);
        NodeId(0)
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &PnNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut PnNode {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of a node, following a shared reference to its owner.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.get(id).children {
            Children::Owned(list) => list,
            Children::Shared(owner) => match &self.get(*owner).children {
                Children::Owned(list) => list,
                // owners are always registered before sharing, so never shared themselves
                Children::Shared(_) => &[],
            },
        }
    }

    /// Append a freshly generated child to `parent`'s owned list.
    pub fn add_child(&mut self, parent: NodeId, mut node: PnNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        self.nodes.push(node);
        match &mut self.get_mut(parent).children {
            Children::Owned(list) => list.push(id),
            Children::Shared(_) => {
                debug_assert!(false, "cannot add a child to a node sharing another's children");
            }
        }
        id
    }

    /// Make `node` use `owner`'s children without taking ownership.
    pub fn share_children(&mut self, node: NodeId, owner: NodeId) {
        debug_assert!(matches!(self.get(owner).children, Children::Owned(_)));
        self.get_mut(node).children = Children::Shared(owner);
    }

    /// Recompute proof, disproof and subtree size of `id` from its children.
    ///
    /// A leaf that was never expanded keeps its own numbers.
    pub fn update_node(&mut self, id: NodeId) {
        let kind = self.get(id).kind;
        let children = self.children(id);
        if children.is_empty() && !self.get(id).expanded {
            return;
        }

        let (mut min_proof, mut sum_proof) = (INFINITY, 0u32);
        let (mut min_disproof, mut sum_disproof) = (INFINITY, 0u32);
        let mut size = 1u32;
        for &child in children {
            let c = self.get(child);
            min_proof = min_proof.min(c.proof);
            sum_proof = sum_proof.saturating_add(c.proof);
            min_disproof = min_disproof.min(c.disproof);
            sum_disproof = sum_disproof.saturating_add(c.disproof);
            size = size.saturating_add(c.subtree_size);
        }

        // a position without moves (full board) is never a win for the prover
        let (proof, disproof) = match kind {
            _ if children.is_empty() => (INFINITY, 0),
            NodeKind::Or => (min_proof, sum_disproof),
            NodeKind::And => (sum_proof, min_disproof),
        };

        let node = self.get_mut(id);
        node.proof = proof;
        node.disproof = disproof;
        node.subtree_size = size;
    }

    /// Update `id` and then every ancestor up to the root.
    pub fn update_ancestors(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node) = current {
            self.update_node(node);
            current = self.get(node).parent;
        }
    }

    /// Moves from the root down to `id`, root move first.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<Pos> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            path.push(self.get(node).pos);
            current = self.get(node).parent;
        }
        path.reverse();
        path
    }
}
