//! Render lists and the traits the scene layer exposes to renderers
//!
//! A [`SceneGraph`] is the flat list of nodes an application wants drawn.
//! Membership is independent of parentage: a member may be a root or sit
//! deep inside a [`NodeTree`], and its transform descendants are reached
//! through [`walk`].

use super::node::Node;
use super::tree::NodeTree;
use super::NodeId;
use crate::foundation::math::Mat4;

/// Anything that has a local and a world transform
pub trait Spatial {
    /// Matrix relative to the parent
    fn local_transform(&self) -> Mat4;

    /// Matrix relative to the world, as of the last propagation pass
    fn world_transform(&self) -> Mat4;
}

impl Spatial for Node {
    fn local_transform(&self) -> Mat4 {
        self.transform()
    }

    fn world_transform(&self) -> Mat4 {
        *Node::world_transform(self)
    }
}

/// Anything that enumerates nodes for drawing
pub trait RenderList {
    /// Nodes in draw order
    fn members(&self) -> &[NodeId];
}

impl RenderList for Node {
    fn members(&self) -> &[NodeId] {
        self.children()
    }
}

/// Flat list of nodes to draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneGraph {
    members: Vec<NodeId>,
}

impl SceneGraph {
    /// Create an empty scene graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node; adding the same node twice has no effect
    pub fn add_child(&mut self, id: NodeId) {
        if !self.contains(id) {
            self.members.push(id);
        }
    }

    /// Append several nodes in order
    pub fn add_children(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        for id in ids {
            self.add_child(id);
        }
    }

    /// Remove a node, returning whether it was present
    pub fn remove_child(&mut self, id: NodeId) -> bool {
        let before = self.members.len();
        self.members.retain(|&member| member != id);
        self.members.len() != before
    }

    /// True if the node is a member
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    /// Members in insertion order
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.members
    }

    /// Number of members
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when there are no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Drop every member
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Propagate world transforms from every member that is still in `tree`
    ///
    /// Each member starts from its parent's world matrix, so members should
    /// be listed parents first when they share a hierarchy. Returns the total
    /// number of node updates.
    pub fn update_world_transforms(&self, tree: &mut NodeTree) -> usize {
        let visited = self
            .members
            .iter()
            .filter_map(|&id| tree.update_world_transforms(id).ok())
            .sum();
        log::debug!("Scene graph of {} members updated {visited} nodes", self.members.len());
        visited
    }
}

impl RenderList for SceneGraph {
    fn members(&self) -> &[NodeId] {
        &self.members
    }
}

/// Visit every member of `list` and all of its descendants, pre-order
///
/// Ids that are no longer in `tree` are skipped along with their subtree.
pub fn walk<L, F>(list: &L, tree: &NodeTree, mut visitor: F)
where
    L: RenderList + ?Sized,
    F: FnMut(NodeId, &Node),
{
    let mut stack: Vec<NodeId> = Vec::new();
    for &member in list.members() {
        stack.push(member);
        while let Some(id) = stack.pop() {
            let Some(node) = tree.get(id) else {
                continue;
            };
            visitor(id, node);
            stack.extend(node.children().iter().rev());
        }
    }
}
