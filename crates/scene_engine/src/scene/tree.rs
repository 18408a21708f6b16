//! # Node Tree
//!
//! [`NodeTree`] owns every [`Node`] in an arena and is the only place that
//! edits parent/child links. A child holds a plain [`NodeId`] back to its
//! parent; it never keeps the parent alive.
//!
//! ## Propagation
//!
//! [`NodeTree::update_world_transforms`] walks a subtree pre-order with an
//! explicit stack. Each node's world matrix is `parent_world * local`, where
//! `parent_world` was written earlier in the same pass.
//!
//! ```
//! use scene_engine::scene::{Node, NodeTree};
//! use scene_engine::foundation::math::Vec3;
//!
//! let mut tree = NodeTree::new();
//! let parent = tree.insert(Node::new());
//! let child = tree.create();
//! tree.add_child(parent, child).unwrap();
//!
//! tree[parent].translate_x(2.0);
//! tree[child].translate_x(1.0);
//! tree.update_world_transforms(parent).unwrap();
//!
//! let origin = tree[child].local_to_world(Vec3::ZERO);
//! assert_eq!(origin, Vec3::new(3.0, 0.0, 0.0));
//! ```
//!
//! Indexing with `tree[id]` panics on a removed id. Use [`NodeTree::get`] or
//! [`NodeTree::get_mut`] when the id may be stale.

use std::ops::{Index, IndexMut};

use slotmap::SlotMap;

use super::node::Node;
use super::{NodeId, SceneError, SceneResult};
use crate::foundation::math::Mat4;

/// Arena of nodes and their hierarchy
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: SlotMap<NodeId, Node>,
}

impl NodeTree {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Create an empty tree with room for `capacity` nodes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    // ========================================================================
    // STORAGE
    // ========================================================================

    /// Take ownership of a node as a new root
    ///
    /// Any links the node carried from another tree are dropped.
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        self.nodes.insert(node)
    }

    /// Insert a default node
    pub fn create(&mut self) -> NodeId {
        self.insert(Node::new())
    }

    /// Node by id
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// True if the id refers to a live node
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node with no parent
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Every node in storage order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    fn node(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes.get(id).ok_or(SceneError::NodeNotFound(id))
    }

    // ========================================================================
    // HIERARCHY
    // ========================================================================

    /// Parent of `id`, if it has one
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of `id` in attachment order; empty for unknown ids
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// True if `ancestor` appears on the parent chain above `node`
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Attach `child` as the last child of `parent`
    ///
    /// # Errors
    ///
    /// - [`SceneError::NodeNotFound`] if either id is unknown
    /// - [`SceneError::AlreadyHasParent`] if `child` must be detached first
    /// - [`SceneError::CycleDetected`] if `child` is `parent` or one of its ancestors
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.node(parent)?;
        if let Some(current) = self.node(child)?.parent {
            return Err(SceneError::AlreadyHasParent { child, parent: current });
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(SceneError::CycleDetected { parent, child });
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        log::debug!("Attached node {child:?} to {parent:?}");
        Ok(())
    }

    /// Attach several children in order, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Same as [`NodeTree::add_child`].
    pub fn add_children(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) -> SceneResult<()> {
        children
            .into_iter()
            .try_for_each(|child| self.add_child(parent, child))
    }

    /// Detach `child` from its parent, returning the former parent
    ///
    /// Detaching a root is a no-op that returns `None`.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] if `child` is unknown.
    pub fn detach(&mut self, child: NodeId) -> SceneResult<Option<NodeId>> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(None);
        };

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&id| id != child);
        }
        self.nodes[child].parent = None;
        log::debug!("Detached node {child:?} from {parent:?}");
        Ok(Some(parent))
    }

    /// Detach `child` only if it currently hangs under `parent`
    ///
    /// # Errors
    ///
    /// - [`SceneError::NodeNotFound`] if either id is unknown
    /// - [`SceneError::NotAChild`] if `child` has a different parent or none
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(SceneError::NotAChild { parent, child });
        }
        self.detach(child).map(|_| ())
    }

    /// Remove a node from the tree and return it
    ///
    /// The node is detached from its parent. Its children stay in the tree as
    /// new roots. The returned node has no links.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] if `id` is unknown.
    pub fn remove(&mut self, id: NodeId) -> SceneResult<Node> {
        self.detach(id)?;
        let mut node = self.nodes.remove(id).ok_or(SceneError::NodeNotFound(id))?;

        for &child in &node.children {
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.parent = None;
            }
        }
        log::debug!("Removed node {id:?}, orphaned {} children", node.children.len());
        node.children.clear();
        Ok(node)
    }

    // ========================================================================
    // WORLD TRANSFORM PROPAGATION
    // ========================================================================

    /// Recompute world matrices for `root` and everything below it
    ///
    /// `root` starts from its parent's current world matrix, or identity if
    /// it has no parent. Returns the number of nodes updated.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] if `root` is unknown.
    pub fn update_world_transforms(&mut self, root: NodeId) -> SceneResult<usize> {
        let parent_world = match self.node(root)?.parent {
            Some(parent) => *self.node(parent)?.world_transform(),
            None => Mat4::IDENTITY,
        };
        self.update_world_transforms_with(root, &parent_world)
    }

    /// Recompute world matrices below `root` starting from `parent_world`
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] if `root` is unknown.
    pub fn update_world_transforms_with(
        &mut self,
        root: NodeId,
        parent_world: &Mat4,
    ) -> SceneResult<usize> {
        self.node(root)?;

        let mut stack = vec![(root, *parent_world)];
        let mut visited = 0;
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            let world = parent_world * node.transform();
            node.set_world_transform(world);
            // reversed so the first child is popped first
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
            visited += 1;
        }

        log::debug!("Propagated world transforms from {root:?} through {visited} nodes");
        Ok(visited)
    }

    /// Recompute world matrices for every tree in the arena
    pub fn update_all(&mut self) -> usize {
        let roots: Vec<NodeId> = self.roots().collect();
        roots
            .into_iter()
            .filter_map(|root| self.update_world_transforms_with(root, &Mat4::IDENTITY).ok())
            .sum()
    }
}

impl Index<NodeId> for NodeTree {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

impl IndexMut<NodeId> for NodeTree {
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }
}
