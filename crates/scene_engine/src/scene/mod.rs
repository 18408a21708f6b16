//! Scene layer: TRS nodes, parent/child hierarchy and render lists
//!
//! - [`Transform`]: a translation/rotation/scale value and its composition to a matrix
//! - [`Node`]: a transform with a lazily recomputed local matrix
//! - [`NodeTree`]: arena that owns nodes and their parent/child links
//! - [`SceneGraph`]: flat list of nodes to draw, independent of parentage
//!
//! World transforms are `parent_world * local`, written by a pre-order pass
//! ([`NodeTree::update_world_transforms`]) that must run after mutations and
//! before anything reads [`Node::world_transform`].

use slotmap::new_key_type;

pub mod node;
pub mod scene_graph;
pub mod transform;
pub mod tree;

#[cfg(test)]
mod tests;

pub use node::Node;
pub use scene_graph::{walk, RenderList, SceneGraph, Spatial};
pub use transform::{compose, Transform};
pub use tree::NodeTree;

new_key_type! {
    /// Handle to a [`Node`] stored in a [`NodeTree`]
    pub struct NodeId;
}

/// Errors from hierarchy edits
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not refer to a node in this tree
    #[error("Node {0:?} not found")]
    NodeNotFound(NodeId),

    /// The child must be detached before it can be attached elsewhere
    #[error("Node {child:?} is already a child of {parent:?}")]
    AlreadyHasParent {
        /// Node being attached
        child: NodeId,
        /// Its current parent
        parent: NodeId,
    },

    /// Attaching would make a node its own ancestor
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },

    /// The node is not a child of the given parent
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Expected parent
        parent: NodeId,
        /// Node that was not found among its children
        child: NodeId,
    },
}

/// Scene result type
pub type SceneResult<T> = Result<T, SceneError>;
