//! domctl DOM - in-process document tree
//!
//! Arena-based DOM tree with document-order traversal and DOM-style
//! event objects. This is the element store the controller crate resolves
//! selectors against and dispatches delegated events through.

mod document;
mod event;
mod node;
mod tree;

pub use document::Document;
pub use event::{Event, EventType};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::{Ancestors, Children, Descendants, DomError, DomResult, DomTree};

use serde::{Deserialize, Serialize};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for an absent link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this ID refers to a real node slot
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
