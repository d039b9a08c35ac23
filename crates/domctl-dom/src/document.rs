//! Document - high-level document API

use crate::{DomTree, NodeId};

/// A document with the standard html/head/body skeleton
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    html: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Document {
    /// Create a new document with html/head/body structure
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes are detached, so linking cannot fail.
        let root = tree.root();
        tree.attach(root, html);
        tree.attach(html, head);
        tree.attach(html, body);

        Self {
            tree,
            html,
            head,
            body,
        }
    }

    /// Root document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).find(|&node_id| {
            self.tree
                .get(node_id)
                .and_then(|node| node.as_element())
                .and_then(|elem| elem.id.as_deref())
                == Some(id)
        })
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
