//! Selector-tree configuration
//!
//! The selector tree is static configuration: defined once, resolved once
//! per controller initialization. Leaves are selector expressions or
//! pre-resolved element handles; groups are named sub-trees.

use std::collections::BTreeMap;

use domctl_dom::NodeId;
use serde::{Deserialize, Serialize};

/// A node in the selector configuration tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorNode {
    /// Selector expression leaf
    Query(String),
    /// Already-resolved element leaf
    Handle(NodeId),
    /// Named sub-tree
    Group(BTreeMap<String, SelectorNode>),
}

impl SelectorNode {
    /// Selector expression leaf
    pub fn query(expr: impl Into<String>) -> Self {
        Self::Query(expr.into())
    }

    /// Pre-resolved element leaf
    pub fn handle(id: NodeId) -> Self {
        Self::Handle(id)
    }

    /// Named group from (key, node) pairs
    pub fn group<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SelectorNode)>,
        K: Into<String>,
    {
        Self::Group(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Result of resolving a `SelectorNode` tree
///
/// Shape-isomorphic to its source: leaves become element collections,
/// groups keep exactly the same keys.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedNode {
    /// Elements matched by one leaf, in document order (possibly empty)
    Collection(Vec<NodeId>),
    /// Resolved sub-tree
    Group(BTreeMap<String, ResolvedNode>),
}

impl ResolvedNode {
    /// Child node by key (groups only)
    pub fn get(&self, key: &str) -> Option<&ResolvedNode> {
        match self {
            Self::Group(map) => map.get(key),
            Self::Collection(_) => None,
        }
    }

    /// Matched elements (leaves only)
    pub fn collection(&self) -> Option<&[NodeId]> {
        match self {
            Self::Collection(ids) => Some(ids),
            Self::Group(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Number of matched elements for a leaf, or entries for a group
    pub fn len(&self) -> usize {
        match self {
            Self::Collection(ids) => ids.len(),
            Self::Group(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_builder() {
        let tree = SelectorNode::group([
            ("search", SelectorNode::query("form.search")),
            ("modal", SelectorNode::group([("links", SelectorNode::query("a.modal"))])),
        ]);

        let SelectorNode::Group(map) = &tree else {
            panic!("expected group");
        };
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("search"),
            Some(&SelectorNode::Query("form.search".to_string()))
        );
    }

    #[test]
    fn test_resolved_accessors() {
        let resolved = ResolvedNode::Group(BTreeMap::from([(
            "a".to_string(),
            ResolvedNode::Collection(vec![NodeId::ROOT]),
        )]));

        assert!(resolved.is_group());
        assert_eq!(resolved.len(), 1);
        let leaf = resolved.get("a").unwrap();
        assert_eq!(leaf.collection(), Some(&[NodeId::ROOT][..]));
        assert!(leaf.get("a").is_none());
    }
}
