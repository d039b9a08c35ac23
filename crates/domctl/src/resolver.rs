//! Selector-tree resolution
//!
//! Walks a `SelectorNode` tree and replaces every leaf with the collection
//! of elements it matches within a context, preserving the tree shape
//! exactly: same keys, same nesting, nothing added or removed.

use std::collections::BTreeMap;

use domctl_dom::{DomTree, NodeId};
use domctl_select::{self as select, SelectorError};
use thiserror::Error;

use crate::config::{ResolvedNode, SelectorNode};

/// A selector expression in the tree failed to parse
///
/// Surfaced to the initializer, which treats it as a fatal configuration
/// error; there is no partial resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query '{expression}' at '{path}' failed: {source}")]
pub struct QueryError {
    /// Dotted key path from the tree root (empty for a bare leaf)
    pub path: String,
    /// Offending selector expression
    pub expression: String,
    #[source]
    pub source: SelectorError,
}

/// Resolve a selector tree against `context`
///
/// Expression leaves become the elements they match within `context`, in
/// document order; an empty match is an empty collection, not an error.
/// Handle leaves pass through as one-element collections regardless of
/// context. Resolution is not cached here: callers resolve once at
/// initialization and own the staleness trade-off.
pub fn resolve(
    tree: &DomTree,
    node: &SelectorNode,
    context: NodeId,
) -> Result<ResolvedNode, QueryError> {
    resolve_at(tree, node, context, &mut Vec::new())
}

fn resolve_at<'a>(
    tree: &DomTree,
    node: &'a SelectorNode,
    context: NodeId,
    path: &mut Vec<&'a str>,
) -> Result<ResolvedNode, QueryError> {
    match node {
        SelectorNode::Query(expr) => {
            let list = select::parse(expr).map_err(|source| QueryError {
                path: path.join("."),
                expression: expr.clone(),
                source,
            })?;
            Ok(ResolvedNode::Collection(select::query_all(
                tree, context, &list,
            )))
        }
        SelectorNode::Handle(id) => Ok(ResolvedNode::Collection(vec![*id])),
        SelectorNode::Group(map) => {
            let mut resolved = BTreeMap::new();
            for (key, child) in map {
                path.push(key);
                let value = resolve_at(tree, child, context, path)?;
                path.pop();
                resolved.insert(key.clone(), value);
            }
            Ok(ResolvedNode::Group(resolved))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// <body><form class="search"/><div class="x"/><div class="x"/>
    ///       <a class="modal"/></body>
    fn fixture() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        tree.append_child(NodeId::ROOT, body).unwrap();

        let form = tree.create_element("form");
        tree.set_attr(form, "class", "search").unwrap();
        tree.append_child(body, form).unwrap();

        let div1 = tree.create_element("div");
        tree.set_attr(div1, "class", "x").unwrap();
        tree.append_child(body, div1).unwrap();

        let div2 = tree.create_element("div");
        tree.set_attr(div2, "class", "x").unwrap();
        tree.append_child(body, div2).unwrap();

        let link = tree.create_element("a");
        tree.set_attr(link, "class", "modal").unwrap();
        tree.append_child(body, link).unwrap();

        (tree, form, div1, div2, link)
    }

    #[test]
    fn test_leaf_substitution() {
        let (tree, _, div1, div2, _) = fixture();
        let config = SelectorNode::group([("a", SelectorNode::query("div.x"))]);

        let resolved = resolve(&tree, &config, NodeId::ROOT).unwrap();
        let leaf = resolved.get("a").unwrap();
        assert_eq!(leaf.collection(), Some(&[div1, div2][..]));
    }

    #[test]
    fn test_empty_match_is_not_an_error() {
        let (tree, ..) = fixture();
        let config = SelectorNode::group([("a", SelectorNode::query("span.none-exist"))]);

        let resolved = resolve(&tree, &config, NodeId::ROOT).unwrap();
        assert_eq!(resolved.get("a").unwrap().collection(), Some(&[][..]));
    }

    #[test]
    fn test_nested_resolution() {
        let (tree, form, _, _, link) = fixture();
        let config = SelectorNode::group([(
            "group",
            SelectorNode::group([
                ("a", SelectorNode::query("form.search")),
                ("b", SelectorNode::query("a.modal")),
            ]),
        )]);

        let resolved = resolve(&tree, &config, NodeId::ROOT).unwrap();
        let group = resolved.get("group").unwrap();
        assert_eq!(group.get("a").unwrap().collection(), Some(&[form][..]));
        assert_eq!(group.get("b").unwrap().collection(), Some(&[link][..]));
    }

    #[test]
    fn test_shape_preservation_deep() {
        let (tree, ..) = fixture();
        let config = SelectorNode::group([(
            "l1",
            SelectorNode::group([(
                "l2",
                SelectorNode::group([
                    ("l3", SelectorNode::query("div.x")),
                    ("other", SelectorNode::query("a.modal")),
                ]),
            )]),
        )]);

        let resolved = resolve(&tree, &config, NodeId::ROOT).unwrap();
        let l2 = resolved.get("l1").unwrap().get("l2").unwrap();
        assert!(l2.is_group());
        assert_eq!(l2.len(), 2);
        assert!(l2.get("l3").is_some());
        assert!(l2.get("other").is_some());
        assert!(l2.get("added").is_none());
    }

    #[test]
    fn test_shape_idempotence() {
        let (tree, ..) = fixture();
        let config = SelectorNode::group([
            ("divs", SelectorNode::query("div.x")),
            ("links", SelectorNode::query("a.modal")),
        ]);

        let first = resolve(&tree, &config, NodeId::ROOT).unwrap();
        let second = resolve(&tree, &config, NodeId::ROOT).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_handle_leaf_passes_through() {
        let (tree, form, ..) = fixture();
        let config = SelectorNode::group([("cached", SelectorNode::handle(form))]);

        let resolved = resolve(&tree, &config, NodeId::ROOT).unwrap();
        assert_eq!(
            resolved.get("cached").unwrap().collection(),
            Some(&[form][..])
        );
    }

    #[test]
    fn test_scoped_to_context() {
        let (mut tree, form, ..) = fixture();
        let inner = tree.create_element("input");
        tree.set_attr(inner, "class", "x").unwrap();
        tree.append_child(form, inner).unwrap();

        let config = SelectorNode::query("*");
        let resolved = resolve(&tree, &config, form).unwrap();
        assert_eq!(resolved.collection(), Some(&[inner][..]));
    }

    #[test]
    fn test_invalid_expression_reports_key_path() {
        let (tree, ..) = fixture();
        let config = SelectorNode::group([("a", SelectorNode::query("::::invalid"))]);

        let err = resolve(&tree, &config, NodeId::ROOT).unwrap_err();
        assert_eq!(err.path, "a");
        assert_eq!(err.expression, "::::invalid");

        let nested = SelectorNode::group([(
            "modal",
            SelectorNode::group([("links", SelectorNode::query("a:hover"))]),
        )]);
        let err = resolve(&tree, &nested, NodeId::ROOT).unwrap_err();
        assert_eq!(err.path, "modal.links");
    }
}
