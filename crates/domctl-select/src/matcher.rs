//! Selector matching and scoped queries

use domctl_dom::{DomTree, ElementData, NodeId};

use crate::parser::{
    AttrMatcher, AttrSelector, Combinator, ComplexSelector, CompoundSelector, SelectorList,
    SimpleSelector,
};

/// Whether the element `id` matches any alternative in the list
pub fn matches(tree: &DomTree, id: NodeId, list: &SelectorList) -> bool {
    list.selectors
        .iter()
        .any(|complex| matches_complex(tree, id, complex))
}

/// All element descendants of `context` matching the list, in document order
///
/// An empty result is a normal outcome, not an error.
pub fn query_all(tree: &DomTree, context: NodeId, list: &SelectorList) -> Vec<NodeId> {
    tree.descendants(context)
        .filter(|&id| is_element(tree, id))
        .filter(|&id| matches(tree, id, list))
        .collect()
}

fn matches_complex(tree: &DomTree, id: NodeId, complex: &ComplexSelector) -> bool {
    let Some(rightmost) = complex.compounds.len().checked_sub(1) else {
        return false;
    };
    matches_from(tree, id, complex, rightmost)
}

/// Match `compounds[idx]` against `id`, then walk leftward through
/// combinators toward the start of the complex selector.
fn matches_from(tree: &DomTree, id: NodeId, complex: &ComplexSelector, idx: usize) -> bool {
    if !matches_compound(tree, id, &complex.compounds[idx]) {
        return false;
    }
    if idx == 0 {
        return true;
    }
    match complex.combinators[idx - 1] {
        Combinator::Child => tree
            .parent(id)
            .is_some_and(|p| is_element(tree, p) && matches_from(tree, p, complex, idx - 1)),
        Combinator::Descendant => tree
            .ancestors(id)
            .filter(|&a| is_element(tree, a))
            .any(|a| matches_from(tree, a, complex, idx - 1)),
    }
}

fn matches_compound(tree: &DomTree, id: NodeId, compound: &CompoundSelector) -> bool {
    let Some(elem) = tree.get(id).and_then(|node| node.as_element()) else {
        return false;
    };
    compound.simples.iter().all(|s| matches_simple(elem, s))
}

fn matches_simple(elem: &ElementData, simple: &SimpleSelector) -> bool {
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => elem.tag.eq_ignore_ascii_case(tag),
        SimpleSelector::Id(id) => elem.id.as_deref() == Some(id.as_str()),
        SimpleSelector::Class(class) => elem.has_class(class),
        SimpleSelector::Attr(attr) => matches_attr(elem, attr),
    }
}

fn matches_attr(elem: &ElementData, attr: &AttrSelector) -> bool {
    let value = elem.get_attr(&attr.name);
    match (&attr.matcher, value) {
        (None, Some(_)) => true,
        (Some(matcher), Some(value)) => match matcher {
            AttrMatcher::Exact(expected) => value == expected.as_str(),
            AttrMatcher::Includes(expected) => {
                value.split_whitespace().any(|word| word == expected.as_str())
            }
            AttrMatcher::DashMatch(expected) => {
                value == expected.as_str()
                    || value
                        .strip_prefix(expected.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            AttrMatcher::Prefix(expected) => value.starts_with(expected.as_str()),
            AttrMatcher::Suffix(expected) => value.ends_with(expected.as_str()),
            AttrMatcher::Substring(expected) => value.contains(expected.as_str()),
        },
        (_, None) => false,
    }
}

fn is_element(tree: &DomTree, id: NodeId) -> bool {
    tree.get(id).is_some_and(|node| node.is_element())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    /// <body><div class="x"><span id="s" data-role="note"></span></div>
    ///       <div class="x y"></div><p lang="en-US"></p></body>
    fn fixture() -> (DomTree, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        tree.append_child(NodeId::ROOT, body).unwrap();

        let div1 = tree.create_element("div");
        tree.set_attr(div1, "class", "x").unwrap();
        tree.append_child(body, div1).unwrap();

        let span = tree.create_element("span");
        tree.set_attr(span, "id", "s").unwrap();
        tree.set_attr(span, "data-role", "note").unwrap();
        tree.append_child(div1, span).unwrap();

        let div2 = tree.create_element("div");
        tree.set_attr(div2, "class", "x y").unwrap();
        tree.append_child(body, div2).unwrap();

        let p = tree.create_element("p");
        tree.set_attr(p, "lang", "en-US").unwrap();
        tree.append_child(body, p).unwrap();

        (tree, body, div1, span, div2, p)
    }

    #[test]
    fn test_match_simple_selectors() {
        let (tree, _, div1, span, div2, _) = fixture();

        let by_class = parse("div.x").unwrap();
        assert!(matches(&tree, div1, &by_class));
        assert!(matches(&tree, div2, &by_class));
        assert!(!matches(&tree, span, &by_class));

        let by_id = parse("#s").unwrap();
        assert!(matches(&tree, span, &by_id));

        // type names compare case-insensitively
        let by_type = parse("DIV").unwrap();
        assert!(matches(&tree, div1, &by_type));
    }

    #[test]
    fn test_match_attribute_selectors() {
        let (tree, _, _, span, _, p) = fixture();

        assert!(matches(&tree, span, &parse("[data-role]").unwrap()));
        assert!(matches(&tree, span, &parse("[data-role=note]").unwrap()));
        assert!(!matches(&tree, span, &parse("[data-role=other]").unwrap()));
        assert!(matches(&tree, p, &parse("[lang|=en]").unwrap()));
        assert!(matches(&tree, p, &parse("[lang^=en]").unwrap()));
        assert!(matches(&tree, p, &parse("[lang$=US]").unwrap()));
        assert!(matches(&tree, p, &parse("[lang*=n-U]").unwrap()));
    }

    #[test]
    fn test_match_combinators() {
        let (tree, _, _, span, _, _) = fixture();

        assert!(matches(&tree, span, &parse("div.x > span").unwrap()));
        assert!(matches(&tree, span, &parse("body span").unwrap()));
        assert!(!matches(&tree, span, &parse("body > span").unwrap()));
        assert!(!matches(&tree, span, &parse("div.y span").unwrap()));
    }

    #[test]
    fn test_query_all_document_order() {
        let (tree, body, div1, span, div2, p) = fixture();

        let divs = query_all(&tree, NodeId::ROOT, &parse("div.x").unwrap());
        assert_eq!(divs, vec![div1, div2]);

        let all = query_all(&tree, body, &parse("*").unwrap());
        assert_eq!(all, vec![div1, span, div2, p]);

        // list alternatives merge in document order
        let mixed = query_all(&tree, NodeId::ROOT, &parse("p, div.y").unwrap());
        assert_eq!(mixed, vec![div2, p]);
    }

    #[test]
    fn test_query_scoped_to_context() {
        let (tree, _, div1, span, _, _) = fixture();

        let spans = query_all(&tree, div1, &parse("span").unwrap());
        assert_eq!(spans, vec![span]);

        // the context element itself never matches
        let divs = query_all(&tree, div1, &parse("div").unwrap());
        assert!(divs.is_empty());
    }

    #[test]
    fn test_query_empty_match() {
        let (tree, _, _, _, _, _) = fixture();
        let none = query_all(&tree, NodeId::ROOT, &parse("table.none-exist").unwrap());
        assert!(none.is_empty());
    }
}
