//! Delegated event bindings
//!
//! Bindings pair an event type with a selector. Dispatch re-matches the
//! selector against the live tree on every event, so elements added after
//! binding still trigger handlers; nothing here reads the cached element
//! tree.

use domctl_dom::{DomTree, Event, EventType, NodeId};
use domctl_select::{self as select, SelectorList};

/// Handler invoked with the event and the element the selector matched
pub type DelegateHandler = Box<dyn FnMut(&mut Event, NodeId)>;

struct Binding {
    event_type: EventType,
    /// Raw selector text, kept so handlers can be unbound and re-bound
    source: String,
    selector: SelectorList,
    handler: DelegateHandler,
}

/// Table of delegated bindings scoped to a context root
pub(crate) struct DelegateTable {
    context: NodeId,
    bindings: Vec<Binding>,
}

impl DelegateTable {
    pub(crate) fn new(context: NodeId) -> Self {
        Self {
            context,
            bindings: Vec::new(),
        }
    }

    pub(crate) fn bind(
        &mut self,
        event_type: EventType,
        source: impl Into<String>,
        selector: SelectorList,
        handler: DelegateHandler,
    ) {
        self.bindings.push(Binding {
            event_type,
            source: source.into(),
            selector,
            handler,
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Give the handlers back, in binding order
    pub(crate) fn unbind_all(self) -> Vec<(EventType, String, DelegateHandler)> {
        self.bindings
            .into_iter()
            .map(|b| (b.event_type, b.source, b.handler))
            .collect()
    }

    /// Dispatch an event bubbling up from its target
    ///
    /// Walks from the target toward the context root (exclusive), firing
    /// every binding whose event type matches and whose selector matches
    /// the element under the cursor. Non-bubbling events only consider the
    /// target; `stop_propagation` halts the walk after the current element.
    pub(crate) fn dispatch(&mut self, tree: &DomTree, event: &mut Event) {
        // Events originating outside the context subtree never delegate.
        if !tree.contains(self.context, event.target) {
            return;
        }
        let mut current = event.target;
        while current != self.context {
            if tree.get(current).is_some_and(|node| node.is_element()) {
                event.current_target = Some(current);
                for binding in self.bindings.iter_mut() {
                    if binding.event_type == event.event_type
                        && select::matches(tree, current, &binding.selector)
                    {
                        tracing::debug!(
                            "delegated {} handler fired at {:?}",
                            event.event_type.as_str(),
                            current
                        );
                        (binding.handler)(event, current);
                    }
                }
            }
            if !event.bubbles || event.is_propagation_stopped() {
                break;
            }
            match tree.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        event.current_target = None;
    }
}
