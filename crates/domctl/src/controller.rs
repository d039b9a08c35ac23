//! Page controller
//!
//! Owns the selector configuration, the resolved element cache, and the
//! delegated bindings. One explicit instance per context root, constructed
//! and owned by the caller; there is no global registration and
//! construction never touches the DOM.

use domctl_dom::{DomTree, Event, EventType, NodeId};
use domctl_select as select;
use thiserror::Error;

use crate::config::{ResolvedNode, SelectorNode};
use crate::delegate::{DelegateHandler, DelegateTable};
use crate::resolver::{QueryError, resolve};

/// Third-party setup hook, run at the end of each initialization
pub type VendorHook = Box<dyn FnMut(&ResolvedNode) -> anyhow::Result<()>>;

/// Controller errors
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("controller is already initialized")]
    AlreadyInitialized,
    #[error("controller is not initialized")]
    NotInitialized,
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("vendor setup failed: {0}")]
    Vendor(#[from] anyhow::Error),
}

/// Page controller
///
/// Lifecycle: `new` → `on`/`vendor` registrations → `initialize` →
/// `dispatch` from the host event loop → optional `teardown` (which
/// returns the bindings to the registration list and permits a later
/// re-initialize).
pub struct Controller {
    selectors: SelectorNode,
    pending: Vec<PendingBinding>,
    vendor: Option<VendorHook>,
    state: Option<Initialized>,
}

struct PendingBinding {
    event_type: EventType,
    selector: String,
    handler: DelegateHandler,
}

struct Initialized {
    context: NodeId,
    elements: ResolvedNode,
    delegates: DelegateTable,
}

impl Controller {
    /// Create a controller with a selector configuration
    pub fn new(selectors: SelectorNode) -> Self {
        Self {
            selectors,
            pending: Vec::new(),
            vendor: None,
            state: None,
        }
    }

    /// Register a delegated binding
    ///
    /// The selector string is validated during `initialize` and re-matched
    /// against the live tree on every dispatch. Registrations are retained
    /// across failed initializations and teardown; those made while the
    /// controller is initialized take effect on the next initialize.
    pub fn on(
        &mut self,
        event_type: EventType,
        selector: impl Into<String>,
        handler: impl FnMut(&mut Event, NodeId) + 'static,
    ) -> &mut Self {
        self.pending.push(PendingBinding {
            event_type,
            selector: selector.into(),
            handler: Box::new(handler),
        });
        self
    }

    /// Register a third-party setup hook
    ///
    /// Runs during each `initialize`, after the selector tree is resolved
    /// and every binding selector has been validated. The hook stays
    /// registered, so a failed initialization can be retried. No-op when
    /// never set.
    pub fn vendor(
        &mut self,
        hook: impl FnMut(&ResolvedNode) -> anyhow::Result<()> + 'static,
    ) -> &mut Self {
        self.vendor = Some(Box::new(hook));
        self
    }

    /// Initialize against a context root (the tree root when `None`)
    ///
    /// Resolves the selector tree against the context and caches the
    /// result, validates all binding selectors, then runs the vendor hook.
    /// Any invalid selector expression aborts with a `QueryError`; a
    /// failed initialization consumes nothing, so it can be retried.
    pub fn initialize(
        &mut self,
        tree: &DomTree,
        context: Option<NodeId>,
    ) -> Result<(), ControllerError> {
        if self.state.is_some() {
            return Err(ControllerError::AlreadyInitialized);
        }
        let context = context.unwrap_or_else(|| tree.root());

        let elements = resolve(tree, &self.selectors, context)?;

        // Validate every binding selector before consuming any of them.
        let mut parsed = Vec::with_capacity(self.pending.len());
        for binding in &self.pending {
            let list = select::parse(&binding.selector).map_err(|source| QueryError {
                path: format!("on:{}", binding.event_type.as_str()),
                expression: binding.selector.clone(),
                source,
            })?;
            parsed.push(list);
        }

        if let Some(hook) = self.vendor.as_mut() {
            hook(&elements)?;
        }

        let mut delegates = DelegateTable::new(context);
        for (binding, list) in self.pending.drain(..).zip(parsed) {
            delegates.bind(binding.event_type, binding.selector, list, binding.handler);
        }

        tracing::info!(
            "controller initialized at {:?} with {} delegated bindings",
            context,
            delegates.len()
        );

        self.state = Some(Initialized {
            context,
            elements,
            delegates,
        });
        Ok(())
    }

    /// Whether `initialize` has run
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Context root chosen at initialization
    pub fn context(&self) -> Option<NodeId> {
        self.state.as_ref().map(|s| s.context)
    }

    /// Cached element tree resolved at initialization
    ///
    /// Collections reflect the DOM as of `initialize`; they are not
    /// refreshed when the tree mutates afterwards. Delegated bindings are
    /// unaffected by that staleness.
    pub fn elements(&self) -> Result<&ResolvedNode, ControllerError> {
        self.state
            .as_ref()
            .map(|s| &s.elements)
            .ok_or(ControllerError::NotInitialized)
    }

    /// Feed an event from the host loop through the delegated bindings
    ///
    /// Does nothing before initialization or after teardown.
    pub fn dispatch(&mut self, tree: &DomTree, event: &mut Event) {
        if let Some(state) = self.state.as_mut() {
            state.delegates.dispatch(tree, event);
        }
    }

    /// Unbind all delegates and drop the cached element tree
    ///
    /// Handlers return to the registration list in their original order,
    /// ahead of anything registered while initialized, so a later
    /// `initialize` against a new context rebinds them all.
    pub fn teardown(&mut self) {
        if let Some(state) = self.state.take() {
            let mut restored: Vec<PendingBinding> = state
                .delegates
                .unbind_all()
                .into_iter()
                .map(|(event_type, selector, handler)| PendingBinding {
                    event_type,
                    selector,
                    handler,
                })
                .collect();
            restored.append(&mut self.pending);
            self.pending = restored;
            tracing::info!("controller torn down");
        }
    }
}
