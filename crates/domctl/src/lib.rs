//! domctl - page controller
//!
//! A controller resolves a static tree of selector expressions into cached
//! element collections, binds delegated event handlers by selector string,
//! and exposes a vendor hook for third-party setup.
//!
//! Resolution happens once, at initialization: the cached element tree can
//! go stale when the DOM mutates afterwards. Delegated bindings re-match
//! against the live tree on every dispatch and are unaffected.

mod config;
mod controller;
mod delegate;
mod resolver;

pub use config::{ResolvedNode, SelectorNode};
pub use controller::{Controller, ControllerError, VendorHook};
pub use delegate::DelegateHandler;
pub use resolver::{QueryError, resolve};

pub use domctl_dom as dom;
pub use domctl_select as select;

pub use domctl_dom::{Document, DomTree, Event, EventType, NodeId};
