//! DOM-style event objects
//!
//! Events carry target and propagation state only; bubbling and delegated
//! matching live in the controller crate.

use crate::NodeId;

/// Event types understood by delegated bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Submit,
    Click,
    DblClick,
    Change,
    Input,
    KeyDown,
    KeyUp,
    Focus,
    Blur,
}

impl EventType {
    /// DOM event name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Click => "click",
            Self::DblClick => "dblclick",
            Self::Change => "change",
            Self::Input => "input",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Focus => "focus",
            Self::Blur => "blur",
        }
    }

    /// Whether events of this type bubble
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::Focus | Self::Blur)
    }

    /// Whether the default action can be prevented
    pub fn cancelable(self) -> bool {
        matches!(
            self,
            Self::Submit | Self::Click | Self::DblClick | Self::KeyDown | Self::KeyUp
        )
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    /// Element the event originated at
    pub target: NodeId,
    /// Element whose handlers are currently running (set during dispatch)
    pub current_target: Option<NodeId>,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event targeted at a node
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            bubbles: event_type.bubbles(),
            cancelable: event_type.cancelable(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create a click event
    pub fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, target)
    }

    /// Create a submit event
    pub fn submit(target: NodeId) -> Self {
        Self::new(EventType::Submit, target)
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
