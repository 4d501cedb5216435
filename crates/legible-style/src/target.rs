#![forbid(unsafe_code)]

//! The host element boundary.
//!
//! The engine never owns document elements. Hosts expose their element
//! handles through [`StyleTarget`]; every method takes `&self` because host
//! handles are shared references into a document the host owns.

use crate::property::{Priority, StyleProperty};

/// Stable identity of a host element for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Create an element ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Style access to one host element.
pub trait StyleTarget {
    /// Stable identity of the element.
    fn id(&self) -> ElementId;

    /// The value declared in the element's own inline style, if any.
    fn inline_value(&self, property: StyleProperty) -> Option<String>;

    /// The resolved value after the cascade (stylesheets, inheritance,
    /// defaults). Hosts return `None` when the value cannot be computed.
    fn computed_value(&self, property: StyleProperty) -> Option<String>;

    /// Declare an inline value.
    fn set_inline_value(&self, property: StyleProperty, value: &str, priority: Priority);

    /// Drop the inline declaration of `property`.
    fn remove_inline_value(&self, property: StyleProperty);

    /// The element's text content.
    fn text_content(&self) -> String;

    /// Whether the element is still attached to its document.
    fn is_attached(&self) -> bool {
        true
    }
}
