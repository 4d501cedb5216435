#![forbid(unsafe_code)]

//! In-memory host element.
//!
//! [`MemoryElement`] models just enough of a document element for headless
//! use: an inline declaration block, a base layer standing in for page
//! stylesheets, browser-like computed defaults, text content, and an attached
//! flag. Computed values resolve inline → base → default.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::property::{Priority, StyleProperty};
use crate::target::{ElementId, StyleTarget};

/// A headless element implementing [`StyleTarget`].
#[derive(Debug)]
pub struct MemoryElement {
    id: ElementId,
    text: String,
    inline: RefCell<BTreeMap<StyleProperty, (String, Priority)>>,
    base: BTreeMap<StyleProperty, String>,
    attached: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryElement {
    /// An attached element with no declarations and empty text.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id: ElementId::new(id),
            text: String::new(),
            inline: RefCell::new(BTreeMap::new()),
            base: BTreeMap::new(),
            attached: Cell::new(true),
            writes: Cell::new(0),
        }
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set a stylesheet-level value, visible only through computed values.
    #[must_use]
    pub fn with_base(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.base.insert(property, value.into());
        self
    }

    /// Seed an inline declaration without counting it as a write.
    #[must_use]
    pub fn with_inline(self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.inline
            .borrow_mut()
            .insert(property, (value.into(), Priority::Normal));
        self
    }

    /// The inline value of `property`.
    #[must_use]
    pub fn inline(&self, property: StyleProperty) -> Option<String> {
        self.inline.borrow().get(&property).map(|(v, _)| v.clone())
    }

    /// The priority the inline value of `property` was declared with.
    #[must_use]
    pub fn priority(&self, property: StyleProperty) -> Option<Priority> {
        self.inline.borrow().get(&property).map(|(_, p)| *p)
    }

    /// The resolved value of `property`.
    #[must_use]
    pub fn computed(&self, property: StyleProperty) -> String {
        self.inline(property)
            .or_else(|| self.base.get(&property).cloned())
            .unwrap_or_else(|| default_value(property).to_string())
    }

    /// Number of inline writes and removals performed through [`StyleTarget`].
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Remove the element from its document.
    pub fn detach(&self) {
        self.attached.set(false);
    }

    /// Re-insert the element into its document.
    pub fn attach(&self) {
        self.attached.set(true);
    }
}

fn default_value(property: StyleProperty) -> &'static str {
    match property {
        StyleProperty::FontWeight => "400",
        StyleProperty::BackgroundColor => "rgba(0, 0, 0, 0)",
        StyleProperty::FontSize => "16px",
        StyleProperty::FontFamily => "Times New Roman, serif",
        StyleProperty::LetterSpacing => "normal",
        StyleProperty::WordSpacing => "0px",
        StyleProperty::Color => "rgb(0, 0, 0)",
        StyleProperty::Outline => "none",
    }
}

impl StyleTarget for MemoryElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn inline_value(&self, property: StyleProperty) -> Option<String> {
        self.inline(property)
    }

    fn computed_value(&self, property: StyleProperty) -> Option<String> {
        Some(self.computed(property))
    }

    fn set_inline_value(&self, property: StyleProperty, value: &str, priority: Priority) {
        self.writes.set(self.writes.get() + 1);
        self.inline
            .borrow_mut()
            .insert(property, (value.to_string(), priority));
    }

    fn remove_inline_value(&self, property: StyleProperty) {
        self.writes.set(self.writes.get() + 1);
        self.inline.borrow_mut().remove(&property);
    }

    fn text_content(&self) -> String {
        self.text.clone()
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }
}
