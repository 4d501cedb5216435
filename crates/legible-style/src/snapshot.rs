#![forbid(unsafe_code)]

//! Immutable whole-property style snapshots.

use crate::property::StyleProperty;

/// Captured inline values of every [`StyleProperty`] for one element.
///
/// A `None` slot means the property was not set inline when the snapshot was
/// taken ("unset"). Snapshots are never mutated after construction; the
/// builder methods consume `self` and return a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleSnapshot {
    values: [Option<String>; StyleProperty::ALL.len()],
}

impl StyleSnapshot {
    /// A snapshot with every property unset.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return a copy with `property` set to `value`.
    #[must_use]
    pub fn with(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.values[property.index()] = Some(value.into());
        self
    }

    /// Return a copy with `property` unset.
    #[must_use]
    pub fn without(mut self, property: StyleProperty) -> Self {
        self.values[property.index()] = None;
        self
    }

    /// The captured value of `property`, or `None` when unset.
    #[must_use]
    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.values[property.index()].as_deref()
    }

    /// Whether `property` was unset at capture time.
    #[must_use]
    pub fn is_unset(&self, property: StyleProperty) -> bool {
        self.values[property.index()].is_none()
    }

    /// Whether every property is unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Iterate over every property with its captured value.
    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, Option<&str>)> + '_ {
        StyleProperty::ALL
            .into_iter()
            .map(move |p| (p, self.get(p)))
    }

    /// Iterate over the properties that were set, with their values.
    pub fn set_values(&self) -> impl Iterator<Item = (StyleProperty, &str)> + '_ {
        self.iter().filter_map(|(p, v)| v.map(|v| (p, v)))
    }

    /// Properties whose values differ between `self` and `other`.
    #[must_use]
    pub fn changed_properties(&self, other: &StyleSnapshot) -> Vec<StyleProperty> {
        StyleProperty::ALL
            .into_iter()
            .filter(|p| self.get(*p) != other.get(*p))
            .collect()
    }
}
