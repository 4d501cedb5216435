#![forbid(unsafe_code)]

//! Style snapshot codec.
//!
//! - [`capture`] reads the element's *inline* declarations (never computed
//!   values) for every [`StyleProperty`].
//! - [`apply`] writes every set value back as an `important` declaration and
//!   leaves unset properties alone. It is forward-only: it never removes a
//!   declaration.
//! - [`restore`] is `apply` plus removal of the declarations the snapshot
//!   recorded as unset, so an element returns to exactly the captured state.
//!
//! Detached targets are skipped silently; writing to an element that has left
//! the document is not an error.

use crate::property::{Priority, StyleProperty};
use crate::snapshot::StyleSnapshot;
use crate::target::StyleTarget;

/// Capture the inline values of every enhancement property.
#[must_use]
pub fn capture<T: StyleTarget + ?Sized>(target: &T) -> StyleSnapshot {
    StyleProperty::ALL
        .into_iter()
        .fold(StyleSnapshot::empty(), |snap, prop| {
            match target.inline_value(prop).filter(|v| !v.is_empty()) {
                Some(value) => snap.with(prop, value),
                None => snap,
            }
        })
}

/// Write every set value of `snapshot` onto `target` as `important`.
pub fn apply<T: StyleTarget + ?Sized>(target: &T, snapshot: &StyleSnapshot) {
    if !target.is_attached() {
        tracing::trace!(element = %target.id(), "apply skipped: target detached");
        return;
    }
    for (prop, value) in snapshot.set_values() {
        target.set_inline_value(prop, value, Priority::Important);
    }
}

/// Return `target` to exactly the state captured in `snapshot`.
pub fn restore<T: StyleTarget + ?Sized>(target: &T, snapshot: &StyleSnapshot) {
    if !target.is_attached() {
        tracing::trace!(element = %target.id(), "restore skipped: target detached");
        return;
    }
    apply(target, snapshot);
    for (prop, value) in snapshot.iter() {
        if value.is_none() && target.inline_value(prop).is_some() {
            target.remove_inline_value(prop);
        }
    }
}
