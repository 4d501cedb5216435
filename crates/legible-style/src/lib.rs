#![forbid(unsafe_code)]

//! Style vocabulary for Legible.
//!
//! # Role in Legible
//! `legible-style` is the leaf crate shared by the command engine and by host
//! adapters. It names the style properties an enhancement can touch, captures
//! them into immutable [`StyleSnapshot`]s, and writes snapshots back onto host
//! elements through the [`StyleTarget`] boundary.
//!
//! # This crate provides
//! - [`StyleProperty`] and [`Priority`] for the fixed enhancement property set.
//! - [`StyleSnapshot`] for whole-property snapshots of one element.
//! - [`codec`] with `capture`, `apply`, and `restore`.
//! - [`color`] and [`length`] helpers for the small amount of CSS value
//!   parsing the enhancements need.
//! - [`MemoryElement`] (feature `test-helpers`), an in-memory host element.
//!
//! # How it fits in the system
//! The host (a browser content script, a WebView bridge, a headless test)
//! implements [`StyleTarget`] for its element handle. `legible-runtime` only
//! ever talks to elements through that trait and through this crate's codec.

pub mod codec;
pub mod color;
pub mod length;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;
pub mod property;
pub mod snapshot;
pub mod target;

pub use codec::{apply, capture, restore};
pub use color::{Rgb, is_transparent, perceived_brightness};
pub use length::{format_px, parse_px};
#[cfg(any(test, feature = "test-helpers"))]
pub use memory::MemoryElement;
pub use property::{Priority, StyleProperty};
pub use snapshot::StyleSnapshot;
pub use target::{ElementId, StyleTarget};
