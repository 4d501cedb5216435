#![forbid(unsafe_code)]

//! Bounded linear undo/redo history.
//!
//! Unlike command-replay undo, every entry stores two whole-property
//! snapshots of its target: one taken just before the mutation and one just
//! after. Undo restores the first, redo restores the second, so neither ever
//! re-runs command logic.
//!
//! # Architecture
//!
//! ```text
//!            committed                 redo-pending
//! ┌────────┬────────┬────────┐┌────────┬────────┐
//! │ e0     │ e1     │ e2     ││ e3     │ e4     │
//! └────────┴────────┴────────┘└────────┴────────┘
//!                       ▲
//!                     index = 2
//!
//! undo(): restore e2.before, index = 1
//! redo(): index = 3, restore e3.after
//! push(e5): drop e3, e4; append e5; index = 3
//! ```
//!
//! # Module Structure
//!
//! - [`entry`]: [`HistoryEntry`] and the weak [`ElementRef`] it targets
//! - [`history`]: the [`History`] cursor and capacity logic

pub mod entry;
pub mod history;

pub use entry::{ElementRef, HistoryEntry};
pub use history::{DEFAULT_CAPACITY, History};
