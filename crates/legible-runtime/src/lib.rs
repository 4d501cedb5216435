#![forbid(unsafe_code)]

//! Legible Runtime
//!
//! The enhancement command engine: it applies text enhancements to host
//! elements and keeps a bounded, linear undo/redo history of what it did.
//!
//! # Key Components
//!
//! - [`Engine`] - Dispatch, undo, and redo over one document session
//! - [`CommandName`] - The closed set of enhancement commands
//! - [`History`] - Bounded cursor-based history of [`HistoryEntry`] values
//! - [`Session`] - Session-scoped state (font toggle, highlight tags)
//! - [`EnableSignal`] - External on/off switch checked on every dispatch
//! - [`SpeechOutput`] / [`StatsSink`] - Outbound collaborator seams
//! - [`Action`] - String action routing for message-driven hosts
//! - [`EngineConfig`] - Tunables, loadable from TOML/JSON
//!
//! # Role in Legible
//! `legible-runtime` sits on top of `legible-style`. The host owns the
//! document, the selection, and all UI; it resolves a selection to an element
//! handle and calls [`Engine::dispatch`], [`Engine::undo`], or
//! [`Engine::redo`]. Every call returns an [`EnhancementResult`] whose
//! `user_message()` is suitable for a transient notification.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use legible_runtime::{CommandName, Engine, EngineConfig};
//! use legible_style::{MemoryElement, StyleProperty};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! let el = Rc::new(MemoryElement::new(1).with_text("hello"));
//!
//! engine.dispatch(&el, CommandName::Bold).unwrap();
//! assert_eq!(el.inline(StyleProperty::FontWeight).as_deref(), Some("bold"));
//!
//! engine.undo().unwrap();
//! assert_eq!(el.inline(StyleProperty::FontWeight), None);
//! ```

pub mod action;
pub mod command;
pub mod config;
pub mod engine;
pub mod enhance;
pub mod outcome;
pub mod session;
#[cfg(feature = "settings-io")]
pub mod settings;
pub mod signal;
pub mod speech;
pub mod stats;
pub mod undo;

pub use action::Action;
pub use command::{CommandName, UnknownCommand};
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineState};
pub use outcome::{Change, EnhanceError, EnhancementResult, Outcome, TargetProblem};
pub use session::{FontFamilyChoice, HighlightState, Session};
#[cfg(feature = "settings-io")]
pub use settings::{Preferences, SettingsError, SettingsExport, SettingsStore, SiteSettings};
pub use signal::EnableSignal;
pub use speech::{SpeechConfig, SpeechOutput, Utterance};
pub use stats::{SessionStats, StatsCounter, StatsSink};
pub use undo::{ElementRef, History, HistoryEntry};
