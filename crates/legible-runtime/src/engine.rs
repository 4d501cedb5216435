#![forbid(unsafe_code)]

//! The enhancement command engine.
//!
//! # State Machine
//!
//! ```text
//!            signal.set(false)
//!   Enabled ───────────────────► Disabled
//!      ▲                            │
//!      └────────────────────────────┘
//!            signal.set(true)
//! ```
//!
//! The state is read from the [`EnableSignal`] on every call. While disabled
//! every operation reports [`EnhanceError::Disabled`] and history is frozen,
//! not cleared.
//!
//! # Dispatch
//!
//! For every style command the engine captures the element's inline styles,
//! runs the mutation, captures again, and pushes one [`HistoryEntry`] holding
//! both snapshots. Mutations that decide not to write (size limit, unreadable
//! color) still push their entry so history mirrors every request the user
//! made. `readAloud` bypasses history entirely.

use std::fmt;
use std::rc::Rc;

use legible_style::{StyleTarget, capture};

use crate::command::CommandName;
use crate::config::EngineConfig;
use crate::enhance;
use crate::outcome::{EnhanceError, EnhancementResult, Outcome, TargetProblem};
use crate::session::Session;
use crate::signal::EnableSignal;
use crate::speech::{SpeechOutput, Utterance};
use crate::stats::StatsSink;
use crate::undo::{ElementRef, History, HistoryEntry};

/// Whether the engine accepts requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    Enabled,
    Disabled,
}

/// Dispatch, undo, and redo for one document session.
pub struct Engine {
    config: EngineConfig,
    signal: EnableSignal,
    history: History,
    session: Session,
    speech: Option<Box<dyn SpeechOutput>>,
    stats: Option<Box<dyn StatsSink>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state())
            .field("history", &self.history)
            .field("session", &self.session)
            .field("speech", &self.speech.is_some())
            .field("stats", &self.stats.is_some())
            .finish()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Create an engine with its own enable signal, initialised from
    /// `config.enabled`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let signal = EnableSignal::new(config.enabled);
        let history = History::new(config.history_capacity);
        Self {
            config,
            signal,
            history,
            session: Session::new(),
            speech: None,
            stats: None,
        }
    }

    /// Share an externally controlled enable signal.
    #[must_use]
    pub fn with_signal(mut self, signal: EnableSignal) -> Self {
        self.signal = signal;
        self
    }

    /// Attach the speech-output collaborator.
    #[must_use]
    pub fn with_speech(mut self, speech: Box<dyn SpeechOutput>) -> Self {
        self.speech = Some(speech);
        self
    }

    /// Attach the stats collaborator.
    #[must_use]
    pub fn with_stats(mut self, stats: Box<dyn StatsSink>) -> Self {
        self.stats = Some(stats);
        self
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Run `command` against `element`.
    pub fn dispatch<T: StyleTarget + 'static>(
        &mut self,
        element: &Rc<T>,
        command: CommandName,
    ) -> EnhancementResult {
        self.dispatch_inner(&**element, ElementRef::new(element), command)
    }

    /// [`dispatch`](Self::dispatch) for type-erased host handles.
    pub fn dispatch_dyn(
        &mut self,
        element: &Rc<dyn StyleTarget>,
        command: CommandName,
    ) -> EnhancementResult {
        self.dispatch_inner(&**element, ElementRef::from_dyn(element), command)
    }

    /// Restore the pre-mutation state of the entry at the cursor.
    pub fn undo(&mut self) -> EnhancementResult {
        let span = tracing::debug_span!(
            "enhance.undo",
            command = tracing::field::Empty,
            element = tracing::field::Empty,
            result = tracing::field::Empty,
        );
        let _guard = span.enter();

        let result = self.undo_inner();
        record_result(&span, &result);
        result
    }

    /// Restore the post-mutation state of the entry after the cursor.
    pub fn redo(&mut self) -> EnhancementResult {
        let span = tracing::debug_span!(
            "enhance.redo",
            command = tracing::field::Empty,
            element = tracing::field::Empty,
            result = tracing::field::Empty,
        );
        let _guard = span.enter();

        let result = self.redo_inner();
        record_result(&span, &result);
        result
    }

    // ========================================================================
    // Info
    // ========================================================================

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.signal.is_enabled() {
            EngineState::Enabled
        } else {
            EngineState::Disabled
        }
    }

    /// A handle to the enable signal for an external controller.
    #[must_use]
    pub fn signal(&self) -> EnableSignal {
        self.signal.clone()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.signal.set(enabled);
        tracing::debug!(target: "legible.engine", enabled, "engine state changed");
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The command the next undo would revert.
    #[must_use]
    pub fn next_undo_command(&self) -> Option<CommandName> {
        self.history.current().map(|e| e.command)
    }

    /// The command the next redo would reapply.
    #[must_use]
    pub fn next_redo_command(&self) -> Option<CommandName> {
        self.history.next_redo().map(|e| e.command)
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn history_index(&self) -> isize {
        self.history.index()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Drop all history, e.g. when the host navigates to a new document.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn dispatch_inner(
        &mut self,
        element: &dyn StyleTarget,
        target: ElementRef,
        command: CommandName,
    ) -> EnhancementResult {
        let span = tracing::debug_span!(
            "enhance.dispatch",
            command = %command,
            element = %element.id(),
            result = tracing::field::Empty,
        );
        let _guard = span.enter();

        let result = self.run_command(element, target, command);
        record_result(&span, &result);
        result
    }

    fn run_command(
        &mut self,
        element: &dyn StyleTarget,
        target: ElementRef,
        command: CommandName,
    ) -> EnhancementResult {
        if !self.signal.is_enabled() {
            return Err(EnhanceError::Disabled);
        }
        if !element.is_attached() {
            tracing::warn!(
                target: "legible.engine",
                element = %element.id(),
                "dispatch rejected: element detached"
            );
            return Err(EnhanceError::InvalidTarget(TargetProblem::Detached(
                element.id(),
            )));
        }

        if !command.is_undoable() {
            return self.read_aloud(element);
        }

        let before = capture(element);
        let highlight_before = self.session.highlight(element.id());
        let result = enhance::execute(command, element, &mut self.session, &self.config);
        let after = capture(element);
        let highlight_after = self.session.highlight(element.id());
        let changed = before.changed_properties(&after);

        let entry = HistoryEntry::new(target, command, before, after)
            .with_highlight(highlight_before, highlight_after);
        if let Some(evicted) = self.history.push(entry) {
            tracing::debug!(
                target: "legible.history",
                command = %evicted.command,
                capacity = self.history.capacity(),
                "evicted oldest history entry"
            );
        }

        match result {
            Ok(change) => {
                if let Some(stats) = &self.stats {
                    stats.increment();
                }
                tracing::debug!(
                    target: "legible.engine",
                    command = %command,
                    change = ?change,
                    changed = ?changed,
                    index = self.history.index(),
                    "enhancement applied"
                );
                Ok(Outcome::Applied { command, change })
            }
            Err(err) => {
                tracing::warn!(
                    target: "legible.engine",
                    command = %command,
                    error = %err,
                    "enhancement skipped"
                );
                Err(err)
            }
        }
    }

    fn read_aloud(&self, element: &dyn StyleTarget) -> EnhancementResult {
        let Some(speech) = self.speech.as_ref().filter(|s| s.is_available()) else {
            return Err(EnhanceError::Unsupported);
        };
        speech.cancel();
        let utterance = Utterance::new(element.text_content(), &self.config.speech);
        tracing::debug!(
            target: "legible.engine",
            element = %element.id(),
            chars = utterance.text.chars().count(),
            "read aloud"
        );
        speech.speak(utterance);
        Ok(Outcome::Spoken)
    }

    fn undo_inner(&mut self) -> EnhancementResult {
        if !self.signal.is_enabled() {
            return Err(EnhanceError::Disabled);
        }
        let Some(entry) = self.history.step_back() else {
            return Err(EnhanceError::NothingToUndo);
        };
        record_entry(entry);
        entry.revert(&mut self.session);
        let command = entry.command;
        tracing::debug!(
            target: "legible.engine",
            command = %command,
            redo_depth = self.history.redo_depth(),
            "undone"
        );
        Ok(Outcome::Undone(command))
    }

    fn redo_inner(&mut self) -> EnhancementResult {
        if !self.signal.is_enabled() {
            return Err(EnhanceError::Disabled);
        }
        let Some(entry) = self.history.step_forward() else {
            return Err(EnhanceError::NothingToRedo);
        };
        record_entry(entry);
        entry.reapply(&mut self.session);
        let command = entry.command;
        tracing::debug!(
            target: "legible.engine",
            command = %command,
            redo_depth = self.history.redo_depth(),
            "redone"
        );
        Ok(Outcome::Redone(command))
    }
}

fn record_entry(entry: &HistoryEntry) {
    let span = tracing::Span::current();
    span.record("command", tracing::field::display(entry.command));
    span.record("element", tracing::field::display(entry.target.id()));
}

fn record_result(span: &tracing::Span, result: &EnhancementResult) {
    match result {
        Ok(outcome) => span.record("result", tracing::field::debug(outcome)),
        Err(err) => span.record("result", tracing::field::display(err)),
    };
}
