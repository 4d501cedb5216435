#![forbid(unsafe_code)]

//! History entries and their element references.

use std::fmt;
use std::rc::{Rc, Weak};

use legible_style::{ElementId, StyleSnapshot, StyleTarget};
use web_time::Instant;

use crate::command::CommandName;
use crate::session::{HighlightState, Session};

/// A non-owning handle to a host element.
///
/// History never keeps elements alive. Once the host drops an element,
/// [`upgrade`](Self::upgrade) returns `None` and replaying an entry against it
/// does nothing.
#[derive(Clone)]
pub struct ElementRef {
    id: ElementId,
    target: Weak<dyn StyleTarget>,
}

impl ElementRef {
    /// Reference a concrete host element.
    pub fn new<T: StyleTarget + 'static>(target: &Rc<T>) -> Self {
        let weak: Weak<dyn StyleTarget> = Rc::downgrade(target) as Weak<dyn StyleTarget>;
        Self {
            id: target.id(),
            target: weak,
        }
    }

    /// Reference a type-erased host element.
    pub fn from_dyn(target: &Rc<dyn StyleTarget>) -> Self {
        Self {
            id: target.id(),
            target: Rc::downgrade(target),
        }
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Whether the host has dropped every handle to the element.
    #[must_use]
    pub fn is_dropped(&self) -> bool {
        self.target.strong_count() == 0
    }

    /// The element, if the host still holds it and it is attached.
    #[must_use]
    pub fn upgrade(&self) -> Option<Rc<dyn StyleTarget>> {
        self.target.upgrade().filter(|t| t.is_attached())
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("alive", &!self.is_dropped())
            .finish()
    }
}

/// One recorded mutation.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The element the command ran against.
    pub target: ElementRef,
    /// The dispatched command.
    pub command: CommandName,
    /// Inline styles immediately before the mutation.
    pub before: StyleSnapshot,
    /// Inline styles immediately after the mutation.
    pub after: StyleSnapshot,
    /// Highlight tag before the mutation.
    pub highlight_before: HighlightState,
    /// Highlight tag after the mutation.
    pub highlight_after: HighlightState,
    /// When the entry was recorded.
    pub timestamp: Instant,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(
        target: ElementRef,
        command: CommandName,
        before: StyleSnapshot,
        after: StyleSnapshot,
    ) -> Self {
        Self {
            target,
            command,
            before,
            after,
            highlight_before: HighlightState::NoHighlight,
            highlight_after: HighlightState::NoHighlight,
            timestamp: Instant::now(),
        }
    }

    /// Record the highlight tag transition of this entry.
    #[must_use]
    pub fn with_highlight(mut self, before: HighlightState, after: HighlightState) -> Self {
        self.highlight_before = before;
        self.highlight_after = after;
        self
    }

    /// Whether the mutation changed no inline style.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.before == self.after && self.highlight_before == self.highlight_after
    }

    /// Put the target back into its pre-mutation state.
    ///
    /// Returns `false` when the target is gone and nothing was written.
    pub fn revert(&self, session: &mut Session) -> bool {
        self.replay(session, self.highlight_before, &self.before)
    }

    /// Put the target back into its post-mutation state.
    pub fn reapply(&self, session: &mut Session) -> bool {
        self.replay(session, self.highlight_after, &self.after)
    }

    fn replay(
        &self,
        session: &mut Session,
        highlight: HighlightState,
        snapshot: &StyleSnapshot,
    ) -> bool {
        match self.target.upgrade() {
            Some(target) => {
                session.set_highlight(self.target.id(), highlight);
                legible_style::restore(&*target, snapshot);
                true
            }
            None => {
                // Tags of dropped elements can never be read again.
                if self.target.is_dropped() {
                    session.set_highlight(self.target.id(), HighlightState::NoHighlight);
                }
                tracing::debug!(
                    target: "legible.history",
                    element = %self.target.id(),
                    command = %self.command,
                    "history replay skipped: element gone"
                );
                false
            }
        }
    }
}
