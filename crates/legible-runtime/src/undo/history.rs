#![forbid(unsafe_code)]

//! Cursor-based bounded history.
//!
//! # Invariants
//!
//! 1. `index()` is in `[-1, len() - 1]`
//! 2. Entries after `index()` are redo-pending; entries at or before it are committed
//! 3. `len() <= capacity()` after any operation
//! 4. [`History::push`] drops every redo-pending entry before appending
//! 5. Evicting the oldest entry shifts `index()` down by exactly one
//!
//! # Memory Model
//!
//! Entries live in a `VecDeque` so eviction from the front is O(1). The
//! cursor is stored as the number of committed entries, so "before the first
//! entry" is `0` internally and `-1` through [`History::index`].

use std::collections::VecDeque;
use std::fmt;

use super::entry::HistoryEntry;
use crate::command::CommandName;

/// Default number of entries kept.
pub const DEFAULT_CAPACITY: usize = 50;

/// Linear undo/redo history with a cursor.
pub struct History {
    entries: VecDeque<HistoryEntry>,
    /// Number of committed entries (`index + 1`).
    committed: usize,
    capacity: usize,
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("len", &self.entries.len())
            .field("index", &self.index())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    /// Create an empty history. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            committed: 0,
            capacity: capacity.max(1),
        }
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Append an entry after the cursor.
    ///
    /// Drops the redo-pending tail, then evicts the oldest entry if the
    /// capacity is exceeded. Returns the evicted entry, if any.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        let dropped = self.entries.len() - self.committed;
        self.entries.truncate(self.committed);
        self.entries.push_back(entry);
        self.committed += 1;

        let evicted = if self.entries.len() > self.capacity {
            self.committed -= 1;
            self.entries.pop_front()
        } else {
            None
        };

        tracing::trace!(
            target: "legible.history",
            len = self.entries.len(),
            index = self.index(),
            dropped_redo = dropped,
            evicted = evicted.is_some(),
            "history push"
        );
        evicted
    }

    /// Move the cursor back one entry and return the entry to revert.
    pub fn step_back(&mut self) -> Option<&HistoryEntry> {
        if self.committed == 0 {
            return None;
        }
        self.committed -= 1;
        self.entries.get(self.committed)
    }

    /// Move the cursor forward one entry and return the entry to reapply.
    pub fn step_forward(&mut self) -> Option<&HistoryEntry> {
        if self.committed >= self.entries.len() {
            return None;
        }
        self.committed += 1;
        self.entries.get(self.committed - 1)
    }

    // ========================================================================
    // Info
    // ========================================================================

    /// Cursor position; `-1` means before the first entry.
    #[must_use]
    pub fn index(&self) -> isize {
        self.committed as isize - 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.committed > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.committed < self.entries.len()
    }

    /// Number of redo-pending entries.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.committed
    }

    /// The entry the next undo would revert.
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.committed
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
    }

    /// The entry the next redo would reapply.
    #[must_use]
    pub fn next_redo(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.committed)
    }

    /// Commands from oldest to newest, committed and pending.
    pub fn commands(&self) -> impl Iterator<Item = CommandName> + '_ {
        self.entries.iter().map(|e| e.command)
    }

    /// Entry at `position`, counting from the oldest.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&HistoryEntry> {
        self.entries.get(position)
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop every entry and reset the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.committed = 0;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::undo::entry::ElementRef;
    use legible_style::{MemoryElement, StyleSnapshot};
    use std::rc::Rc;

    fn entry(el: &Rc<MemoryElement>, command: CommandName) -> HistoryEntry {
        HistoryEntry::new(
            ElementRef::new(el),
            command,
            StyleSnapshot::empty(),
            StyleSnapshot::empty(),
        )
    }

    #[test]
    fn test_new_history() {
        let history = History::default();
        assert_eq!(history.index(), -1);
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.is_empty());
    }

    #[test]
    fn test_push_advances_cursor() {
        let el = Rc::new(MemoryElement::new(1));
        let mut history = History::default();
        history.push(entry(&el, CommandName::Bold));
        history.push(entry(&el, CommandName::SizeUp));

        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), 1);
        assert_eq!(history.current().map(|e| e.command), Some(CommandName::SizeUp));
    }

    #[test]
    fn test_step_back_and_forward() {
        let el = Rc::new(MemoryElement::new(1));
        let mut history = History::default();
        history.push(entry(&el, CommandName::Bold));
        history.push(entry(&el, CommandName::Spacing));

        assert_eq!(history.step_back().map(|e| e.command), Some(CommandName::Spacing));
        assert_eq!(history.index(), 0);
        assert_eq!(history.step_back().map(|e| e.command), Some(CommandName::Bold));
        assert_eq!(history.index(), -1);
        assert!(history.step_back().is_none());
        assert_eq!(history.index(), -1);

        assert_eq!(history.step_forward().map(|e| e.command), Some(CommandName::Bold));
        assert_eq!(history.step_forward().map(|e| e.command), Some(CommandName::Spacing));
        assert!(history.step_forward().is_none());
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn test_push_truncates_redo_tail() {
        let el = Rc::new(MemoryElement::new(1));
        let mut history = History::default();
        history.push(entry(&el, CommandName::Bold));
        history.push(entry(&el, CommandName::Highlight));
        history.push(entry(&el, CommandName::Contrast));
        history.step_back();
        history.step_back();
        assert_eq!(history.redo_depth(), 2);

        history.push(entry(&el, CommandName::FontStyle));

        assert!(!history.can_redo());
        assert_eq!(history.index(), 1);
        assert_eq!(
            history.commands().collect::<Vec<_>>(),
            vec![CommandName::Bold, CommandName::FontStyle]
        );
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let el = Rc::new(MemoryElement::new(1));
        let mut history = History::new(3);
        assert!(history.push(entry(&el, CommandName::Bold)).is_none());
        history.push(entry(&el, CommandName::Highlight));
        history.push(entry(&el, CommandName::SizeUp));
        assert_eq!(history.index(), 2);

        let evicted = history.push(entry(&el, CommandName::SizeDown));
        assert_eq!(evicted.map(|e| e.command), Some(CommandName::Bold));
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.get(0).map(|e| e.command), Some(CommandName::Highlight));
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let el = Rc::new(MemoryElement::new(1));
        let mut history = History::new(0);
        history.push(entry(&el, CommandName::Bold));
        history.push(entry(&el, CommandName::Spacing));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_next_redo_and_current() {
        let el = Rc::new(MemoryElement::new(1));
        let mut history = History::default();
        history.push(entry(&el, CommandName::Bold));
        assert!(history.next_redo().is_none());
        history.step_back();
        assert!(history.current().is_none());
        assert_eq!(history.next_redo().map(|e| e.command), Some(CommandName::Bold));
    }

    #[test]
    fn test_clear() {
        let el = Rc::new(MemoryElement::new(1));
        let mut history = History::default();
        history.push(entry(&el, CommandName::Bold));
        history.push(entry(&el, CommandName::Bold));
        history.step_back();
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.index(), -1);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_debug_impl() {
        let history = History::new(5);
        let debug_str = format!("{history:?}");
        assert!(debug_str.contains("History"));
        assert!(debug_str.contains("capacity: 5"));
    }
}
