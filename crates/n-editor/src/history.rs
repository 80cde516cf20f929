//! Undo/redo history — full-text snapshots.
//!
//! Every discrete edit pushes a copy of the *whole* pre-edit text onto the
//! undo stack. Undo and redo move snapshots between the two stacks:
//!
//! ```text
//! undo(current):  undo.pop() -> returned,  current -> redo
//! redo(current):  redo.pop() -> returned,  current -> undo
//! ```
//!
//! A fresh [`record`](History::record) clears the redo stack, so any edit
//! after an undo discards the forward history. Depth is unbounded; memory
//! grows with `document size × edits`. [`History::memory_bytes`] reports
//! the running total so the growth shows up in the logs.

use crate::error::{Error, HistoryKind, Result};

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Two snapshot stacks, most recent last.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Push the text as it was before an edit and drop the redo stack.
    pub fn record(&mut self, before: String) {
        self.undo_stack.push(before);
        self.redo_stack.clear();
    }

    /// Step back: returns the snapshot to restore and keeps `current` on
    /// the redo stack.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyHistory`] when there is nothing to undo. Both stacks
    /// are left untouched in that case.
    pub fn undo(&mut self, current: String) -> Result<String> {
        let snapshot = self
            .undo_stack
            .pop()
            .ok_or(Error::EmptyHistory(HistoryKind::Undo))?;
        self.redo_stack.push(current);
        Ok(snapshot)
    }

    /// Step forward again: the mirror image of [`undo`](Self::undo).
    ///
    /// # Errors
    ///
    /// [`Error::EmptyHistory`] when there is nothing to redo.
    pub fn redo(&mut self, current: String) -> Result<String> {
        let snapshot = self
            .redo_stack
            .pop()
            .ok_or(Error::EmptyHistory(HistoryKind::Redo))?;
        self.undo_stack.push(current);
        Ok(snapshot)
    }

    /// Forget everything. Used when a new file is loaded.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Total bytes held by both stacks.
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(&self.redo_stack)
            .map(String::len)
            .sum()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_history_is_empty() {
        let h = History::new();
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(h.undo_count(), 0);
        assert_eq!(h.memory_bytes(), 0);
    }

    #[test]
    fn undo_returns_last_snapshot() {
        let mut h = History::new();
        h.record("one".into());
        h.record("two".into());
        assert_eq!(h.undo("three".into()).unwrap(), "two");
        assert_eq!(h.undo("two".into()).unwrap(), "one");
        assert_eq!(h.redo_count(), 2);
    }

    #[test]
    fn redo_mirrors_undo() {
        let mut h = History::new();
        h.record("before".into());
        let restored = h.undo("after".into()).unwrap();
        assert_eq!(restored, "before");
        assert_eq!(h.redo(restored).unwrap(), "after");
        assert!(h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn empty_undo_is_an_error() {
        let mut h = History::new();
        let err = h.undo("x".into()).unwrap_err();
        assert!(matches!(err, Error::EmptyHistory(HistoryKind::Undo)));
        assert_eq!(h.redo_count(), 0);
    }

    #[test]
    fn empty_redo_is_an_error() {
        let mut h = History::new();
        h.record("a".into());
        let err = h.redo("b".into()).unwrap_err();
        assert!(matches!(err, Error::EmptyHistory(HistoryKind::Redo)));
        assert_eq!(h.undo_count(), 1);
    }

    #[test]
    fn record_clears_redo() {
        let mut h = History::new();
        h.record("a".into());
        h.undo("b".into()).unwrap();
        assert!(h.can_redo());
        h.record("a".into());
        assert!(!h.can_redo());
    }

    #[test]
    fn clear_drops_both_stacks() {
        let mut h = History::new();
        h.record("a".into());
        h.record("b".into());
        h.undo("c".into()).unwrap();
        h.clear();
        assert_eq!((h.undo_count(), h.redo_count()), (0, 0));
    }

    #[test]
    fn memory_counts_both_stacks() {
        let mut h = History::new();
        h.record("abc".into());
        h.record("héllo".into());
        h.undo("xy".into()).unwrap();
        assert_eq!(h.memory_bytes(), 3 + 2);
    }
}
