//! Cursor — insert position, sticky column, and selection anchor.
//!
//! The cursor is a char index into the buffer. It can sit anywhere from 0
//! to `len_chars()` inclusive; there is no modal "on a character" limit.
//!
//! # Sticky column
//!
//! Moving up and down remembers the column the cursor started at. Passing
//! through a short line and reaching a long one again snaps back to that
//! column. Any horizontal movement forgets it.
//!
//! # Selection
//!
//! An optional anchor marks the other end of a selection. Shift+arrow keys
//! drop the anchor on the first press and then leave it in place; a find
//! sets it to the start of the match. Plain movement clears it.

use crate::position::{Position, Selection};
use crate::text::TextBuffer;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor {
    idx: usize,
    sticky_col: Option<usize>,
    anchor: Option<usize>,
}

impl Cursor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            idx: 0,
            sticky_col: None,
            anchor: None,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn idx(&self) -> usize {
        self.idx
    }

    /// The selected span, or `None` when nothing (or nothing non-empty) is
    /// selected.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.anchor
            .map(|a| Selection::ordered(a, self.idx))
            .filter(|s| !s.is_empty())
    }

    // -- Placement ----------------------------------------------------------

    /// Jump to `idx` (clamped) and drop any selection.
    pub fn set(&mut self, idx: usize, buf: &TextBuffer) {
        self.idx = idx.min(buf.len_chars());
        self.sticky_col = None;
        self.anchor = None;
    }

    /// Select `sel` with the cursor at its end.
    pub fn select(&mut self, sel: Selection, buf: &TextBuffer) {
        let len = buf.len_chars();
        self.anchor = Some(sel.start.min(len));
        self.idx = sel.end.min(len);
        self.sticky_col = None;
    }

    /// Anchor a selection at the current position unless one is already
    /// anchored.
    pub fn begin_selection(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.idx);
        }
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Pull the cursor and anchor back inside the buffer after an edit
    /// that may have shortened it.
    pub fn clamp(&mut self, buf: &TextBuffer) {
        let len = buf.len_chars();
        self.idx = self.idx.min(len);
        self.anchor = self.anchor.map(|a| a.min(len));
    }

    // -- Movement -----------------------------------------------------------

    /// One char left. `\r\n` counts as a single step.
    pub fn move_left(&mut self, buf: &TextBuffer) {
        self.sticky_col = None;
        if self.idx == 0 {
            return;
        }
        self.idx -= 1;
        if self.idx > 0 && is_crlf_at(buf, self.idx - 1) {
            self.idx -= 1;
        }
    }

    /// One char right. `\r\n` counts as a single step.
    pub fn move_right(&mut self, buf: &TextBuffer) {
        self.sticky_col = None;
        if self.idx >= buf.len_chars() {
            return;
        }
        self.idx += if is_crlf_at(buf, self.idx) { 2 } else { 1 };
    }

    pub fn move_up(&mut self, count: usize, buf: &TextBuffer) {
        let pos = buf.char_to_pos(self.idx);
        self.move_vertically(pos, pos.line.saturating_sub(count), buf);
    }

    pub fn move_down(&mut self, count: usize, buf: &TextBuffer) {
        let pos = buf.char_to_pos(self.idx);
        let last = buf.line_count() - 1;
        self.move_vertically(pos, pos.line.saturating_add(count).min(last), buf);
    }

    pub fn move_to_line_start(&mut self, buf: &TextBuffer) {
        let pos = buf.char_to_pos(self.idx);
        self.idx = buf.pos_to_char(Position::new(pos.line, 0));
        self.sticky_col = None;
    }

    pub fn move_to_line_end(&mut self, buf: &TextBuffer) {
        let pos = buf.char_to_pos(self.idx);
        self.idx = buf.pos_to_char(Position::new(pos.line, usize::MAX));
        self.sticky_col = None;
    }

    pub fn move_to_start(&mut self) {
        self.idx = 0;
        self.sticky_col = None;
    }

    pub fn move_to_end(&mut self, buf: &TextBuffer) {
        self.idx = buf.len_chars();
        self.sticky_col = None;
    }

    fn move_vertically(&mut self, from: Position, line: usize, buf: &TextBuffer) {
        let col = *self.sticky_col.get_or_insert(from.col);
        self.idx = buf.pos_to_char(Position::new(line, col));
    }
}

fn is_crlf_at(buf: &TextBuffer, idx: usize) -> bool {
    idx + 1 < buf.len_chars() && buf.rope().char(idx) == '\r' && buf.rope().char(idx + 1) == '\n'
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
