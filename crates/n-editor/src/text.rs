//! Text buffer — the document's content.
//!
//! A `TextBuffer` wraps a [`ropey::Rope`] and reports every mutation as a
//! [`Change`]. The document controller feeds those changes to its history
//! hook, so one call to a mutating method here is exactly one discrete
//! edit event as far as undo is concerned.
//!
//! # Design choices
//!
//! - **Char indices, not bytes.** All offsets count Unicode scalar values.
//!   Byte offsets never leak into the public API.
//!
//! - **Verbatim content.** Line endings are stored and returned as they
//!   came in. Nothing is normalized on load or save.
//!
//! - **No metadata.** Path and modified flag belong to the document, not
//!   to the text.

use std::fmt;
use std::ops::Range;

use ropey::{Rope, RopeSlice};

use crate::position::Position;

// ---------------------------------------------------------------------------
// Change
// ---------------------------------------------------------------------------

/// One discrete content change: `deleted` was removed at `pos` and
/// `inserted` chars were put in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub pos: usize,
    pub inserted: usize,
    pub deleted: String,
}

impl Change {
    /// Char index just past the inserted text.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.pos + self.inserted
    }
}

// ---------------------------------------------------------------------------
// TextBuffer
// ---------------------------------------------------------------------------

pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    // -- Text access --------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// The whole content as a `String`. Allocates.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    #[inline]
    #[must_use]
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The chars in `range`, clamped to the buffer.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> RopeSlice<'_> {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        self.rope.slice(start..end)
    }

    /// Number of lines. An empty buffer has one (empty) line, and a
    /// trailing line break starts another.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// A line including its line break, or `None` past the last line.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<RopeSlice<'_>> {
        (line < self.rope.len_lines()).then(|| self.rope.line(line))
    }

    /// Chars in a line excluding its line break (`\n`, `\r\n` or `\r`).
    #[must_use]
    pub fn line_content_len(&self, line: usize) -> Option<usize> {
        self.line(line).map(|slice| {
            let mut len = slice.len_chars();
            if len > 0 && is_line_break(slice.char(len - 1)) {
                len -= 1;
                if len > 0 && slice.char(len) == '\n' && slice.char(len - 1) == '\r' {
                    len -= 1;
                }
            }
            len
        })
    }

    // -- Coordinate conversion ----------------------------------------------

    /// `(line, col)` of a char index. Indices past the end clamp to the end.
    #[must_use]
    pub fn char_to_pos(&self, idx: usize) -> Position {
        let idx = idx.min(self.len_chars());
        let line = self.rope.char_to_line(idx);
        Position::new(line, idx - self.rope.line_to_char(line))
    }

    /// Char index of `(line, col)`, clamped to the nearest valid spot: the
    /// last line if `line` is too big, the end of the line's content if
    /// `col` is too big.
    #[must_use]
    pub fn pos_to_char(&self, pos: Position) -> usize {
        let line = pos.line.min(self.line_count() - 1);
        let max_col = self.line_content_len(line).unwrap_or(0);
        self.rope.line_to_char(line) + pos.col.min(max_col)
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at `idx` (clamped). Returns `None` when `text` is empty.
    pub fn insert(&mut self, idx: usize, text: &str) -> Option<Change> {
        if text.is_empty() {
            return None;
        }
        let pos = idx.min(self.len_chars());
        self.rope.insert(pos, text);
        Some(Change {
            pos,
            inserted: text.chars().count(),
            deleted: String::new(),
        })
    }

    /// Replace the chars in `range` (clamped) with `text` as a single
    /// change. Returns `None` when nothing would change.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Option<Change> {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        if start == end && text.is_empty() {
            return None;
        }
        let deleted = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        Some(Change {
            pos: start,
            inserted: text.chars().count(),
            deleted,
        })
    }

    /// Replace the whole content. Always reports a change, even when the
    /// new text equals the old, so callers see every wholesale reset.
    pub fn set_text(&mut self, text: &str) -> Change {
        let deleted = self.rope.to_string();
        self.rope = Rope::from_str(text);
        Change {
            pos: 0,
            inserted: self.rope.len_chars(),
            deleted,
        }
    }
}

/// Chars ropey treats as ending a line.
const fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.line_count())
            .field("chars", &self.len_chars())
            .finish_non_exhaustive()
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
    fn empty_buffer_has_one_line() {
        let b = TextBuffer::new();
        assert!(b.is_empty());
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line_content_len(0), Some(0));
        assert_eq!(b.line_content_len(1), None);
    }

    #[test]
    fn line_content_len_strips_each_ending() {
        let b = TextBuffer::from_text("ab\ncd\r\nef\rgh");
        assert_eq!(b.line_count(), 4);
        assert_eq!(b.line_content_len(0), Some(2));
        assert_eq!(b.line_content_len(1), Some(2));
        assert_eq!(b.line_content_len(2), Some(2));
        assert_eq!(b.line_content_len(3), Some(2));
    }

    #[test]
    fn char_pos_conversion() {
        let b = TextBuffer::from_text("hello\nwörld\n");
        assert_eq!(b.char_to_pos(0), Position::ZERO);
        assert_eq!(b.char_to_pos(7), Position::new(1, 1));
        assert_eq!(b.char_to_pos(12), Position::new(2, 0));
        assert_eq!(b.char_to_pos(999), Position::new(2, 0));

        assert_eq!(b.pos_to_char(Position::new(1, 1)), 7);
        assert_eq!(b.pos_to_char(Position::new(1, 50)), 11);
        assert_eq!(b.pos_to_char(Position::new(9, 0)), 12);
    }

    #[test]
    fn insert_reports_change() {
        let mut b = TextBuffer::from_text("hello");
        let c = b.insert(5, " wörld").unwrap();
        assert_eq!(b.text(), "hello wörld");
        assert_eq!(c, Change { pos: 5, inserted: 6, deleted: String::new() });
        assert_eq!(c.end(), 11);
    }

    #[test]
    fn insert_empty_is_not_a_change() {
        let mut b = TextBuffer::from_text("x");
        assert_eq!(b.insert(0, ""), None);
    }

    #[test]
    fn insert_clamps_index() {
        let mut b = TextBuffer::from_text("ab");
        let c = b.insert(99, "c").unwrap();
        assert_eq!(c.pos, 2);
        assert_eq!(b.text(), "abc");
    }

    #[test]
    fn replace_with_nothing_reports_deleted_text() {
        let mut b = TextBuffer::from_text("hello\nworld");
        let c = b.replace(4..7, "").unwrap();
        assert_eq!(b.text(), "hellorld");
        assert_eq!(c.deleted, "o\nw");
        assert_eq!(c.inserted, 0);
        assert_eq!(b.replace(3..3, ""), None);
    }

    #[test]
    fn replace_is_one_change() {
        let mut b = TextBuffer::from_text("banana");
        let c = b.replace(1..2, "b").unwrap();
        assert_eq!(b.text(), "bbnana");
        assert_eq!(c, Change { pos: 1, inserted: 1, deleted: "a".into() });
    }

    #[test]
    fn set_text_always_reports() {
        let mut b = TextBuffer::from_text("same");
        let c = b.set_text("same");
        assert_eq!(c.deleted, "same");
        assert_eq!(c.inserted, 4);
    }

    #[test]
    fn crlf_is_preserved() {
        let mut b = TextBuffer::from_text("a\r\nb");
        b.insert(4, "\r\nc");
        assert_eq!(b.text(), "a\r\nb\r\nc");
    }

    #[test]
    fn slice_clamps() {
        let b = TextBuffer::from_text("hello");
        assert_eq!(b.slice(1..3).to_string(), "el");
        assert_eq!(b.slice(3..99).to_string(), "lo");
        assert_eq!(b.slice(9..99).to_string(), "");
    }

    #[test]
    fn debug_format() {
        let b = TextBuffer::from_text("a\nb");
        let s = format!("{b:?}");
        assert!(s.contains("lines: 2"));
        assert!(s.contains("chars: 3"));
    }
}
