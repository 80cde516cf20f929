//! Search and replace — literal, case-sensitive, forward only.
//!
//! Matching is plain substring search. There is no regex, no case folding
//! and no wraparound: a search that starts past the last occurrence finds
//! nothing, even if earlier occurrences exist.
//!
//! Offsets are char indices into the buffer. A query may contain line
//! breaks; the search runs over the whole text, not line by line.

use ropey::Rope;

use crate::text::{Change, TextBuffer};

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A search hit: `[start, start + len)` in chars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub len: usize,
}

impl Match {
    #[inline]
    #[must_use]
    pub const fn end(self) -> usize {
        self.start + self.len
    }
}

// ---------------------------------------------------------------------------
// Search functions
// ---------------------------------------------------------------------------

/// First occurrence of `query` at or after char index `from`.
///
/// Returns `None` for an empty query, for `from` at or past the end, and
/// when nothing matches before the end of the text.
#[must_use]
pub fn find_forward(rope: &Rope, query: &str, from: usize) -> Option<Match> {
    if query.is_empty() || from >= rope.len_chars() {
        return None;
    }

    let tail = rope.slice(from..).to_string();
    let byte_idx = tail.find(query)?;
    Some(Match {
        start: from + tail[..byte_idx].chars().count(),
        len: query.chars().count(),
    })
}

/// What a replace pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ReplaceOutcome {
    /// Number of matches replaced.
    pub count: usize,
    /// Char index just past the last inserted replacement, or the starting
    /// index when nothing was replaced.
    pub end: usize,
}

/// Replace every occurrence of `find` from `from` to the end of the buffer.
///
/// Each replacement is its own [`Change`] and is handed to `on_change`
/// right after it is applied, so the caller can record history per match.
/// Scanning resumes after the inserted text, which keeps a replacement
/// that contains `find` from matching again.
pub fn replace_forward(
    buf: &mut TextBuffer,
    find: &str,
    replacement: &str,
    from: usize,
    mut on_change: impl FnMut(&TextBuffer, &Change),
) -> ReplaceOutcome {
    let mut outcome = ReplaceOutcome { count: 0, end: from };
    if find.is_empty() {
        return outcome;
    }

    let mut pos = from;
    while let Some(m) = find_forward(buf.rope(), find, pos) {
        // A non-empty match always yields a change.
        let Some(change) = buf.replace(m.start..m.end(), replacement) else {
            break;
        };
        on_change(buf, &change);
        pos = change.end();
        outcome.count += 1;
        outcome.end = pos;
    }
    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
