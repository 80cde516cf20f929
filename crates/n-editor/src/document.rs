//! The document controller.
//!
//! A [`Document`] owns everything that describes the file being edited:
//! the text, its path, the modified flag, the undo/redo history, the
//! cursor and the last search query. All content changes funnel through
//! one private hook, [`Document::after_change`], which keeps the history
//! and the modified flag in step with the text.
//!
//! # Snapshot bookkeeping
//!
//! The document keeps a *baseline*: a copy of the text as of the last
//! recorded change. When an edit arrives, the baseline (the pre-edit text)
//! goes onto the undo stack and the post-edit text becomes the new
//! baseline. Undo and redo replace the whole text while the *replaying*
//! flag is raised, so the hook skips recording for them.
//!
//! # Clean and dirty
//!
//! ```text
//!            edit / undo / redo
//!   Clean ──────────────────────▶ Dirty
//!     ▲                             │
//!     └──── load / successful save ─┘
//! ```

use std::fs;
use std::mem;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::cursor::Cursor;
use crate::dialog::{ChooserMode, Dialogs, UnsavedChoice};
use crate::error::{Error, Result};
use crate::history::History;
use crate::position::Selection;
use crate::search::{self, ReplaceOutcome};
use crate::text::{Change, TextBuffer};

/// File name offered when a new document is saved and no chooser answer
/// came back.
pub const DEFAULT_FILE_NAME: &str = "Untitled.txt";

/// A cursor movement. `Up` and `Down` carry a line count so page keys can
/// reuse them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up(usize),
    Down(usize),
    LineStart,
    LineEnd,
    Start,
    End,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Document {
    path: Option<PathBuf>,
    modified: bool,
    buffer: TextBuffer,
    history: History,
    baseline: String,
    replaying: bool,
    cursor: Cursor,
    last_query: Option<String>,
}

impl Document {
    /// An empty, untitled, clean document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: None,
            modified: false,
            buffer: TextBuffer::new(),
            history: History::new(),
            baseline: String::new(),
            replaying: false,
            cursor: Cursor::new(),
            last_query: None,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    #[inline]
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.cursor.selection()
    }

    #[must_use]
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    // -- Cursor -------------------------------------------------------------

    /// Move the cursor. With `extend` the selection grows from where the
    /// cursor was; without it any selection is dropped.
    pub fn move_cursor(&mut self, motion: Motion, extend: bool) {
        if extend {
            self.cursor.begin_selection();
        } else {
            self.cursor.clear_selection();
        }
        let buf = &self.buffer;
        match motion {
            Motion::Left => self.cursor.move_left(buf),
            Motion::Right => self.cursor.move_right(buf),
            Motion::Up(n) => self.cursor.move_up(n, buf),
            Motion::Down(n) => self.cursor.move_down(n, buf),
            Motion::LineStart => self.cursor.move_to_line_start(buf),
            Motion::LineEnd => self.cursor.move_to_line_end(buf),
            Motion::Start => self.cursor.move_to_start(),
            Motion::End => self.cursor.move_to_end(buf),
        }
    }

    /// Select `sel` (clamped), cursor at its end.
    pub fn select(&mut self, sel: Selection) {
        self.cursor.select(sel, &self.buffer);
    }

    // -- Files --------------------------------------------------------------

    /// Replace the document with the contents of `path`.
    ///
    /// On success the document is clean with empty history, and the
    /// cursor is at the start. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the file can't be read or isn't UTF-8.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "read failed");
            Error::read(path, e)
        })?;

        self.replaying = true;
        let change = self.buffer.set_text(&text);
        self.after_change(&change);
        self.replaying = false;

        self.history.clear();
        self.baseline = text;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        self.cursor.set(0, &self.buffer);
        debug!(path = %path.display(), chars = self.buffer.len_chars(), "loaded");
        Ok(())
    }

    /// Write the whole text to `path`, overwriting it. On success `path`
    /// becomes the document's path and the document is clean.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the write fails. The path and modified flag are
    /// left as they were.
    pub fn write_to(&mut self, path: &Path) -> Result<()> {
        fs::write(path, self.buffer.text()).map_err(|e| {
            warn!(path = %path.display(), error = %e, "write failed");
            Error::write(path, e)
        })?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        debug!(path = %path.display(), bytes = self.buffer.len_bytes(), "saved");
        Ok(())
    }

    /// File > Open: gate on unsaved changes, pick a file, load it.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the chosen file can't be loaded.
    pub fn open(&mut self, dialogs: &mut impl Dialogs) -> Result<()> {
        if !self.check_unsaved(dialogs) {
            return Ok(());
        }
        let Some(path) = dialogs.choose_file("Open File", ChooserMode::Open) else {
            return Ok(());
        };
        self.load(&path)
    }

    /// File > Save. Asks for a path first when the document has none: the
    /// chooser, then a typed name. Cancelling both abandons the save.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the write fails.
    pub fn save(&mut self, dialogs: &mut impl Dialogs) -> Result<()> {
        let path = match self.path.clone() {
            Some(path) => path,
            None => match ask_save_path(dialogs) {
                Some(path) => path,
                None => {
                    debug!("save abandoned");
                    return Ok(());
                }
            },
        };
        self.write_to(&path)
    }

    /// Gate for anything that would throw away unsaved changes. Returns
    /// `true` when the caller may go ahead.
    ///
    /// A clean document passes without asking and *Cancel* stops the
    /// caller. *Save* and *Discard* both pass. A save that fails is
    /// reported through `dialogs.alert` before the caller carries on, and
    /// an abandoned save passes too.
    pub fn check_unsaved(&mut self, dialogs: &mut impl Dialogs) -> bool {
        if !self.modified {
            return true;
        }
        match dialogs.ask_unsaved() {
            UnsavedChoice::Cancel => false,
            UnsavedChoice::Discard => true,
            UnsavedChoice::Save => {
                if let Err(e) = self.save(dialogs) {
                    warn!(error = %e, "save before discarding failed");
                    dialogs.alert(&e.to_string());
                }
                true
            }
        }
    }

    // -- History ------------------------------------------------------------

    /// # Errors
    ///
    /// [`Error::EmptyHistory`] when there is nothing to undo.
    pub fn undo(&mut self) -> Result<()> {
        let snapshot = self.history.undo(self.buffer.text())?;
        self.replay(&snapshot);
        debug!(
            undo = self.history.undo_count(),
            redo = self.history.redo_count(),
            bytes = self.history.memory_bytes(),
            "undo"
        );
        Ok(())
    }

    /// # Errors
    ///
    /// [`Error::EmptyHistory`] when there is nothing to redo.
    pub fn redo(&mut self) -> Result<()> {
        let snapshot = self.history.redo(self.buffer.text())?;
        self.replay(&snapshot);
        debug!(
            undo = self.history.undo_count(),
            redo = self.history.redo_count(),
            bytes = self.history.memory_bytes(),
            "redo"
        );
        Ok(())
    }

    fn replay(&mut self, snapshot: &str) {
        self.replaying = true;
        let change = self.buffer.set_text(snapshot);
        self.after_change(&change);
        self.replaying = false;

        self.baseline = snapshot.to_string();
        self.modified = true;
        self.cursor.clamp(&self.buffer);
    }

    // -- Search -------------------------------------------------------------

    /// Select the next occurrence of `query` at or after the cursor and put
    /// the cursor at its end. An empty query does nothing. The query is
    /// remembered as the default for the next search.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when nothing matches before the end of the text.
    /// Searching never wraps around.
    pub fn find(&mut self, query: &str) -> Result<()> {
        if query.is_empty() {
            return Ok(());
        }
        self.last_query = Some(query.to_string());

        let m = search::find_forward(self.buffer.rope(), query, self.cursor.idx())
            .ok_or_else(|| Error::NotFound(query.to_string()))?;
        self.cursor.select(Selection::ordered(m.start, m.end()), &self.buffer);
        Ok(())
    }

    /// Replace every occurrence of `find` from the cursor to the end of
    /// the text. Each replacement is a separate undo step. Returns how many
    /// were made; an empty `find` makes none.
    pub fn replace(&mut self, find: &str, replacement: &str) -> usize {
        let from = self.cursor.idx();
        let Self {
            buffer,
            history,
            baseline,
            modified,
            replaying,
            ..
        } = self;
        let ReplaceOutcome { count, end } =
            search::replace_forward(buffer, find, replacement, from, |buf, change| {
                record(history, baseline, modified, *replaying, buf, change);
            });

        if count > 0 {
            self.cursor.set(end, &self.buffer);
        }
        debug!(count, find, replacement, "replace");
        count
    }

    // -- Editing ------------------------------------------------------------

    /// Type `text` at the cursor, replacing the selection if there is one.
    pub fn insert(&mut self, text: &str) {
        let range = self
            .cursor
            .selection()
            .map_or(self.cursor.idx()..self.cursor.idx(), Selection::range);
        if let Some(change) = self.replace_range(range, text) {
            self.cursor.set(change.end(), &self.buffer);
        }
    }

    /// Backspace: delete the selection, or the char before the cursor.
    pub fn delete_backward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let end = self.cursor.idx();
        let mut start = self.cursor.clone();
        start.move_left(&self.buffer);
        if let Some(change) = self.delete_range(start.idx()..end) {
            self.cursor.set(change.pos, &self.buffer);
        }
    }

    /// Delete: delete the selection, or the char after the cursor.
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let start = self.cursor.idx();
        let mut end = self.cursor.clone();
        end.move_right(&self.buffer);
        if let Some(change) = self.delete_range(start..end.idx()) {
            self.cursor.set(change.pos, &self.buffer);
        }
    }

    fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.cursor.selection() else {
            return false;
        };
        if let Some(change) = self.delete_range(sel.range()) {
            self.cursor.set(change.pos, &self.buffer);
        }
        true
    }

    /// Insert `text` at char index `idx`. Leaves the cursor alone apart
    /// from clamping it.
    pub fn insert_at(&mut self, idx: usize, text: &str) -> Option<Change> {
        let change = self.buffer.insert(idx, text)?;
        self.after_change(&change);
        Some(change)
    }

    pub fn delete_range(&mut self, range: Range<usize>) -> Option<Change> {
        self.replace_range(range, "")
    }

    /// Replace `range` with `text` as one change.
    pub fn replace_range(&mut self, range: Range<usize>, text: &str) -> Option<Change> {
        let change = self.buffer.replace(range, text)?;
        self.after_change(&change);
        Some(change)
    }

    // -- Mutation hook ------------------------------------------------------

    fn after_change(&mut self, change: &Change) {
        record(
            &mut self.history,
            &mut self.baseline,
            &mut self.modified,
            self.replaying,
            &self.buffer,
            change,
        );
        self.cursor.clamp(&self.buffer);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Push the baseline, adopt the new text as baseline, mark dirty. Does
/// nothing while an undo or redo is being replayed.
fn record(
    history: &mut History,
    baseline: &mut String,
    modified: &mut bool,
    replaying: bool,
    buffer: &TextBuffer,
    change: &Change,
) {
    if replaying {
        return;
    }
    let before = mem::replace(baseline, buffer.text());
    history.record(before);
    *modified = true;
    trace!(
        pos = change.pos,
        inserted = change.inserted,
        deleted = change.deleted.chars().count(),
        depth = history.undo_count(),
        bytes = history.memory_bytes(),
        "recorded"
    );
}

/// Chooser first; if that gives nothing usable, a typed file name.
fn ask_save_path(dialogs: &mut impl Dialogs) -> Option<PathBuf> {
    if let Some(path) = dialogs
        .choose_file("Save File", ChooserMode::Save)
        .filter(|p| !p.as_os_str().is_empty())
    {
        return Some(path);
    }
    dialogs
        .input("Enter file name:", DEFAULT_FILE_NAME)
        .filter(|name| !name.is_empty())
        .map(PathBuf::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
