// SPDX-License-Identifier: MIT
//
// Single-line text entry for prompts, and file name completion.
//
// `LineInput` is the editing state behind every bottom-row prompt: the
// text typed so far and a cursor inside it, counted in chars. Drawing and
// key reading live in `dialogs.rs`; this file only edits strings.

use std::fs;
use std::path::Path;

use n_term::screen::display_width;

// ─── LineInput ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    /// Start with `initial` and the cursor at its end.
    pub fn new(initial: &str) -> Self {
        Self {
            text: initial.to_string(),
            cursor: initial.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Columns taken by the text left of the cursor.
    pub fn cursor_width(&self) -> usize {
        display_width(&self.text[..self.byte(self.cursor)], 1)
    }

    /// Insert at the cursor. Line breaks are dropped, a prompt holds one
    /// line.
    pub fn insert(&mut self, s: &str) {
        let clean: String = s.chars().filter(|c| !c.is_control()).collect();
        let at = self.byte(self.cursor);
        self.text.insert_str(at, &clean);
        self.cursor += clean.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte(self.cursor);
            self.text.remove(at);
        }
    }

    pub const fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Replace the whole text, cursor at the end.
    pub fn set(&mut self, text: String) {
        self.cursor = text.chars().count();
        self.text = text;
    }

    fn byte(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(b, _)| b)
    }
}

// ─── Path completion ─────────────────────────────────────────────────────────

/// Complete the last path component of `input` as far as it is
/// unambiguous. A unique directory match gets a trailing `/`.
///
/// Returns `None` when nothing matches or the directory can't be read.
/// Hidden entries are only offered when the typed prefix starts with `.`.
pub fn complete_path(input: &str) -> Option<String> {
    let (dir, prefix) = input
        .rfind('/')
        .map_or(("", input), |i| (&input[..=i], &input[i + 1..]));
    let search = if dir.is_empty() { Path::new(".") } else { Path::new(dir) };

    let mut matches: Vec<(String, bool)> = fs::read_dir(search)
        .ok()?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            Some((name, is_dir))
        })
        .filter(|(name, _)| name.starts_with(prefix))
        .filter(|(name, _)| prefix.starts_with('.') || !name.starts_with('.'))
        .collect();
    matches.sort();

    let (first, first_is_dir) = matches.first()?;
    let mut common = first.clone();
    for (name, _) in &matches[1..] {
        let shared = common
            .char_indices()
            .zip(name.chars())
            .find(|((_, a), b)| a != b)
            .map_or_else(|| common.len().min(name.len()), |((i, _), _)| i);
        common.truncate(shared);
    }

    let mut out = format!("{dir}{common}");
    if matches.len() == 1 && *first_is_dir {
        out.push('/');
    }
    Some(out)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
