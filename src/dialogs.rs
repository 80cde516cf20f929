// SPDX-License-Identifier: MIT
//
// Modal dialogs on the terminal.
//
// Every dialog is a nested read loop: it draws over whatever frame is on
// screen, then blocks on the key reader until the user answers. The shell
// repaints the whole screen once the action is done, so dialogs never have
// to restore what they covered.
//
//   alert / message   centered box, any of Enter/Esc/Space dismisses
//   ask_unsaved       centered box, [S]ave [D]iscard [C]ancel
//   input             one-line prompt on the bottom row
//   choose_file       same prompt, with Tab completing paths
//
// A read error while a dialog is up counts as cancelling it.

use std::io;
use std::path::PathBuf;

use n_editor::{ChooserMode, Dialogs, UnsavedChoice};
use n_term::ansi::Attr;
use n_term::input::{Event, KeyCode, KeyEvent, Modifiers};
use n_term::reader::KeyReader;
use n_term::screen::{Screen, Span, display_width, visible};
use n_term::terminal::Size;
use tracing::{debug, warn};

use crate::prompt::{LineInput, complete_path};

const UNSAVED_TEXT: &str = "The current file has unsaved changes.\nWould you like to save it?";
const UNSAVED_BUTTONS: &str = "[S]ave   [D]iscard   [C]ancel";
const OK_BUTTON: &str = "[ OK ]";

// ─── TermDialogs ─────────────────────────────────────────────────────────────

/// [`Dialogs`] drawn with n-term and answered from the key reader.
pub struct TermDialogs<'a> {
    reader: &'a mut KeyReader,
    size: Size,
}

impl<'a> TermDialogs<'a> {
    pub const fn new(reader: &'a mut KeyReader, size: Size) -> Self {
        Self { reader, size }
    }

    /// Next key press, skipping pastes. `None` on a read error.
    fn next_key(&mut self) -> Option<KeyEvent> {
        loop {
            match self.reader.next_event() {
                Ok(Event::Key(key)) => return Some(key),
                Ok(Event::Paste(_)) => {}
                Err(e) => {
                    warn!(error = %e, "input failed during dialog");
                    return None;
                }
            }
        }
    }

    fn present(screen: Screen, cursor: Option<(u16, u16)>) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        if let Err(e) = screen.present(cursor, &mut lock) {
            warn!(error = %e, "cannot draw dialog");
        }
    }

    fn show_box(&self, title: &str, text: &str, buttons: &str) {
        let mut screen = Screen::new(self.size);
        let (col, row, rows) = layout_box(self.size, title, text, buttons);
        for (i, line) in (0u16..).zip(rows) {
            screen.put(row + i, col, &[Span::styled(line, Attr::BOLD)]);
        }
        Self::present(screen, None);
    }

    /// Box with an OK button; returns once dismissed.
    fn notice(&mut self, title: &str, text: &str) {
        self.show_box(title, text, OK_BUTTON);
        while let Some(key) = self.next_key() {
            if matches!(
                key.code,
                KeyCode::Enter | KeyCode::Escape | KeyCode::Char(' ' | 'o' | 'O')
            ) {
                break;
            }
        }
    }

    /// Bottom-row line editor. Tab completes paths when `paths` is set.
    fn read_line(&mut self, prompt: &str, default: &str, paths: bool) -> Option<String> {
        let mut input = LineInput::new(default);
        loop {
            self.draw_prompt(prompt, &input);
            let event = match self.reader.next_event() {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, "input failed during prompt");
                    return None;
                }
            };
            let key = match event {
                Event::Paste(text) => {
                    input.insert(text.lines().next().unwrap_or_default());
                    continue;
                }
                Event::Key(key) => key,
            };

            match key.code {
                KeyCode::Enter => return Some(input.into_text()),
                KeyCode::Escape => return None,
                _ if key.is_ctrl('c') || key.is_ctrl('g') => return None,
                _ if key.is_ctrl('a') => input.home(),
                _ if key.is_ctrl('e') => input.end(),
                _ if key.is_ctrl('u') => input.set(String::new()),
                KeyCode::Tab if paths => {
                    if let Some(done) = complete_path(input.text()) {
                        input.set(done);
                    }
                }
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.left(),
                KeyCode::Right => input.right(),
                KeyCode::Home => input.home(),
                KeyCode::End => input.end(),
                KeyCode::Char(ch) if !key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) => {
                    input.insert(ch.encode_utf8(&mut [0; 4]));
                }
                _ => {}
            }
        }
    }

    fn draw_prompt(&self, prompt: &str, input: &LineInput) {
        let mut screen = Screen::new(self.size);
        let row = self.size.rows.saturating_sub(1);
        let label = format!("{prompt} ");
        let label_width = display_width(&label, 1);
        let avail = usize::from(self.size.cols).saturating_sub(label_width);

        let cursor = input.cursor_width();
        let skip = cursor.saturating_sub(avail.saturating_sub(1));
        let shown = visible(input.text(), 1, skip, avail);
        screen.line(row, &[Span::styled(label, Attr::BOLD), Span::plain(shown)], None);

        let x = u16::try_from(label_width + cursor - skip).unwrap_or(u16::MAX);
        let x = x.min(self.size.cols.saturating_sub(1));
        Self::present(screen, Some((x, row)));
    }
}

impl Dialogs for TermDialogs<'_> {
    fn alert(&mut self, message: &str) {
        debug!(message, "alert");
        self.notice("Alert", message);
    }

    fn message(&mut self, message: &str) {
        self.notice("Message", message);
    }

    fn ask_unsaved(&mut self) -> UnsavedChoice {
        self.show_box("Unsaved Changes", UNSAVED_TEXT, UNSAVED_BUTTONS);
        while let Some(key) = self.next_key() {
            match key.code {
                KeyCode::Char('s' | 'S') | KeyCode::Enter => return UnsavedChoice::Save,
                KeyCode::Char('d' | 'D' | 'n' | 'N') => return UnsavedChoice::Discard,
                KeyCode::Char('c' | 'C') | KeyCode::Escape => return UnsavedChoice::Cancel,
                _ => {}
            }
        }
        UnsavedChoice::Cancel
    }

    fn input(&mut self, prompt: &str, default: &str) -> Option<String> {
        self.read_line(prompt, default, false)
    }

    fn choose_file(&mut self, title: &str, mode: ChooserMode) -> Option<PathBuf> {
        let mut prompt = format!("{title}:");
        let mut typed = String::new();
        loop {
            typed = self.read_line(&prompt, &typed, true)?;
            if typed.trim().is_empty() {
                return None;
            }
            let path = PathBuf::from(&typed);
            // Opening needs an existing file; ask again otherwise.
            if mode == ChooserMode::Open && !path.is_file() {
                prompt = format!("{title} (no such file):");
                continue;
            }
            return Some(path);
        }
    }
}

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Lay out a bordered box centered on the screen: the title in the top
/// border, `text` line by line, a blank line, then `buttons` centered.
///
/// Returns the top-left corner and the rows to draw.
fn layout_box(size: Size, title: &str, text: &str, buttons: &str) -> (u16, u16, Vec<String>) {
    let max_inner = usize::from(size.cols).saturating_sub(4).max(1);
    let inner = text
        .lines()
        .chain([buttons, title])
        .map(|l| display_width(l, 8))
        .max()
        .unwrap_or(0)
        .min(max_inner);

    let pad = |s: &str| {
        let shown = visible(s, 8, 0, inner);
        let fill = inner - display_width(&shown, 8);
        format!("│ {shown}{} │", " ".repeat(fill))
    };

    let title = visible(title, 8, 0, inner);
    let mut rows = vec![format!(
        "┌ {title} {}┐",
        "─".repeat(inner - display_width(&title, 8))
    )];
    rows.extend(text.lines().map(pad));
    rows.push(pad(""));
    let left = (inner - display_width(buttons, 8).min(inner)) / 2;
    rows.push(pad(&format!("{}{buttons}", " ".repeat(left))));
    rows.push(format!("└{}┘", "─".repeat(inner + 2)));

    let width = u16::try_from(inner + 4).unwrap_or(size.cols);
    let height = u16::try_from(rows.len()).unwrap_or(size.rows);
    let col = size.cols.saturating_sub(width) / 2;
    let row = size.rows.saturating_sub(height) / 2;
    (col, row, rows)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn box_is_centered_and_bordered() {
        let size = Size { cols: 40, rows: 10 };
        let (col, row, rows) = layout_box(size, "Alert", "File not found.", OK_BUTTON);
        assert_eq!(
            rows,
            vec![
                "┌ Alert ──────────┐",
                "│ File not found. │",
                "│                 │",
                "│     [ OK ]      │",
                "└─────────────────┘",
            ]
        );
        assert_eq!((col, row), (10, 2));
    }

    #[test]
    fn unsaved_box_has_all_lines() {
        let size = Size { cols: 80, rows: 24 };
        let (_, _, rows) = layout_box(size, "Unsaved Changes", UNSAVED_TEXT, UNSAVED_BUTTONS);
        assert_eq!(rows.len(), 6);
        assert!(rows[1].contains("unsaved changes."));
        assert!(rows[2].contains("Would you like to save it?"));
        assert!(rows[4].contains(UNSAVED_BUTTONS));
    }

    #[test]
    fn long_text_is_clipped_to_screen() {
        let size = Size { cols: 20, rows: 5 };
        let long = "x".repeat(100);
        let (col, _, rows) = layout_box(size, "Alert", &long, OK_BUTTON);
        assert_eq!(col, 0);
        for r in &rows {
            assert_eq!(display_width(r, 8), 20);
        }
    }
}
