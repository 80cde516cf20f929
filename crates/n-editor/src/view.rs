//! View — the bridge from document to screen.
//!
//! A `View` maps the document onto a band of terminal rows: text lines on
//! top, one status line below. It handles:
//!
//! - **Scrolling** — tracks which lines and columns are visible
//! - **Tab expansion** — tabs expand to the next tab stop
//! - **Wide characters** — CJK characters consume two terminal columns
//! - **Selection** — the selected span is drawn in reverse video
//! - **Status line** — title, font, cursor position
//! - **Tilde lines** — `~` markers for rows past the end of the text
//!
//! The View holds only scroll state. The editor is passed to
//! [`render`](View::render), which paints into an n-term [`Screen`].
//!
//! ```text
//! Document (ropey)   View          Screen (n-term)
//! ┌──────────┐   ┌─────────┐    ┌───────────────────────┐
//! │ line 0   │   │ scroll  │    │ Dear diary,           │
//! │ line 1   │──▶│ tab exp │──▶ │ today I wrote a pad.  │
//! │ ...      │   │ status  │    │ ~                     │
//! └──────────┘   └─────────┘    │ n-pad - diary.txt ... │
//!                               └───────────────────────┘
//! ```

use std::ops::Range;

use n_term::ansi::Attr;
use n_term::color::Color;
use n_term::screen::{self, Screen, Span};

use crate::editor::Editor;
use crate::position::Position;
use crate::text::TextBuffer;

/// Tab stop width in display columns.
pub const TAB_WIDTH: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct View {
    /// First visible line (0-indexed).
    top_line: usize,

    /// Horizontal scroll offset in display columns.
    left_col: usize,
}

impl View {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            top_line: 0,
            left_col: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn top_line(&self) -> usize {
        self.top_line
    }

    #[inline]
    #[must_use]
    pub const fn left_col(&self) -> usize {
        self.left_col
    }

    /// Go back to the top-left corner, e.g. after a new file is loaded.
    pub const fn reset(&mut self) {
        self.top_line = 0;
        self.left_col = 0;
    }

    // -- Scrolling ----------------------------------------------------------

    /// Adjust scroll so the cursor falls inside a `width × height` text
    /// area.
    pub fn ensure_cursor_visible(
        &mut self,
        buf: &TextBuffer,
        cursor: usize,
        width: u16,
        height: u16,
    ) {
        let (width, height) = (usize::from(width), usize::from(height));
        if width == 0 || height == 0 {
            return;
        }

        let pos = buf.char_to_pos(cursor);
        if pos.line < self.top_line {
            self.top_line = pos.line;
        }
        if pos.line >= self.top_line + height {
            self.top_line = pos.line + 1 - height;
        }

        let col = display_col(buf, pos);
        if col < self.left_col {
            self.left_col = col;
        }
        if col >= self.left_col + width {
            self.left_col = col + 1 - width;
        }
    }

    // -- Rendering ----------------------------------------------------------

    /// Paint text rows `top .. top + height - 1` and the status line in the
    /// last row of that band.
    ///
    /// Returns the screen position of the cursor if it is visible.
    pub fn render(
        &mut self,
        editor: &Editor,
        screen: &mut Screen,
        top: u16,
        height: u16,
    ) -> Option<(u16, u16)> {
        if height == 0 {
            return None;
        }
        let width = screen.size().cols;
        let text_height = height - 1;
        let doc = editor.document();
        let buf = doc.buffer();
        let cursor = doc.cursor().idx();

        self.ensure_cursor_visible(buf, cursor, width, text_height);

        let attr = editor.presentation().text_attr();
        let selection = doc.selection().map(|s| s.range());
        let cursor_pos = buf.char_to_pos(cursor);
        let mut cursor_screen = None;

        for row in 0..text_height {
            let y = top + row;
            let line = self.top_line + usize::from(row);
            if line >= buf.line_count() {
                screen.line(y, &[Span::plain("~").fg(Color::Blue)], None);
                continue;
            }

            let (content, mark) = line_content(buf, line, selection.clone());
            let [before, marked, after] = screen::visible_split(
                &content,
                TAB_WIDTH,
                self.left_col,
                usize::from(width),
                mark,
            );
            screen.line(
                y,
                &[
                    Span::styled(before, attr),
                    Span::styled(marked, attr | Attr::INVERSE),
                    Span::styled(after, attr),
                ],
                None,
            );

            if line == cursor_pos.line {
                let col = display_col(buf, cursor_pos);
                if let Some(x) = col
                    .checked_sub(self.left_col)
                    .and_then(|x| u16::try_from(x).ok())
                    .filter(|&x| x < width)
                {
                    cursor_screen = Some((x, y));
                }
            }
        }

        render_status_line(editor, screen, top + text_height, cursor_pos);
        cursor_screen
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A line's text without its line break, and the byte range of `selection`
/// that falls on it.
fn line_content(
    buf: &TextBuffer,
    line: usize,
    selection: Option<Range<usize>>,
) -> (String, Range<usize>) {
    let start = buf.rope().line_to_char(line);
    let len = buf.line_content_len(line).unwrap_or(0);
    let content = buf.slice(start..start + len).to_string();

    let mark = selection
        .map(|sel| {
            let from = sel.start.clamp(start, start + len) - start;
            let to = sel.end.clamp(start, start + len) - start;
            byte_offset(&content, from)..byte_offset(&content, to)
        })
        .unwrap_or(0..0);
    (content, mark)
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(b, _)| b)
}

/// Display column of `pos`, with tabs expanded.
fn display_col(buf: &TextBuffer, pos: Position) -> usize {
    let start = buf.rope().line_to_char(pos.line);
    let prefix = buf.slice(start..start + pos.col).to_string();
    screen::display_width(&prefix, TAB_WIDTH)
}

/// ` <title>` on the left, `<font>  Ln l, Col c ` on the right, reverse
/// video across the whole row.
fn render_status_line(editor: &Editor, screen: &mut Screen, y: u16, cursor: Position) {
    let width = usize::from(screen.size().cols);
    let left = format!(" {}", editor.title());
    let right = format!(
        "{}  Ln {}, Col {} ",
        editor.presentation().font_label(),
        cursor.line + 1,
        cursor.col + 1
    );

    let right_width = screen::display_width(&right, TAB_WIDTH);
    let left = screen::visible(&left, TAB_WIDTH, 0, width.saturating_sub(right_width + 1));
    let gap = width.saturating_sub(screen::display_width(&left, TAB_WIDTH) + right_width);

    let fill = Span::styled("", Attr::INVERSE);
    screen.line(
        y,
        &[
            Span::styled(left, Attr::INVERSE),
            Span::styled(" ".repeat(gap), Attr::INVERSE),
            Span::styled(right, Attr::INVERSE),
        ],
        Some(&fill),
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
