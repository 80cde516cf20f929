// SPDX-License-Identifier: MIT
//
// Line-oriented screen painting.
//
// The editor redraws whole rows: menu bar, text lines, status line, prompt
// line. A `Screen` collects the escape sequences for one frame in memory
// and writes them in a single `write_all` inside a synchronized update, so
// the terminal never shows a half-painted frame.
//
// Widths are measured per grapheme cluster with `unicode-width`, so CJK
// and emoji occupy two cells and combining marks stay attached to their
// base character. Tabs expand to the next multiple of the tab width.

use std::io::{self, Write};
use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::ansi::{self, Attr};
use crate::color::Color;
use crate::terminal::Size;

// ─── Span ────────────────────────────────────────────────────────────────────

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub attr: Attr,
    pub fg: Color,
    pub bg: Color,
}

impl Span {
    /// Unstyled text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Attr::empty())
    }

    /// Text with attributes and default colors.
    #[must_use]
    pub fn styled(text: impl Into<String>, attr: Attr) -> Self {
        Self {
            text: text.into(),
            attr,
            fg: Color::Default,
            bg: Color::Default,
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }
}

// ─── Width helpers ───────────────────────────────────────────────────────────

/// Display width of one grapheme starting at column `col`.
fn grapheme_width(g: &str, col: usize, tab_width: usize) -> usize {
    if g == "\t" {
        let tab = tab_width.max(1);
        tab - col % tab
    } else if g.chars().all(char::is_control) {
        0
    } else {
        UnicodeWidthStr::width(g)
    }
}

/// Display width of `text` with tabs expanded.
#[must_use]
pub fn display_width(text: &str, tab_width: usize) -> usize {
    text.graphemes(true)
        .fold(0, |col, g| col + grapheme_width(g, col, tab_width))
}

/// The part of `text` visible in the column window `[skip, skip + width)`,
/// with tabs expanded to spaces and control characters dropped.
///
/// A wide grapheme cut by either edge of the window is replaced by spaces
/// so columns stay aligned.
#[must_use]
pub fn visible(text: &str, tab_width: usize, skip: usize, width: usize) -> String {
    let [_, _, all] = visible_split(text, tab_width, skip, width, 0..0);
    all
}

/// [`visible`], cut into three pieces around the byte range `mark` of
/// `text`: what comes before it, what falls inside it, and what follows.
///
/// Tab stops are measured from the start of `text`, so the pieces line up
/// exactly with the unsplit output.
#[must_use]
pub fn visible_split(
    text: &str,
    tab_width: usize,
    skip: usize,
    width: usize,
    mark: Range<usize>,
) -> [String; 3] {
    let end = skip + width;
    let mut out: [String; 3] = Default::default();
    let mut col = 0;

    for (byte, g) in text.grapheme_indices(true) {
        if col >= end {
            break;
        }
        let w = grapheme_width(g, col, tab_width);
        if w == 0 {
            continue;
        }
        let piece = if mark.contains(&byte) {
            &mut out[1]
        } else if byte < mark.start {
            &mut out[0]
        } else {
            &mut out[2]
        };
        let next = col + w;
        if col >= skip && next <= end {
            if g == "\t" {
                piece.extend(std::iter::repeat_n(' ', w));
            } else {
                piece.push_str(g);
            }
        } else if next > skip {
            let shown = next.min(end) - col.max(skip);
            piece.extend(std::iter::repeat_n(' ', shown));
        }
        col = next;
    }

    out
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// One frame's worth of output.
pub struct Screen {
    out: Vec<u8>,
    size: Size,
}

impl Screen {
    /// Start a frame for a terminal of `size`.
    #[must_use]
    pub fn new(size: Size) -> Self {
        let mut out = Vec::with_capacity(usize::from(size.cols) * usize::from(size.rows) * 2);
        // Writing to a Vec cannot fail.
        let _ = ansi::begin_sync(&mut out);
        let _ = ansi::cursor_hide(&mut out);
        Self { out, size }
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Paint `spans` on `row`, clipped to the screen width. The rest of the
    /// row is filled with `fill`'s style (pass `None` for the default).
    pub fn line(&mut self, row: u16, spans: &[Span], fill: Option<&Span>) {
        if row >= self.size.rows {
            return;
        }
        let width = usize::from(self.size.cols);
        let _ = ansi::cursor_to(&mut self.out, 0, row);

        let mut col = 0;
        for span in spans {
            if col >= width {
                break;
            }
            let text = visible(&span.text, 8, 0, width - col);
            let _ = ansi::style(&mut self.out, span.attr, span.fg, span.bg);
            self.out.extend_from_slice(text.as_bytes());
            col += display_width(&text, 8);
        }

        if let Some(fill) = fill {
            let _ = ansi::style(&mut self.out, fill.attr, fill.fg, fill.bg);
            self.out
                .extend(std::iter::repeat_n(b' ', width.saturating_sub(col)));
        } else {
            let _ = ansi::reset(&mut self.out);
            let _ = ansi::clear_to_eol(&mut self.out);
        }
        let _ = ansi::reset(&mut self.out);
    }

    /// Paint `spans` starting at column `col` of `row`, clipped to the
    /// screen. Cells outside the spans are left alone, so this can draw a
    /// dropdown or a dialog box over a row painted earlier in the frame.
    pub fn put(&mut self, row: u16, col: u16, spans: &[Span]) {
        if row >= self.size.rows || col >= self.size.cols {
            return;
        }
        let width = usize::from(self.size.cols - col);
        let _ = ansi::cursor_to(&mut self.out, col, row);

        let mut used = 0;
        for span in spans {
            if used >= width {
                break;
            }
            let text = visible(&span.text, 8, 0, width - used);
            let _ = ansi::style(&mut self.out, span.attr, span.fg, span.bg);
            self.out.extend_from_slice(text.as_bytes());
            used += display_width(&text, 8);
        }
        let _ = ansi::reset(&mut self.out);
    }

    /// Blank the whole screen before painting rows.
    pub fn clear(&mut self) {
        let _ = ansi::clear_screen(&mut self.out);
    }

    /// Update the terminal window title.
    pub fn title(&mut self, title: &str) {
        let _ = ansi::set_title(&mut self.out, title);
    }

    /// Finish the frame: place (and show) the cursor, end the synchronized
    /// update, and write everything to `w` in one go.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn present(mut self, cursor: Option<(u16, u16)>, w: &mut impl Write) -> io::Result<()> {
        if let Some((x, y)) = cursor {
            ansi::cursor_to(&mut self.out, x, y)?;
            ansi::cursor_show(&mut self.out)?;
        }
        ansi::end_sync(&mut self.out)?;
        w.write_all(&self.out)?;
        w.flush()
    }

    /// The bytes queued so far.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.out
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
