// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. Cursor
// positions are 0-indexed in our API and converted to the terminal's
// 1-indexed coordinates here.
use std::io::{self, Write};

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// SGR text attributes used by the shell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const INVERSE   = 0b0001_0000;
    }
}

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` (CUP).
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Clear from the cursor to the end of the line (EL 0).
#[inline]
pub fn clear_to_eol(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

/// Reset all SGR attributes and colors (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// Emit one SGR sequence selecting `attr`, `fg` and `bg` from a clean state.
///
/// Always starts with `0` so the result doesn't depend on what was active
/// before: `\x1b[0;1;3;32m` is bold + italic + dark green.
pub fn style(w: &mut impl Write, attr: Attr, fg: Color, bg: Color) -> io::Result<()> {
    w.write_all(b"\x1b[0")?;
    for (flag, code) in [
        (Attr::BOLD, b";1"),
        (Attr::DIM, b";2"),
        (Attr::ITALIC, b";3"),
        (Attr::UNDERLINE, b";4"),
        (Attr::INVERSE, b";7"),
    ] {
        if attr.contains(flag) {
            w.write_all(code)?;
        }
    }
    if fg != Color::Default {
        write!(w, ";{}", fg.fg_code())?;
    }
    if bg != Color::Default {
        write!(w, ";{}", bg.bg_code())?;
    }
    w.write_all(b"m")
}

// ─── Synchronized Output ─────────────────────────────────────────────────────

/// Begin a synchronized update (DEC mode 2026). Terminals that support it
/// hold the frame until [`end_sync`]; others ignore it.
#[inline]
pub fn begin_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026h")
}

#[inline]
pub fn end_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026l")
}

// ─── Modes ───────────────────────────────────────────────────────────────────

#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

#[inline]
pub fn enable_bracketed_paste(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2004h")
}

#[inline]
pub fn disable_bracketed_paste(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2004l")
}

/// Set the terminal window title (OSC 2).
pub fn set_title(w: &mut impl Write, title: &str) -> io::Result<()> {
    // Control characters would terminate or corrupt the OSC string.
    let clean: String = title.chars().filter(|c| !c.is_control()).collect();
    write!(w, "\x1b]2;{clean}\x07")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cursor_to_is_one_indexed() {
        assert_eq!(render(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(render(|w| cursor_to(w, 9, 4)), "\x1b[5;10H");
    }

    #[test]
    fn style_plain_is_bare_reset() {
        assert_eq!(
            render(|w| style(w, Attr::empty(), Color::Default, Color::Default)),
            "\x1b[0m"
        );
    }

    #[test]
    fn style_combines_attrs_and_colors() {
        assert_eq!(
            render(|w| style(w, Attr::BOLD | Attr::ITALIC, Color::DarkGreen, Color::Default)),
            "\x1b[0;1;3;32m"
        );
        assert_eq!(
            render(|w| style(w, Attr::INVERSE, Color::Default, Color::Blue)),
            "\x1b[0;7;104m"
        );
    }

    #[test]
    fn title_strips_control_chars() {
        assert_eq!(render(|w| set_title(w, "a\x07b\nc")), "\x1b]2;abc\x07");
    }
}
