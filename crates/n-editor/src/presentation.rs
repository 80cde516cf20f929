//! Presentation state: text size, text font, the style table, and the
//! window title.
//!
//! Every change that the style table has to be re-applied for bumps
//! [`Presentation::generation`]. The shell compares generations between
//! frames and repaints everything when it moves.

use std::path::Path;

use n_theme::{Font, FontFamily, FontStyle, Role, StyleTable};
use n_theme::style::DEFAULT_SIZE;
use n_term::ansi::Attr;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Presentation {
    text_size: u16,
    text_font: Font,
    styles: StyleTable,
    generation: u64,
}

impl Presentation {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text_size: DEFAULT_SIZE,
            text_font: Font::COURIER,
            styles: StyleTable::new(),
            generation: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn text_size(&self) -> u16 {
        self.text_size
    }

    #[inline]
    #[must_use]
    pub const fn text_font(&self) -> Font {
        self.text_font
    }

    #[inline]
    #[must_use]
    pub const fn styles(&self) -> &StyleTable {
        &self.styles
    }

    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Parse `input` as a positive size and apply it to the text and every
    /// style entry.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for anything but a whole number from 1 to
    /// 65535. The current size is kept.
    pub fn set_font_size(&mut self, input: &str) -> Result<u16> {
        let size = input
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|&s| s > 0)
            .ok_or_else(|| Error::InvalidInput("Invalid font size.".into()))?;

        self.text_size = size;
        self.styles.set_size(size);
        self.restyle();
        debug!(size, "font size");
        Ok(size)
    }

    /// Switch the text font. Unknown family names mean courier and unknown
    /// style names mean plain. Keywords, functions and numbers keep the
    /// family's bold face and comments its italic face.
    pub fn set_font_style(&mut self, family: &str, style: &str) -> Font {
        let variants = FontFamily::parse_lenient(family).variants();
        let chosen = variants.pick(FontStyle::parse_lenient(style));

        self.text_font = chosen;
        self.styles.assign_fonts(chosen, &variants);
        self.restyle();
        debug!(font = %chosen, "font style");
        chosen
    }

    /// Terminal attributes for document text. There is no lexer, so every
    /// char renders as [`Role::Plain`].
    #[must_use]
    pub const fn text_attr(&self) -> Attr {
        self.styles.entry(Role::Plain).font.style.attr()
    }

    /// Short description for the status line, e.g. `times bold 18`.
    #[must_use]
    pub fn font_label(&self) -> String {
        format!("{} {}", self.text_font, self.text_size)
    }

    const fn restyle(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

/// `"<app> - <file name or Untitled>"`, plus `" (modified)"` when dirty.
#[must_use]
pub fn title(app_name: &str, path: Option<&Path>, modified: bool) -> String {
    let name = path
        .and_then(Path::file_name)
        .map_or_else(|| "Untitled".into(), |n| n.to_string_lossy());
    let suffix = if modified { " (modified)" } else { "" };
    format!("{app_name} - {name}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use n_term::color::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_at_courier_14() {
        let p = Presentation::new();
        assert_eq!(p.text_size(), 14);
        assert_eq!(p.text_font(), Font::COURIER);
        assert_eq!(p.font_label(), "courier 14");
        assert_eq!(p.generation(), 0);
    }

    #[test]
    fn font_size_applies_everywhere() {
        let mut p = Presentation::new();
        assert_eq!(p.set_font_size(" 20 ").unwrap(), 20);
        assert_eq!(p.text_size(), 20);
        assert!(p.styles().iter().all(|(_, e)| e.size == 20));
        assert_eq!(p.generation(), 1);
    }

    #[test]
    fn bad_font_sizes_are_rejected() {
        let mut p = Presentation::new();
        for input in ["-5", "abc", "0", "", "12.5", "70000"] {
            let err = p.set_font_size(input).unwrap_err();
            assert_eq!(err.to_string(), "Invalid font size.", "input {input:?}");
        }
        assert_eq!(p.text_size(), 14);
        assert_eq!(p.generation(), 0);
    }

    #[test]
    fn font_style_picks_variant() {
        let mut p = Presentation::new();
        let f = p.set_font_style("Times", "BOLD");
        assert_eq!(f, Font::new(FontFamily::Times, FontStyle::Bold));
        assert_eq!(p.text_font(), f);
        assert_eq!(p.styles().entry(Role::Comment).font.style, FontStyle::Italic);
        assert_eq!(p.text_attr(), Attr::BOLD);
        assert_eq!(p.font_label(), "times bold 14");
        assert_eq!(p.generation(), 1);
    }

    #[test]
    fn font_style_falls_back() {
        let mut p = Presentation::new();
        assert_eq!(p.set_font_style("wingdings", "fancy"), Font::COURIER);
        assert_eq!(p.text_attr(), Attr::empty());
    }

    #[test]
    fn colors_survive_font_changes() {
        let mut p = Presentation::new();
        p.set_font_style("helvetica", "bolditalic");
        p.set_font_size("9").unwrap();
        assert_eq!(p.styles().entry(Role::Keyword).color, Color::DarkGreen);
        assert_eq!(p.styles().entry(Role::Plain).color, Color::Black);
    }

    #[test]
    fn title_formats() {
        assert_eq!(title("n-pad", None, false), "n-pad - Untitled");
        assert_eq!(title("n-pad", None, true), "n-pad - Untitled (modified)");
        assert_eq!(
            title("Pad", Some(Path::new("/home/me/notes.txt")), true),
            "Pad - notes.txt (modified)"
        );
    }
}
