//! The style table — six text roles and how each one renders.
//!
//! Roles are fixed: plain text, keywords, comments, strings, functions and
//! numbers. Each entry carries a color, a font and a size. Colors are set
//! once here and never change; fonts and sizes follow the user's Format
//! menu choices.
//!
//! Nothing classifies document text into these roles; there is no lexer.
//! Every character of the buffer renders with the [`Role::Plain`] entry.
//! The other five entries are declared so the table has its full shape.

use n_term::color::Color;

use crate::font::{Font, FontVariants};

/// Text size used until the user picks another one.
pub const DEFAULT_SIZE: u16 = 14;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Plain,
    Keyword,
    Comment,
    String,
    Function,
    Number,
}

impl Role {
    pub const ALL: [Self; 6] = [
        Self::Plain,
        Self::Keyword,
        Self::Comment,
        Self::String,
        Self::Function,
        Self::Number,
    ];

    /// Position in the table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// StyleEntry / StyleTable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleEntry {
    pub color: Color,
    pub font: Font,
    pub size: u16,
}

impl StyleEntry {
    const fn new(color: Color, font: Font) -> Self {
        Self {
            color,
            font,
            size: DEFAULT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    entries: [StyleEntry; 6],
}

impl StyleTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: [
                StyleEntry::new(Color::Black, Font::COURIER),
                StyleEntry::new(Color::DarkGreen, Font::COURIER_BOLD),
                StyleEntry::new(Color::Blue, Font::COURIER),
                StyleEntry::new(Color::Red, Font::COURIER),
                StyleEntry::new(Color::DarkRed, Font::COURIER_BOLD),
                StyleEntry::new(Color::DarkBlue, Font::COURIER_BOLD),
            ],
        }
    }

    #[must_use]
    pub const fn entry(&self, role: Role) -> &StyleEntry {
        &self.entries[role.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &StyleEntry)> {
        Role::ALL.into_iter().zip(self.entries.iter())
    }

    /// Set every entry to `size`.
    pub fn set_size(&mut self, size: u16) {
        for entry in &mut self.entries {
            entry.size = size;
        }
    }

    /// Assign fonts after a family/style change.
    ///
    /// Plain text and strings take the chosen face. Keywords, functions
    /// and numbers are always the family's bold face; comments are always
    /// its italic face, whatever style was chosen.
    pub fn assign_fonts(&mut self, chosen: Font, variants: &FontVariants) {
        for role in Role::ALL {
            self.entries[role.index()].font = match role {
                Role::Plain | Role::String => chosen,
                Role::Keyword | Role::Function | Role::Number => variants.bold,
                Role::Comment => variants.italic,
            };
        }
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontFamily, FontStyle};
    use pretty_assertions::assert_eq;

    #[test]
    fn initial_table() {
        let t = StyleTable::new();
        assert_eq!(t.entry(Role::Plain).color, Color::Black);
        assert_eq!(t.entry(Role::Plain).font, Font::COURIER);
        assert_eq!(t.entry(Role::Keyword).font, Font::COURIER_BOLD);
        assert_eq!(t.entry(Role::Comment).color, Color::Blue);
        assert_eq!(t.entry(Role::Number).color, Color::DarkBlue);
        assert!(t.iter().all(|(_, e)| e.size == DEFAULT_SIZE));
    }

    #[test]
    fn set_size_is_uniform() {
        let mut t = StyleTable::new();
        t.set_size(20);
        assert!(t.iter().all(|(_, e)| e.size == 20));
    }

    #[test]
    fn assign_fonts_fixes_role_weights() {
        let mut t = StyleTable::new();
        let variants = FontFamily::Times.variants();
        let chosen = variants.pick(FontStyle::Italic);
        t.assign_fonts(chosen, &variants);

        assert_eq!(t.entry(Role::Plain).font, chosen);
        assert_eq!(t.entry(Role::String).font, chosen);
        assert_eq!(t.entry(Role::Keyword).font, variants.bold);
        assert_eq!(t.entry(Role::Function).font, variants.bold);
        assert_eq!(t.entry(Role::Number).font, variants.bold);
        assert_eq!(t.entry(Role::Comment).font, variants.italic);
    }

    #[test]
    fn assign_fonts_leaves_colors_alone() {
        let mut t = StyleTable::new();
        let before: Vec<Color> = t.iter().map(|(_, e)| e.color).collect();
        let v = FontFamily::Helvetica.variants();
        t.assign_fonts(v.bold_italic, &v);
        let after: Vec<Color> = t.iter().map(|(_, e)| e.color).collect();
        assert_eq!(before, after);
    }
}
