// SPDX-License-Identifier: MIT
//
// Terminal colors.
//
// n-pad only ever paints with the 16 standard ANSI colors plus the
// terminal's default foreground/background, so a color is just a palette
// slot. Terminals remap these to their own theme, which keeps the editor
// readable on both dark and light backgrounds.

/// A terminal color: the terminal default or one of the 16 ANSI slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's configured default foreground/background.
    #[default]
    Default,
    Black,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    Gray,
    DarkGray,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// ANSI palette index (0-15), or `None` for [`Color::Default`].
    #[must_use]
    pub const fn index(self) -> Option<u8> {
        Some(match self {
            Self::Default => return None,
            Self::Black => 0,
            Self::DarkRed => 1,
            Self::DarkGreen => 2,
            Self::DarkYellow => 3,
            Self::DarkBlue => 4,
            Self::DarkMagenta => 5,
            Self::DarkCyan => 6,
            Self::Gray => 7,
            Self::DarkGray => 8,
            Self::Red => 9,
            Self::Green => 10,
            Self::Yellow => 11,
            Self::Blue => 12,
            Self::Magenta => 13,
            Self::Cyan => 14,
            Self::White => 15,
        })
    }

    /// SGR parameter selecting this color as foreground (30-37, 90-97, 39).
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        match self.index() {
            None => 39,
            Some(i) if i < 8 => 30 + i,
            Some(i) => 82 + i,
        }
    }

    /// SGR parameter selecting this color as background (40-47, 100-107, 49).
    #[must_use]
    pub const fn bg_code(self) -> u8 {
        match self.index() {
            None => 49,
            Some(i) if i < 8 => 40 + i,
            Some(i) => 92 + i,
        }
    }
}
