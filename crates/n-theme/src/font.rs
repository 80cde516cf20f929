//! Font families, styles, and concrete font variants.
//!
//! A [`Font`] is one concrete face: a family plus a style, e.g. *helvetica
//! bold*. User input names a family and a style loosely ("Times",
//! "BOLDITALIC", "whatever"); [`FontFamily::parse_lenient`] and
//! [`FontStyle::parse_lenient`] map anything unrecognized to the defaults
//! (courier, plain) instead of failing.

use std::fmt;

use n_term::ansi::Attr;

// ---------------------------------------------------------------------------
// FontFamily
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Courier,
    Helvetica,
    Times,
}

impl FontFamily {
    /// Case-insensitive lookup; anything unrecognized is courier.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "helvetica" => Self::Helvetica,
            "times" => Self::Times,
            _ => Self::Courier,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Courier => "courier",
            Self::Helvetica => "helvetica",
            Self::Times => "times",
        }
    }

    /// The four faces of this family.
    #[must_use]
    pub const fn variants(self) -> FontVariants {
        FontVariants {
            regular: Font::new(self, FontStyle::Plain),
            bold: Font::new(self, FontStyle::Bold),
            italic: Font::new(self, FontStyle::Italic),
            bold_italic: Font::new(self, FontStyle::BoldItalic),
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// FontStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// Case-insensitive lookup; anything unrecognized is plain.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "bolditalic" => Self::BoldItalic,
            _ => Self::Plain,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::BoldItalic => "bolditalic",
        }
    }

    /// Terminal attributes that render this style.
    #[must_use]
    pub const fn attr(self) -> Attr {
        match self {
            Self::Plain => Attr::empty(),
            Self::Bold => Attr::BOLD,
            Self::Italic => Attr::ITALIC,
            Self::BoldItalic => Attr::BOLD.union(Attr::ITALIC),
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Font
// ---------------------------------------------------------------------------

/// One concrete font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Font {
    pub family: FontFamily,
    pub style: FontStyle,
}

impl Font {
    pub const COURIER: Self = Self::new(FontFamily::Courier, FontStyle::Plain);
    pub const COURIER_BOLD: Self = Self::new(FontFamily::Courier, FontStyle::Bold);

    #[must_use]
    pub const fn new(family: FontFamily, style: FontStyle) -> Self {
        Self { family, style }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            FontStyle::Plain => write!(f, "{}", self.family),
            style => write!(f, "{} {style}", self.family),
        }
    }
}

/// The regular, bold, italic and bold-italic faces of one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontVariants {
    pub regular: Font,
    pub bold: Font,
    pub italic: Font,
    pub bold_italic: Font,
}

impl FontVariants {
    /// The face for `style`.
    #[must_use]
    pub const fn pick(&self, style: FontStyle) -> Font {
        match style {
            FontStyle::Plain => self.regular,
            FontStyle::Bold => self.bold,
            FontStyle::Italic => self.italic,
            FontStyle::BoldItalic => self.bold_italic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn family_parse_is_case_insensitive() {
        assert_eq!(FontFamily::parse_lenient("Helvetica"), FontFamily::Helvetica);
        assert_eq!(FontFamily::parse_lenient("TIMES"), FontFamily::Times);
        assert_eq!(FontFamily::parse_lenient(" courier "), FontFamily::Courier);
    }

    #[test]
    fn unknown_family_falls_back_to_courier() {
        assert_eq!(FontFamily::parse_lenient("comic sans"), FontFamily::Courier);
        assert_eq!(FontFamily::parse_lenient(""), FontFamily::Courier);
    }

    #[test]
    fn style_parse_and_fallback() {
        assert_eq!(FontStyle::parse_lenient("BoldItalic"), FontStyle::BoldItalic);
        assert_eq!(FontStyle::parse_lenient("italic"), FontStyle::Italic);
        assert_eq!(FontStyle::parse_lenient("bold italic"), FontStyle::Plain);
        assert_eq!(FontStyle::parse_lenient("heavy"), FontStyle::Plain);
    }

    #[test]
    fn variants_share_family() {
        let v = FontFamily::Times.variants();
        assert_eq!(v.regular, Font::new(FontFamily::Times, FontStyle::Plain));
        assert_eq!(v.pick(FontStyle::Bold).family, FontFamily::Times);
        assert_eq!(v.pick(FontStyle::BoldItalic).style, FontStyle::BoldItalic);
    }

    #[test]
    fn style_attrs() {
        assert_eq!(FontStyle::Plain.attr(), Attr::empty());
        assert_eq!(FontStyle::BoldItalic.attr(), Attr::BOLD | Attr::ITALIC);
    }

    #[test]
    fn font_display() {
        assert_eq!(Font::COURIER.to_string(), "courier");
        assert_eq!(
            Font::new(FontFamily::Helvetica, FontStyle::Italic).to_string(),
            "helvetica italic"
        );
    }
}
