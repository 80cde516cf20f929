//! # n-theme — fonts and the style table for n-pad
//!
//! - **[`font`]** — font families, styles and the concrete faces they resolve to
//! - **[`style`]** — the six-role style table (color, font, size per role)
//!
//! Colors are n-term palette slots, and font styles know which terminal
//! attributes render them, so the shell can paint straight from a table
//! entry without any conversion step.

pub mod font;
pub mod style;

pub use font::{Font, FontFamily, FontStyle, FontVariants};
pub use style::{Role, StyleEntry, StyleTable};
