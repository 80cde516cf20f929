// SPDX-License-Identifier: MIT
//
// Menu bar and dropdowns.
//
// Row 0 always shows the menu titles. F10 (or Alt + the title's first
// letter) opens a dropdown under one of them:
//
//    File  Edit  Format  Help
//   ┌──────────────────────┐
//   │ Open...       Ctrl+O │   ← Up/Down pick an entry
//   │ Save...       Ctrl+S │   ← Left/Right switch menus
//   │ Quit          Ctrl+Q │   ← Enter runs, Esc closes
//   └──────────────────────┘
//
// The menu only tracks which entry is highlighted. Running the entry is
// the shell's job, through the same dispatcher the shortcuts use.

use n_editor::{Action, Menu};
use n_term::ansi::Attr;
use n_term::input::{KeyCode, KeyEvent, Modifiers};
use n_term::screen::{Span, display_width};

/// Shown at the right end of the menu bar.
const HINT: &str = "F10 menu ";

// ─── MenuOutcome ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Keep the dropdown open.
    Stay,
    /// Close without running anything.
    Close,
    /// Close and run this entry.
    Run(Action),
}

// ─── MenuBar ─────────────────────────────────────────────────────────────────

/// An open dropdown: which menu, and which entry in it is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuBar {
    menu: usize,
    item: usize,
}

impl MenuBar {
    /// Open `menu` with its first entry highlighted.
    pub fn open(menu: Menu) -> Self {
        let index = Menu::ALL.iter().position(|&m| m == menu).unwrap_or(0);
        Self { menu: index, item: 0 }
    }

    pub const fn menu(&self) -> Menu {
        Menu::ALL[self.menu]
    }

    /// The highlighted entry.
    pub fn selected(&self) -> Action {
        self.entries()
            .get(self.item)
            .copied()
            .unwrap_or(Action::About)
    }

    fn entries(&self) -> Vec<Action> {
        self.menu().actions().collect()
    }

    pub fn handle(&mut self, key: &KeyEvent) -> MenuOutcome {
        let count = self.entries().len();
        match key.code {
            KeyCode::Escape | KeyCode::F(10) => MenuOutcome::Close,
            KeyCode::Enter => MenuOutcome::Run(self.selected()),
            KeyCode::Left => {
                self.menu = (self.menu + Menu::ALL.len() - 1) % Menu::ALL.len();
                self.item = 0;
                MenuOutcome::Stay
            }
            KeyCode::Right => {
                self.menu = (self.menu + 1) % Menu::ALL.len();
                self.item = 0;
                MenuOutcome::Stay
            }
            KeyCode::Up => {
                self.item = (self.item + count - 1) % count;
                MenuOutcome::Stay
            }
            KeyCode::Down => {
                self.item = (self.item + 1) % count;
                MenuOutcome::Stay
            }
            KeyCode::Char(ch) if key.modifiers.contains(Modifiers::ALT) => {
                if let Some(menu) = menu_for_letter(ch) {
                    *self = Self::open(menu);
                }
                MenuOutcome::Stay
            }
            // A plain letter runs the entry whose label starts with it.
            KeyCode::Char(ch) if key.modifiers.is_empty() => self
                .entries()
                .into_iter()
                .find(|a| a.label().to_lowercase().starts_with(ch.to_ascii_lowercase()))
                .map_or(MenuOutcome::Stay, MenuOutcome::Run),
            _ => MenuOutcome::Stay,
        }
    }

    /// The dropdown box as `(col, spans)` rows, placed under the title.
    pub fn dropdown(&self) -> (u16, Vec<Vec<Span>>) {
        let entries = self.entries();
        let label_width = entries
            .iter()
            .map(|a| display_width(a.label(), 1))
            .max()
            .unwrap_or(0);
        let key_width = entries
            .iter()
            .map(|a| display_width(a.shortcut_label(), 1))
            .max()
            .unwrap_or(0);
        let inner = label_width + 3 + key_width;

        let mut rows = Vec::with_capacity(entries.len() + 2);
        rows.push(vec![Span::plain(format!("┌{}┐", "─".repeat(inner + 2)))]);
        for (i, action) in entries.iter().enumerate() {
            let text = format!(
                " {:<label_width$}   {:>key_width$} ",
                action.label(),
                action.shortcut_label()
            );
            let attr = if i == self.item { Attr::INVERSE } else { Attr::empty() };
            rows.push(vec![
                Span::plain("│"),
                Span::styled(text, attr),
                Span::plain("│"),
            ]);
        }
        rows.push(vec![Span::plain(format!("└{}┘", "─".repeat(inner + 2)))]);

        (title_col(self.menu()).saturating_sub(1), rows)
    }
}

/// Alt+f, Alt+e, Alt+o and Alt+h open the menus.
pub fn menu_for_letter(ch: char) -> Option<Menu> {
    match ch.to_ascii_lowercase() {
        'f' => Some(Menu::File),
        'e' => Some(Menu::Edit),
        'o' => Some(Menu::Format),
        'h' => Some(Menu::Help),
        _ => None,
    }
}

/// Column where `menu`'s title starts on the bar.
fn title_col(menu: Menu) -> u16 {
    let mut col = 1;
    for m in Menu::ALL {
        if m == menu {
            break;
        }
        col += m.title().len() + 2;
    }
    u16::try_from(col).unwrap_or(u16::MAX)
}

/// The menu bar row. The open menu's title is drawn out of reverse video.
pub fn bar(open: Option<Menu>, width: u16) -> (Vec<Span>, Span) {
    let mut spans = vec![Span::styled(" ", Attr::INVERSE)];
    let mut used = 1;
    for menu in Menu::ALL {
        let attr = if open == Some(menu) {
            Attr::BOLD
        } else {
            Attr::INVERSE
        };
        spans.push(Span::styled(menu.title(), attr));
        spans.push(Span::styled("  ", Attr::INVERSE));
        used += menu.title().len() + 2;
    }

    let gap = usize::from(width).saturating_sub(used + HINT.len());
    spans.push(Span::styled(" ".repeat(gap), Attr::INVERSE));
    spans.push(Span::styled(HINT, Attr::INVERSE | Attr::DIM));
    (spans, Span::styled("", Attr::INVERSE))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
