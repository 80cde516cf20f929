//! Menu actions.
//!
//! Each menu entry is one [`Action`] variant. The menu bar, the shortcut
//! table and the dispatcher all key off the variant, never off the label.

use std::fmt;

use n_term::input::{KeyCode, KeyEvent, Modifiers};

/// The four top-level menus, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    File,
    Edit,
    Format,
    Help,
}

impl Menu {
    pub const ALL: [Self; 4] = [Self::File, Self::Edit, Self::Format, Self::Help];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Edit => "Edit",
            Self::Format => "Format",
            Self::Help => "Help",
        }
    }

    /// Entries of this menu in display order.
    pub fn actions(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |a| a.menu() == self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Open,
    Save,
    Quit,
    Undo,
    Redo,
    Find,
    Replace,
    FontSize,
    FontStyle,
    About,
}

impl Action {
    /// Every action in menu order.
    pub const ALL: [Self; 10] = [
        Self::Open,
        Self::Save,
        Self::Quit,
        Self::Undo,
        Self::Redo,
        Self::Find,
        Self::Replace,
        Self::FontSize,
        Self::FontStyle,
        Self::About,
    ];

    #[must_use]
    pub const fn menu(self) -> Menu {
        match self {
            Self::Open | Self::Save | Self::Quit => Menu::File,
            Self::Undo | Self::Redo | Self::Find | Self::Replace => Menu::Edit,
            Self::FontSize | Self::FontStyle => Menu::Format,
            Self::About => Menu::Help,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open...",
            Self::Save => "Save...",
            Self::Quit => "Quit",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Find => "Find...",
            Self::Replace => "Replace...",
            Self::FontSize => "Font Size",
            Self::FontStyle => "Font Style",
            Self::About => "About",
        }
    }

    /// The key that runs this action from anywhere.
    #[must_use]
    pub const fn shortcut(self) -> Option<KeyEvent> {
        let key = match self {
            Self::Open => KeyEvent::ctrl('o'),
            Self::Save => KeyEvent::ctrl('s'),
            Self::Quit => KeyEvent::ctrl('q'),
            Self::Undo => KeyEvent::ctrl('z'),
            Self::Redo => KeyEvent::ctrl('y'),
            Self::Find => KeyEvent::ctrl('f'),
            Self::Replace => KeyEvent::ctrl('r'),
            Self::FontSize => alt('1'),
            Self::FontStyle => alt('2'),
            Self::About => return None,
        };
        Some(key)
    }

    /// Shortcut as shown next to the menu label.
    #[must_use]
    pub const fn shortcut_label(self) -> &'static str {
        match self {
            Self::Open => "Ctrl+O",
            Self::Save => "Ctrl+S",
            Self::Quit => "Ctrl+Q",
            Self::Undo => "Ctrl+Z",
            Self::Redo => "Ctrl+Y",
            Self::Find => "Ctrl+F",
            Self::Replace => "Ctrl+R",
            Self::FontSize => "Alt+1",
            Self::FontStyle => "Alt+2",
            Self::About => "",
        }
    }

    /// The action bound to `key`, if any.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.shortcut().as_ref() == Some(key))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.menu().title(), self.label())
    }
}

const fn alt(ch: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(ch),
        modifiers: Modifiers::ALT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn menus_group_actions_in_order() {
        let file: Vec<_> = Menu::File.actions().collect();
        assert_eq!(file, vec![Action::Open, Action::Save, Action::Quit]);
        let edit: Vec<_> = Menu::Edit.actions().map(Action::label).collect();
        assert_eq!(edit, vec!["Undo", "Redo", "Find...", "Replace..."]);
        assert_eq!(Menu::Help.actions().count(), 1);
    }

    #[test]
    fn every_action_is_in_exactly_one_menu() {
        let total: usize = Menu::ALL.iter().map(|m| m.actions().count()).sum();
        assert_eq!(total, Action::ALL.len());
    }

    #[test]
    fn shortcuts_map_back_to_actions() {
        for action in Action::ALL {
            if let Some(key) = action.shortcut() {
                assert_eq!(Action::from_key(&key), Some(action));
            }
        }
        assert_eq!(Action::from_key(&KeyEvent::ctrl('s')), Some(Action::Save));
        assert_eq!(Action::from_key(&KeyEvent::ctrl('x')), None);
        assert_eq!(Action::About.shortcut(), None);
    }

    #[test]
    fn font_shortcuts_use_alt() {
        let key = KeyEvent {
            code: KeyCode::Char('1'),
            modifiers: Modifiers::ALT,
        };
        assert_eq!(Action::from_key(&key), Some(Action::FontSize));
        assert_eq!(Action::from_key(&KeyEvent::plain(KeyCode::Char('1'))), None);
    }

    #[test]
    fn display_shows_menu_path() {
        assert_eq!(Action::Replace.to_string(), "Edit/Replace...");
    }
}
