//! The dispatcher — runs menu actions against the document.
//!
//! [`Editor::dispatch`] turns errors into user-visible alerts. Everything
//! below it returns `Result` and propagates with `?`, except the
//! unsaved-changes gate, which alerts a failed save itself and lets the
//! action go on.

use tracing::{debug, info};

use crate::action::Action;
use crate::config::Config;
use crate::dialog::Dialogs;
use crate::document::Document;
use crate::error::Result;
use crate::presentation::{self, Presentation};

/// Whether the program keeps running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Editor {
    document: Document,
    presentation: Presentation,
    app_name: String,
    status: Option<String>,
}

impl Editor {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut presentation = Presentation::new();
        config.apply(&mut presentation);
        Self {
            document: Document::new(),
            presentation,
            app_name: config.app_name.clone(),
            status: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// The document, for typing and cursor movement.
    #[inline]
    pub const fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[inline]
    #[must_use]
    pub const fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Window title for the current state.
    #[must_use]
    pub fn title(&self) -> String {
        presentation::title(
            &self.app_name,
            self.document.path(),
            self.document.is_modified(),
        )
    }

    /// One-shot message for the status line, cleared once taken.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    /// Run `action`. Errors are shown through `dialogs.alert` and never
    /// stop the editor.
    pub fn dispatch(&mut self, action: Action, dialogs: &mut impl Dialogs) -> Flow {
        debug!(%action, "dispatch");
        match self.run(action, dialogs) {
            Ok(flow) => flow,
            Err(e) => {
                info!(%action, error = %e, "action failed");
                dialogs.alert(&e.to_string());
                Flow::Continue
            }
        }
    }

    fn run(&mut self, action: Action, dialogs: &mut impl Dialogs) -> Result<Flow> {
        match action {
            Action::Open => self.document.open(dialogs)?,
            Action::Save => self.document.save(dialogs)?,
            Action::Quit => {
                if self.document.check_unsaved(dialogs) {
                    return Ok(Flow::Quit);
                }
            }
            Action::Undo => self.document.undo()?,
            Action::Redo => self.document.redo()?,
            Action::Find => {
                let default = self.document.last_query().unwrap_or_default().to_string();
                if let Some(query) = dialogs.input("Find:", &default) {
                    self.document.find(&query)?;
                }
            }
            Action::Replace => self.replace(dialogs),
            Action::FontSize => {
                let current = self.presentation.text_size().to_string();
                if let Some(input) = dialogs.input("Enter new font size:", &current) {
                    if !input.is_empty() {
                        self.presentation.set_font_size(&input)?;
                    }
                }
            }
            Action::FontStyle => self.font_style(dialogs),
            Action::About => {
                dialogs.message(&format!(
                    "{}\nVersion {}",
                    self.app_name,
                    env!("CARGO_PKG_VERSION")
                ));
            }
        }
        Ok(Flow::Continue)
    }

    fn replace(&mut self, dialogs: &mut impl Dialogs) {
        let Some(find) = dialogs.input("Find:", "") else {
            return;
        };
        let Some(replacement) = dialogs.input("Replace with:", "") else {
            return;
        };
        if find.is_empty() {
            return;
        }
        let count = self.document.replace(&find, &replacement);
        self.status = Some(match count {
            0 => format!("No occurrences of '{find}'"),
            1 => "Replaced 1 occurrence".to_string(),
            n => format!("Replaced {n} occurrences"),
        });
    }

    fn font_style(&mut self, dialogs: &mut impl Dialogs) {
        const FAMILY_PROMPT: &str = "Enter font family (courier, helvetica, times):";
        const STYLE_PROMPT: &str = "Enter font style (plain, bold, italic, bolditalic):";

        let Some(family) = dialogs.input(FAMILY_PROMPT, "courier") else {
            return;
        };
        let Some(style) = dialogs.input(STYLE_PROMPT, "plain") else {
            return;
        };
        self.presentation.set_font_style(&family, &style);
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{Answer, ScriptedDialogs, UnsavedChoice};
    use crate::document::Motion;
    use n_theme::{Font, FontFamily, FontStyle};
    use pretty_assertions::assert_eq;

    fn editor_with(text: &str) -> Editor {
        let mut e = Editor::default();
        e.document_mut().insert(text);
        e
    }

    // -- Quit --------------------------------------------------------------

    #[test]
    fn quit_when_clean_does_not_prompt() {
        let mut e = Editor::default();
        let mut d = ScriptedDialogs::default();
        assert_eq!(e.dispatch(Action::Quit, &mut d), Flow::Quit);
        assert!(d.prompts.is_empty());
    }

    #[test]
    fn quit_when_dirty_and_cancelled_keeps_running() {
        let mut e = editor_with("draft");
        let mut d = ScriptedDialogs::new([Answer::Unsaved(UnsavedChoice::Cancel)]);
        assert_eq!(e.dispatch(Action::Quit, &mut d), Flow::Continue);
        assert_eq!(e.document().text(), "draft");
        assert!(e.document().is_modified());
        assert_eq!(e.title(), "n-pad - Untitled (modified)");
    }

    #[test]
    fn quit_when_dirty_and_discarded_exits() {
        let mut e = editor_with("draft");
        let mut d = ScriptedDialogs::new([Answer::Unsaved(UnsavedChoice::Discard)]);
        assert_eq!(e.dispatch(Action::Quit, &mut d), Flow::Quit);
    }

    #[test]
    fn quit_with_failed_save_alerts_and_exits() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("no-such-dir").join("f.txt");
        let mut e = editor_with("draft");
        let mut d = ScriptedDialogs::new([
            Answer::Unsaved(UnsavedChoice::Save),
            Answer::path(&bad),
        ]);
        assert_eq!(e.dispatch(Action::Quit, &mut d), Flow::Quit);
        assert_eq!(d.alerts.len(), 1);
        assert!(d.alerts[0].starts_with("Error writing to file"));
    }

    #[test]
    fn quit_with_abandoned_save_exits() {
        let mut e = editor_with("draft");
        let mut d = ScriptedDialogs::new([
            Answer::Unsaved(UnsavedChoice::Save),
            Answer::File(None),
            Answer::Input(None),
        ]);
        assert_eq!(e.dispatch(Action::Quit, &mut d), Flow::Quit);
        assert!(d.alerts.is_empty());
    }

    // -- History -----------------------------------------------------------

    #[test]
    fn empty_undo_and_redo_alert() {
        let mut e = Editor::default();
        let mut d = ScriptedDialogs::default();
        e.dispatch(Action::Undo, &mut d);
        e.dispatch(Action::Redo, &mut d);
        assert_eq!(d.alerts, vec!["Nothing to undo.", "Nothing to redo."]);
    }

    #[test]
    fn undo_through_dispatch() {
        let mut e = editor_with("abc");
        let mut d = ScriptedDialogs::default();
        assert_eq!(e.dispatch(Action::Undo, &mut d), Flow::Continue);
        assert_eq!(e.document().text(), "");
        assert!(d.alerts.is_empty());
    }

    // -- Search ------------------------------------------------------------

    #[test]
    fn find_not_found_alerts() {
        let mut e = editor_with("foo bar");
        e.document_mut().move_cursor(Motion::Start, false);
        let mut d = ScriptedDialogs::new([Answer::text("foo"), Answer::text("foo")]);
        e.dispatch(Action::Find, &mut d);
        assert!(d.alerts.is_empty());
        e.dispatch(Action::Find, &mut d);
        assert_eq!(d.alerts, vec!["No more occurrences of 'foo' found!"]);
    }

    #[test]
    fn find_cancelled_does_nothing() {
        let mut e = editor_with("foo");
        let mut d = ScriptedDialogs::new([Answer::Input(None)]);
        e.dispatch(Action::Find, &mut d);
        assert!(d.alerts.is_empty());
        assert_eq!(e.document().last_query(), None);
    }

    #[test]
    fn replace_reports_count() {
        let mut e = editor_with("banana");
        e.document_mut().move_cursor(Motion::Start, false);
        let mut d = ScriptedDialogs::new([Answer::text("a"), Answer::text("b")]);
        e.dispatch(Action::Replace, &mut d);
        assert_eq!(e.document().text(), "bbnbnb");
        assert_eq!(e.take_status().as_deref(), Some("Replaced 3 occurrences"));
        assert_eq!(e.take_status(), None);
        assert_eq!(d.prompts, vec!["Find:", "Replace with:"]);
    }

    #[test]
    fn replace_cancelled_second_prompt() {
        let mut e = editor_with("banana");
        e.document_mut().move_cursor(Motion::Start, false);
        let mut d = ScriptedDialogs::new([Answer::text("a"), Answer::Input(None)]);
        e.dispatch(Action::Replace, &mut d);
        assert_eq!(e.document().text(), "banana");
        assert_eq!(e.take_status(), None);
    }

    // -- Format ------------------------------------------------------------

    #[test]
    fn bad_font_size_alerts_and_keeps_size() {
        let mut e = Editor::default();
        let mut d = ScriptedDialogs::new([Answer::text("-5"), Answer::text("abc")]);
        e.dispatch(Action::FontSize, &mut d);
        e.dispatch(Action::FontSize, &mut d);
        assert_eq!(d.alerts, vec!["Invalid font size.", "Invalid font size."]);
        assert_eq!(e.presentation().text_size(), 14);
    }

    #[test]
    fn empty_font_size_is_noop() {
        let mut e = Editor::default();
        let mut d = ScriptedDialogs::new([Answer::text("")]);
        e.dispatch(Action::FontSize, &mut d);
        assert!(d.alerts.is_empty());
        assert_eq!(e.presentation().generation(), 0);
    }

    #[test]
    fn font_style_through_prompts() {
        let mut e = Editor::default();
        let mut d = ScriptedDialogs::new([Answer::text("Helvetica"), Answer::text("bolditalic")]);
        e.dispatch(Action::FontStyle, &mut d);
        assert_eq!(
            e.presentation().text_font(),
            Font::new(FontFamily::Helvetica, FontStyle::BoldItalic)
        );
    }

    #[test]
    fn font_style_cancel_on_family_skips_style_prompt() {
        let mut e = Editor::default();
        let mut d = ScriptedDialogs::new([Answer::Input(None)]);
        e.dispatch(Action::FontStyle, &mut d);
        assert_eq!(d.prompts.len(), 1);
        assert_eq!(e.presentation().text_font(), Font::COURIER);
    }

    // -- Files and misc ----------------------------------------------------

    #[test]
    fn open_failure_alerts_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let mut e = Editor::default();
        let mut d = ScriptedDialogs::new([Answer::path(&missing)]);
        e.dispatch(Action::Open, &mut d);
        assert_eq!(
            d.alerts,
            vec![format!("Error reading from file '{}'.", missing.display())]
        );
    }

    #[test]
    fn save_updates_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut e = editor_with("hi");
        let mut d = ScriptedDialogs::new([Answer::path(&path)]);
        e.dispatch(Action::Save, &mut d);
        assert_eq!(e.title(), "n-pad - out.txt");
    }

    #[test]
    fn about_shows_name_and_version() {
        let mut e = Editor::default();
        let mut d = ScriptedDialogs::default();
        e.dispatch(Action::About, &mut d);
        assert_eq!(d.messages.len(), 1);
        assert!(d.messages[0].starts_with("n-pad\nVersion "));
    }

    #[test]
    fn config_app_name_reaches_title() {
        let config = Config {
            app_name: "Pad".into(),
            ..Config::default()
        };
        let e = Editor::new(&config);
        assert_eq!(e.title(), "Pad - Untitled");
    }
}
