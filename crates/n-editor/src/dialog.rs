//! Modal dialogs, as seen from the editor core.
//!
//! The core never draws anything. Whenever an operation needs the user (a
//! file name, a yes/no/cancel, an error to acknowledge) it calls through
//! [`Dialogs`], and the call blocks until the user answers. `None` always
//! means "cancelled".

use std::path::PathBuf;

/// Answer to "The current file has not been saved. Would you like to save
/// it now?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChoice {
    Cancel,
    Save,
    Discard,
}

/// What a file chooser is picking a path for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserMode {
    Open,
    Save,
}

pub trait Dialogs {
    /// Show an error and wait for it to be dismissed.
    fn alert(&mut self, message: &str);

    /// Show an informational message and wait for it to be dismissed.
    fn message(&mut self, message: &str);

    /// Ask what to do with unsaved changes.
    fn ask_unsaved(&mut self) -> UnsavedChoice;

    /// Ask for a line of text, pre-filled with `default`.
    fn input(&mut self, prompt: &str, default: &str) -> Option<String>;

    /// Ask for a file path.
    fn choose_file(&mut self, title: &str, mode: ChooserMode) -> Option<PathBuf>;
}

// ---------------------------------------------------------------------------
// Scripted dialogs (tests)
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) use script::{Answer, ScriptedDialogs};
