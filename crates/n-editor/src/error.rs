//! Editor errors.
//!
//! Every failure the user can cause lands in one of four kinds. None of
//! them is fatal: [`Editor::dispatch`](crate::editor::Editor::dispatch)
//! shows the message in an alert and the editor carries on.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which history stack an operation tried to pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Undo,
    Redo,
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
        })
    }
}

/// Whether a file was being read or written when I/O failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    Read,
    Write,
}

impl fmt::Display for IoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "reading from",
            Self::Write => "writing to",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be read or written.
    #[error("Error {action} file '{}'.", .path.display())]
    Io {
        action: IoAction,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// User input that can't be used, e.g. a font size of `-5`.
    #[error("{0}")]
    InvalidInput(String),

    /// Undo or redo with nothing on the stack.
    #[error("Nothing to {0}.")]
    EmptyHistory(HistoryKind),

    /// A forward search found no match.
    #[error("No more occurrences of '{0}' found!")]
    NotFound(String),
}

impl Error {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action: IoAction::Read,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action: IoAction::Write,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
