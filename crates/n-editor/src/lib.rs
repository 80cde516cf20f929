//! # n-editor — editor core for n-pad
//!
//! Everything the editor does, minus the terminal:
//!
//! - **[`text`]** — `TextBuffer`, a rope that reports each edit as a `Change`
//! - **[`history`]** — undo/redo as two stacks of full-text snapshots
//! - **[`document`]** — path, modified flag, cursor, search; the edit hook
//! - **[`search`]** — literal forward find and replace, no wraparound
//! - **[`presentation`]** — font size and style, the style table, the title
//! - **[`action`]** / **[`editor`]** — menu actions and their dispatcher
//! - **[`dialog`]** — the `Dialogs` trait the core asks the user through
//! - **[`config`]** — TOML configuration
//! - **[`view`]** — scrolling, text rows and the status line on an n-term screen
//!
//! The binary owns the terminal and implements [`dialog::Dialogs`]. The
//! view paints into an in-memory n-term `Screen` the binary then writes.

pub mod action;
pub mod config;
pub mod cursor;
pub mod dialog;
pub mod document;
pub mod editor;
pub mod error;
pub mod history;
pub mod position;
pub mod presentation;
pub mod search;
pub mod text;
pub mod view;

pub use action::{Action, Menu};
pub use config::{Config, ConfigError};
pub use dialog::{ChooserMode, Dialogs, UnsavedChoice};
pub use document::{Document, Motion};
pub use editor::{Editor, Flow};
pub use error::{Error, Result};
