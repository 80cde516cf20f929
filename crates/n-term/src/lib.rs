// SPDX-License-Identifier: MIT
//
// n-term — the terminal layer for n-pad.
//
// Everything the editor needs from the terminal and nothing more: raw mode
// and the alternate screen with RAII restore, a blocking single-threaded
// key reader, a key parser for the legacy xterm encodings plus bracketed
// paste, and a line painter that writes one synchronized frame at a time.
//
// Direct termios and ANSI escape sequences, no TUI framework. The editor
// is a small program and the terminal surface it touches is small too.

pub mod ansi;
pub mod color;
pub mod input;
pub mod reader;
pub mod screen;
pub mod terminal;
