// SPDX-License-Identifier: MIT
//
// The editor's terminal session.
//
// `Terminal::enter` saves the tty mode, switches stdin to raw input and
// shows the editor on the alternate screen with bracketed paste on.
// `Terminal::leave` writes the matching teardown and puts the saved mode
// back. The saved mode lives in one process-wide slot, so a panic hook can
// undo the session without reaching the `Terminal`: it writes the teardown
// bytes straight to fd 1, where a stdout lock held by a half-painted frame
// can't block it.
#![allow(unsafe_code)]

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// Used when the size can't be queried (tests, pipes).
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };
}

#[cfg(unix)]
fn query_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };
    (result == 0 && ws.ws_col > 0 && ws.ws_row > 0).then_some(Size {
        cols: ws.ws_col,
        rows: ws.ws_row,
    })
}

#[cfg(not(unix))]
fn query_size() -> Option<Size> {
    None
}

/// Whether stdin is a terminal. n-pad refuses to start otherwise.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Screen setup and teardown ──────────────────────────────────────────────

fn write_setup(w: &mut impl Write) -> io::Result<()> {
    ansi::enter_alt_screen(w)?;
    ansi::cursor_hide(w)?;
    ansi::clear_screen(w)?;
    ansi::enable_bracketed_paste(w)
}

/// Undo [`write_setup`] and any frame cut off mid-update. The alternate
/// screen goes last so the shell comes back clean.
fn write_teardown(w: &mut impl Write) -> io::Result<()> {
    ansi::end_sync(w)?;
    ansi::disable_bracketed_paste(w)?;
    ansi::reset(w)?;
    ansi::cursor_show(w)?;
    ansi::exit_alt_screen(w)
}

/// [`write_teardown`] as one constant, for the panic hook.
#[rustfmt::skip]
const PANIC_TEARDOWN: &[u8] = b"\
    \x1b[?2026l\
    \x1b[?2004l\
    \x1b[0m\
    \x1b[?25h\
    \x1b[?1049l";

// ─── Saved tty mode ─────────────────────────────────────────────────────────

/// The mode stdin had before [`Terminal::enter`]. Empty outside a session.
#[cfg(unix)]
static SAVED_MODE: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Raw input for the editor. Besides the usual `cfmakeraw` bits, IXON is
/// cleared so Ctrl+S and Ctrl+Q reach the menu shortcuts, ISIG so Ctrl+C
/// and Ctrl+Z do too, and IEXTEN for Ctrl+O and Ctrl+V.
#[cfg(unix)]
fn raw_mode(mut t: libc::termios) -> libc::termios {
    t.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON);
    t.c_oflag &= !libc::OPOST;
    t.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    t.c_cflag &= !(libc::CSIZE | libc::PARENB);
    t.c_cflag |= libc::CS8;
    t.c_cc[libc::VMIN] = 1;
    t.c_cc[libc::VTIME] = 0;
    t
}

#[cfg(unix)]
fn set_mode(mode: &libc::termios) -> io::Result<()> {
    if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, mode) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(unix)]
fn enter_raw_mode() -> io::Result<()> {
    if !is_tty() {
        return Ok(());
    }
    let mut saved: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut saved) } != 0 {
        return Err(io::Error::last_os_error());
    }
    set_mode(&raw_mode(saved))?;
    if let Ok(mut slot) = SAVED_MODE.lock() {
        *slot = Some(saved);
    }
    Ok(())
}

/// Put back the saved mode, if a session left one.
#[cfg(unix)]
fn restore_mode() -> io::Result<()> {
    let saved = SAVED_MODE.lock().ok().and_then(|mut slot| slot.take());
    match saved {
        Some(mode) => set_mode(&mode),
        None => Ok(()),
    }
}

#[cfg(not(unix))]
fn enter_raw_mode() -> io::Result<()> {
    Ok(())
}

#[cfg(not(unix))]
fn restore_mode() -> io::Result<()> {
    Ok(())
}

static PANIC_HOOK: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            #[cfg(unix)]
            unsafe {
                let _ = libc::write(
                    libc::STDOUT_FILENO,
                    PANIC_TEARDOWN.as_ptr().cast::<libc::c_void>(),
                    PANIC_TEARDOWN.len(),
                );
            }
            #[cfg(not(unix))]
            {
                let _ = io::stdout().write_all(PANIC_TEARDOWN);
            }
            let _ = restore_mode();
            previous(info);
        }));
    });
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// The editor's hold on the terminal. Dropping it ends the session.
pub struct Terminal {
    size: Size,
    active: bool,
}

impl Terminal {
    /// A handle sized to the current window, not yet in a session.
    ///
    /// # Errors
    ///
    /// Never fails today; kept fallible for platforms that need setup.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            size: query_size().unwrap_or(Size::FALLBACK),
            active: false,
        })
    }

    /// Re-read the window size, keeping the last known one if the query
    /// fails. Called before every frame, so resizes need no signal handler.
    pub fn refresh_size(&mut self) -> Size {
        if let Some(size) = query_size() {
            self.size = size;
        }
        self.size
    }

    /// Start the session. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the tty mode can't be changed or stdout fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        install_panic_hook();
        enter_raw_mode()?;
        self.active = true;

        let mut out = io::stdout().lock();
        write_setup(&mut out)?;
        out.flush()
    }

    /// End the session and give the terminal back. Calling it outside a
    /// session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout fails or the saved mode can't be put
    /// back. The mode is restored even when the write fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let written = {
            let mut out = io::stdout().lock();
            write_teardown(&mut out).and_then(|()| out.flush())
        };
        let restored = restore_mode();
        written.and(restored)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn panic_teardown_matches_leave() {
        let mut out = Vec::new();
        write_teardown(&mut out).unwrap();
        assert_eq!(out, PANIC_TEARDOWN);
    }

    #[test]
    fn teardown_undoes_setup() {
        let mut setup = Vec::new();
        write_setup(&mut setup).unwrap();
        let setup = String::from_utf8(setup).unwrap();
        assert!(setup.starts_with("\x1b[?1049h"));
        assert!(setup.contains("\x1b[?2004h"));

        let teardown = std::str::from_utf8(PANIC_TEARDOWN).unwrap();
        assert!(teardown.contains("\x1b[?2004l"));
        assert!(teardown.contains("\x1b[?25h"));
        assert!(teardown.ends_with("\x1b[?1049l"));
    }

    #[cfg(unix)]
    #[test]
    fn raw_mode_frees_control_keys() {
        let mut cooked: libc::termios = unsafe { std::mem::zeroed() };
        cooked.c_iflag = libc::ICRNL | libc::IXON;
        cooked.c_cflag = libc::CREAD;
        cooked.c_lflag = libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN;
        cooked.c_oflag = libc::OPOST;

        let raw = raw_mode(cooked);
        assert_eq!(raw.c_iflag & (libc::ICRNL | libc::IXON), 0);
        assert_eq!(raw.c_lflag & (libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN), 0);
        assert_eq!(raw.c_oflag & libc::OPOST, 0);
        assert_ne!(raw.c_cflag & libc::CREAD, 0);
        assert_eq!(raw.c_cflag & libc::CSIZE, libc::CS8);
        assert_eq!(raw.c_cc[libc::VMIN], 1);
        assert_eq!(raw.c_cc[libc::VTIME], 0);
    }

    #[test]
    fn new_terminal_has_a_size() {
        let mut term = Terminal::new().unwrap();
        let size = term.refresh_size();
        assert!(size.cols > 0);
        assert!(size.rows > 0);
    }

    #[test]
    fn leave_without_enter_is_noop() {
        let mut term = Terminal::new().unwrap();
        term.leave().unwrap();
        assert!(!term.active);
    }
}
