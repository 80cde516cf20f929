// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Blocking key reader.
//
// The editor is single-threaded: the main loop and every modal prompt call
// `next_event()` and block until the user presses something. The only
// subtlety is a lone ESC byte, which may be the Escape key or the first
// byte of a sequence still in flight. After an ESC we `poll()` stdin for a
// short grace period; if nothing follows, the parser is flushed and the
// ESC is delivered as the Escape key. A paste or a half-read UTF-8
// character never times out: the reader blocks for the rest.
//
// Bytes come straight off the file descriptor with `read(2)`. A buffered
// `Stdin` could swallow a whole escape sequence that `poll()` then never
// sees.

use std::collections::VecDeque;
use std::io;

use crate::input::{Event, Parser};

const READ_BUF_SIZE: usize = 4096;

/// How long to wait for the rest of an escape sequence (milliseconds).
const ESC_TIMEOUT_MS: i32 = 25;

/// Reads stdin and yields parsed events one at a time.
pub struct KeyReader {
    parser: Parser,
    queue: VecDeque<Event>,
}

impl KeyReader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            queue: VecDeque::new(),
        }
    }

    /// Block until the next event is available.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin fails or reaches end of file.
    pub fn next_event(&mut self) -> io::Result<Event> {
        let mut buf = [0u8; READ_BUF_SIZE];
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Ok(event);
            }

            if self.escape_timed_out()? {
                self.queue.extend(self.parser.flush());
                continue;
            }

            let n = read_stdin(&mut buf)?;
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
            }
            self.queue.extend(self.parser.advance(&buf[..n]));
        }
    }
}

impl KeyReader {
    /// True when a pending ESC has sat alone for the whole grace period.
    fn escape_timed_out(&self) -> io::Result<bool> {
        if !self.parser.awaiting_escape() {
            return Ok(false);
        }
        Ok(!stdin_ready(ESC_TIMEOUT_MS)?)
    }
}

impl Default for KeyReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait up to `timeout_ms` for stdin to become readable.
#[cfg(unix)]
fn stdin_ready(timeout_ms: i32) -> io::Result<bool> {
    let mut fds = libc::pollfd {
        fd: libc::STDIN_FILENO,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&raw mut fds, 1, timeout_ms) };
    if result < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err);
    }
    Ok(result > 0 && fds.revents & libc::POLLIN != 0)
}

#[cfg(not(unix))]
fn stdin_ready(_timeout_ms: i32) -> io::Result<bool> {
    Ok(true)
}

/// One `read(2)` on the stdin descriptor, retried on EINTR.
#[cfg(unix)]
#[allow(clippy::cast_sign_loss)]
fn read_stdin(buf: &mut [u8]) -> io::Result<usize> {
    loop {
        let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
        if n >= 0 {
            return Ok(n as usize);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

#[cfg(not(unix))]
fn read_stdin(buf: &mut [u8]) -> io::Result<usize> {
    use std::io::Read;
    io::stdin().lock().read(buf)
}
