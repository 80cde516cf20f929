// SPDX-License-Identifier: MIT
//
// Key input parser.
//
// Turns raw stdin bytes into key events for the editor shell. The shell
// only enables bracketed paste (see `terminal.rs`), so the parser covers:
//
// - Control characters (Ctrl+letter, Enter, Tab, Backspace)
// - Legacy CSI sequences (arrows, Home/End, PageUp/PageDown, Delete, F-keys)
// - SS3 sequences (F1-F4 and arrows from some terminals)
// - Alt+key (ESC followed by a printable byte)
// - Bracketed paste (delivered as one `Paste` event)
// - UTF-8 multi-byte characters
//
// Escape sequences can span several `read()` calls, so the parser keeps a
// small byte buffer. A lone ESC stays pending until the caller decides no
// more bytes are coming and calls [`Parser::flush`]; `awaiting_escape`
// says when that decision applies.

use bitflags::bitflags;

// ─── Event Types ────────────────────────────────────────────────────────────

/// A parsed terminal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// Text pasted between `CSI 200~` and `CSI 201~`.
    Paste(String),
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[inline]
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// A Ctrl+`ch` key press.
    #[inline]
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            modifiers: Modifiers::CTRL,
        }
    }

    /// True if this is Ctrl+`ch` without Alt.
    #[must_use]
    pub fn is_ctrl(&self, ch: char) -> bool {
        self.code == KeyCode::Char(ch)
            && self.modifiers.contains(Modifiers::CTRL)
            && !self.modifiers.contains(Modifiers::ALT)
    }
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character.
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// F1 through F12.
    F(u8),
}

bitflags! {
    /// Keyboard modifier flags, in xterm's CSI encoding order
    /// (`param = 1 + bitmask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

// ─── Parser ─────────────────────────────────────────────────────────────────

const PASTE_START: &[u8] = b"\x1b[200~";
const PASTE_END: &[u8] = b"\x1b[201~";

/// Incremental key parser.
///
/// Feed bytes with [`advance`](Parser::advance); incomplete sequences are
/// held until more bytes arrive or [`flush`](Parser::flush) is called.
pub struct Parser {
    buf: Vec<u8>,
    in_paste: bool,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(32),
            in_paste: false,
        }
    }

    /// Feed raw bytes and return every event that is complete.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            let remaining = &self.buf[pos..];

            if self.in_paste {
                let Some(end) = find_subsequence(remaining, PASTE_END) else {
                    break;
                };
                let text = String::from_utf8_lossy(&remaining[..end]).into_owned();
                events.push(Event::Paste(text));
                pos += end + PASTE_END.len();
                self.in_paste = false;
                continue;
            }

            if remaining.starts_with(PASTE_START) {
                self.in_paste = true;
                pos += PASTE_START.len();
                continue;
            }
            if remaining.len() < PASTE_START.len()
                && remaining.len() > 2
                && PASTE_START.starts_with(remaining)
            {
                break;
            }

            match try_parse(remaining) {
                Parsed::Event(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Parsed::Incomplete => break,
                Parsed::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }
        events
    }

    /// Whether the pending bytes start with an ESC that may be the Escape
    /// key. Only then should the caller time out and [`flush`](Self::flush).
    /// Inside a paste, or halfway through a UTF-8 character, the rest of
    /// the bytes are coming and the caller should keep reading.
    #[must_use]
    pub fn awaiting_escape(&self) -> bool {
        !self.in_paste && self.buf.first() == Some(&0x1B)
    }

    /// Emit pending bytes as literal keys. A lone ESC becomes Escape. An
    /// unterminated paste is delivered as the text received so far.
    pub fn flush(&mut self) -> Vec<Event> {
        if self.in_paste {
            self.in_paste = false;
            let text = String::from_utf8_lossy(&self.buf).into_owned();
            self.buf.clear();
            return if text.is_empty() {
                Vec::new()
            } else {
                vec![Event::Paste(text)]
            };
        }

        let events = self
            .buf
            .iter()
            .filter_map(|&byte| match byte {
                0x1B => Some(KeyEvent::plain(KeyCode::Escape)),
                b @ 0x20..=0x7E => Some(KeyEvent::plain(KeyCode::Char(b as char))),
                b @ 0x01..=0x1A => Some(KeyEvent::ctrl((b + b'a' - 1) as char)),
                _ => None,
            })
            .map(Event::Key)
            .collect();
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless Parsing ──────────────────────────────────────────────────────

enum Parsed {
    Event(Event, usize),
    Incomplete,
    Skip(usize),
}

fn try_parse(buf: &[u8]) -> Parsed {
    match buf[0] {
        0x1B => parse_escape(buf),
        0x08 | 0x7F => key(KeyEvent::plain(KeyCode::Backspace), 1),
        0x09 => key(KeyEvent::plain(KeyCode::Tab), 1),
        0x0A | 0x0D => key(KeyEvent::plain(KeyCode::Enter), 1),
        0x00 => key(KeyEvent::ctrl('@'), 1),
        b @ 0x01..=0x1A => key(KeyEvent::ctrl((b + b'a' - 1) as char), 1),
        b @ 0x20..=0x7E => key(KeyEvent::plain(KeyCode::Char(b as char)), 1),
        0xC0..=0xFF => parse_utf8(buf),
        _ => Parsed::Skip(1),
    }
}

fn key(event: KeyEvent, consumed: usize) -> Parsed {
    Parsed::Event(Event::Key(event), consumed)
}

fn parse_escape(buf: &[u8]) -> Parsed {
    if buf.len() < 2 {
        return Parsed::Incomplete;
    }
    match buf[1] {
        b'[' => parse_csi(buf),
        b'O' => parse_ss3(buf),
        b @ 0x20..=0x7E => key(
            KeyEvent {
                code: KeyCode::Char(b as char),
                modifiers: Modifiers::ALT,
            },
            2,
        ),
        _ => key(KeyEvent::plain(KeyCode::Escape), 1),
    }
}

fn parse_csi(buf: &[u8]) -> Parsed {
    // Final byte is in 0x40..=0x7E; parameters and intermediates below it.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Parsed::Skip(end + 1);
        }
        end += 1;
    }
    if end >= buf.len() {
        return Parsed::Incomplete;
    }

    let final_byte = buf[end];
    let params = parse_params(&buf[2..end]);
    let consumed = end + 1;
    let modifiers = params
        .get(1)
        .map_or(Modifiers::empty(), |&m| decode_modifiers(m));

    let code = if final_byte == b'~' {
        match params.first().copied().unwrap_or(0) {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            15 => KeyCode::F(5),
            17 => KeyCode::F(6),
            18 => KeyCode::F(7),
            19 => KeyCode::F(8),
            20 => KeyCode::F(9),
            21 => KeyCode::F(10),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            _ => return Parsed::Skip(consumed),
        }
    } else {
        match final_byte {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            _ => return Parsed::Skip(consumed),
        }
    };

    key(KeyEvent { code, modifiers }, consumed)
}

fn parse_ss3(buf: &[u8]) -> Parsed {
    if buf.len() < 3 {
        return Parsed::Incomplete;
    }
    let code = match buf[2] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'P' => KeyCode::F(1),
        b'Q' => KeyCode::F(2),
        b'R' => KeyCode::F(3),
        b'S' => KeyCode::F(4),
        _ => return Parsed::Skip(3),
    };
    key(KeyEvent::plain(code), 3)
}

fn parse_utf8(buf: &[u8]) -> Parsed {
    let expected = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Parsed::Skip(1),
    };
    if buf.len() < expected {
        return Parsed::Incomplete;
    }
    std::str::from_utf8(&buf[..expected])
        .ok()
        .and_then(|s| s.chars().next())
        .map_or(Parsed::Skip(1), |ch| {
            key(KeyEvent::plain(KeyCode::Char(ch)), expected)
        })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Parse `;`-separated decimal parameters. Missing values become 0.
fn parse_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|part| {
            part.iter()
                .take_while(|b| b.is_ascii_digit())
                .fold(0u16, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
                })
        })
        .collect()
}

/// xterm encodes modifiers as `1 + bitmask`.
fn decode_modifiers(param: u16) -> Modifiers {
    let bits = param.saturating_sub(1);
    Modifiers::from_bits_truncate(u8::try_from(bits & 0x07).unwrap_or(0))
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(bytes: &[u8]) -> Vec<Event> {
        Parser::new().advance(bytes)
    }

    fn one(bytes: &[u8]) -> KeyEvent {
        match keys(bytes).as_slice() {
            [Event::Key(k)] => *k,
            other => panic!("expected one key, got {other:?}"),
        }
    }

    #[test]
    fn printable_ascii() {
        assert_eq!(one(b"a"), KeyEvent::plain(KeyCode::Char('a')));
        assert_eq!(one(b" "), KeyEvent::plain(KeyCode::Char(' ')));
    }

    #[test]
    fn control_letters_map_to_ctrl() {
        assert_eq!(one(b"\x0f"), KeyEvent::ctrl('o'));
        assert_eq!(one(b"\x13"), KeyEvent::ctrl('s'));
        assert!(one(b"\x1a").is_ctrl('z'));
    }

    #[test]
    fn enter_tab_backspace() {
        assert_eq!(one(b"\r"), KeyEvent::plain(KeyCode::Enter));
        assert_eq!(one(b"\t"), KeyEvent::plain(KeyCode::Tab));
        assert_eq!(one(b"\x7f"), KeyEvent::plain(KeyCode::Backspace));
    }

    #[test]
    fn arrows_csi_and_ss3() {
        assert_eq!(one(b"\x1b[A"), KeyEvent::plain(KeyCode::Up));
        assert_eq!(one(b"\x1b[D"), KeyEvent::plain(KeyCode::Left));
        assert_eq!(one(b"\x1bOB"), KeyEvent::plain(KeyCode::Down));
    }

    #[test]
    fn tilde_keys() {
        assert_eq!(one(b"\x1b[3~"), KeyEvent::plain(KeyCode::Delete));
        assert_eq!(one(b"\x1b[5~"), KeyEvent::plain(KeyCode::PageUp));
        assert_eq!(one(b"\x1b[21~"), KeyEvent::plain(KeyCode::F(10)));
    }

    #[test]
    fn modified_arrow() {
        let k = one(b"\x1b[1;5C");
        assert_eq!(k.code, KeyCode::Right);
        assert_eq!(k.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn alt_letter() {
        let k = one(b"\x1bf");
        assert_eq!(k.code, KeyCode::Char('f'));
        assert_eq!(k.modifiers, Modifiers::ALT);
        assert!(!k.is_ctrl('f'));
    }

    #[test]
    fn utf8_characters() {
        assert_eq!(one("é".as_bytes()), KeyEvent::plain(KeyCode::Char('é')));
        assert_eq!(one("日".as_bytes()), KeyEvent::plain(KeyCode::Char('日')));
    }

    #[test]
    fn utf8_split_across_reads() {
        let bytes = "ü".as_bytes();
        let mut p = Parser::new();
        assert!(p.advance(&bytes[..1]).is_empty());
        assert!(!p.awaiting_escape());
        assert_eq!(
            p.advance(&bytes[1..]),
            vec![Event::Key(KeyEvent::plain(KeyCode::Char('ü')))]
        );
    }

    #[test]
    fn lone_escape_waits_for_flush() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b").is_empty());
        assert!(p.awaiting_escape());
        assert_eq!(
            p.flush(),
            vec![Event::Key(KeyEvent::plain(KeyCode::Escape))]
        );
        assert!(!p.awaiting_escape());
    }

    #[test]
    fn csi_split_across_reads() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[").is_empty());
        assert_eq!(p.advance(b"C"), vec![Event::Key(KeyEvent::plain(KeyCode::Right))]);
    }

    #[test]
    fn bracketed_paste() {
        assert_eq!(
            keys(b"\x1b[200~hello\nworld\x1b[201~"),
            vec![Event::Paste("hello\nworld".to_string())]
        );
    }

    #[test]
    fn paste_split_across_reads() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[200~abc").is_empty());
        assert_eq!(p.advance(b"def\x1b[201~x").len(), 2);
    }

    #[test]
    fn paste_in_progress_is_not_an_escape() {
        let mut p = Parser::new();
        assert!(p.advance("\x1b[200~line1\nline2 \u{fc}".as_bytes()).is_empty());
        assert!(!p.awaiting_escape());
        assert_eq!(
            p.advance(b"tail\x1b[201~"),
            vec![Event::Paste("line1\nline2 \u{fc}tail".to_string())]
        );
        assert!(!p.awaiting_escape());
    }

    #[test]
    fn paste_end_split_inside_escape_keeps_waiting() {
        let mut p = Parser::new();
        assert!(p.advance(b"\x1b[200~abc\x1b[20").is_empty());
        assert!(!p.awaiting_escape());
        assert_eq!(p.advance(b"1~"), vec![Event::Paste("abc".to_string())]);
    }

    #[test]
    fn flush_mid_paste_keeps_text() {
        let mut p = Parser::new();
        p.advance("\x1b[200~a\nb \u{fc}".as_bytes());
        assert_eq!(p.flush(), vec![Event::Paste("a\nb \u{fc}".to_string())]);
        assert_eq!(p.advance(b"x"), vec![Event::Key(KeyEvent::plain(KeyCode::Char('x')))]);
    }

    #[test]
    fn several_keys_in_one_read() {
        let events = keys(b"ab\x1b[Bc");
        assert_eq!(events.len(), 4);
        assert_eq!(events[2], Event::Key(KeyEvent::plain(KeyCode::Down)));
    }

    #[test]
    fn unknown_csi_is_skipped() {
        assert_eq!(keys(b"\x1b[99zq"), vec![Event::Key(KeyEvent::plain(KeyCode::Char('q')))]);
    }
}
