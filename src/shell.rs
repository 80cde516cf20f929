// SPDX-License-Identifier: MIT
//
// The shell: terminal, key loop, and screen layout.
//
// Each keypress flows through:
//
//   stdin → KeyReader → handle → menu / shortcut / edit primitive
//   paint → menu bar + view.render + message line → Screen → stdout
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ menu bar (INVERSE)           │  ← row 0
//   ├──────────────────────────────┤
//   │ text area                    │  ← h - 3 rows (managed by View)
//   ├──────────────────────────────┤
//   │ status line (INVERSE)        │  ← 1 row (managed by View)
//   ├──────────────────────────────┤
//   │ message line                 │  ← 1 row (managed by Shell)
//   └──────────────────────────────┘
//
// Menu actions and their shortcuts both end in `Editor::dispatch`, which
// gets a `TermDialogs` borrowing the key reader for its nested prompts.

use std::io;
use std::path::PathBuf;

use n_editor::view::View;
use n_editor::{Action, Editor, Flow, Menu, Motion};
use n_term::ansi::Attr;
use n_term::input::{Event, KeyCode, KeyEvent, Modifiers};
use n_term::reader::KeyReader;
use n_term::screen::{Screen, Span};
use n_term::terminal::Terminal;
use tracing::{debug, info, warn};

use crate::dialogs::TermDialogs;
use crate::menu::{self, MenuBar, MenuOutcome};

/// Shown on the message line when there is nothing else to say.
const HINT: &str = "F10 menu   Ctrl+S save   Ctrl+Q quit";

// ─── Shell ───────────────────────────────────────────────────────────────────

pub struct Shell {
    terminal: Terminal,
    reader: KeyReader,
    editor: Editor,
    view: View,

    /// The open dropdown, if any.
    menu: Option<MenuBar>,

    /// One-shot text for the message line, cleared by the next key.
    message: Option<String>,

    /// Presentation generation painted last. A change forces a full clear.
    generation: u64,

    /// Title last sent to the terminal.
    title: String,

    /// Text rows in the last frame, for PageUp/PageDown.
    page: usize,
}

impl Shell {
    /// # Errors
    ///
    /// Returns an error if the terminal handle can't be created.
    pub fn new(editor: Editor) -> io::Result<Self> {
        let generation = editor.presentation().generation();
        Ok(Self {
            terminal: Terminal::new()?,
            reader: KeyReader::new(),
            editor,
            view: View::new(),
            menu: None,
            message: None,
            generation,
            title: String::new(),
            page: 1,
        })
    }

    /// Enter editor mode and run until Quit passes the unsaved-changes
    /// gate.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal I/O fails. The terminal is restored
    /// either way.
    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;
        info!("editor started");
        let result = self.event_loop();
        let left = self.terminal.leave();
        info!("editor stopped");
        first_error(result, left)
    }

    fn event_loop(&mut self) -> io::Result<()> {
        loop {
            self.paint()?;
            let event = self.reader.next_event()?;
            if let Some(action) = self.handle(event) {
                // Close the dropdown before a dialog draws over the frame.
                self.paint()?;
                if self.run_action(action) == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }

    /// Apply one event. Returns the action to dispatch, if the event picked
    /// one.
    fn handle(&mut self, event: Event) -> Option<Action> {
        self.message = None;
        match event {
            Event::Paste(text) => {
                if self.menu.is_none() {
                    self.editor.document_mut().insert(&text);
                }
                None
            }
            Event::Key(key) => self.handle_key(&key),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<Action> {
        if let Some(bar) = self.menu.as_mut() {
            return match bar.handle(key) {
                MenuOutcome::Stay => None,
                MenuOutcome::Close => {
                    self.menu = None;
                    None
                }
                MenuOutcome::Run(action) => {
                    self.menu = None;
                    Some(action)
                }
            };
        }

        if let Some(action) = Action::from_key(key) {
            return Some(action);
        }

        if key.code == KeyCode::F(10) {
            self.menu = Some(MenuBar::open(Menu::File));
            return None;
        }
        if let KeyCode::Char(ch) = key.code {
            if key.modifiers == Modifiers::ALT {
                if let Some(m) = menu::menu_for_letter(ch) {
                    self.menu = Some(MenuBar::open(m));
                    return None;
                }
            }
        }

        self.edit_key(key);
        None
    }

    /// Keys that edit the text or move the cursor.
    fn edit_key(&mut self, key: &KeyEvent) {
        let extend = key.modifiers.contains(Modifiers::SHIFT);
        let ctrl = key.modifiers.contains(Modifiers::CTRL);
        let page = self.page.max(1);
        let doc = self.editor.document_mut();

        match key.code {
            KeyCode::Left => doc.move_cursor(Motion::Left, extend),
            KeyCode::Right => doc.move_cursor(Motion::Right, extend),
            KeyCode::Up => doc.move_cursor(Motion::Up(1), extend),
            KeyCode::Down => doc.move_cursor(Motion::Down(1), extend),
            KeyCode::PageUp => doc.move_cursor(Motion::Up(page), extend),
            KeyCode::PageDown => doc.move_cursor(Motion::Down(page), extend),
            KeyCode::Home if ctrl => doc.move_cursor(Motion::Start, extend),
            KeyCode::End if ctrl => doc.move_cursor(Motion::End, extend),
            KeyCode::Home => doc.move_cursor(Motion::LineStart, extend),
            KeyCode::End => doc.move_cursor(Motion::LineEnd, extend),
            KeyCode::Enter => doc.insert("\n"),
            KeyCode::Tab => doc.insert("\t"),
            KeyCode::Backspace => doc.delete_backward(),
            KeyCode::Delete => doc.delete_forward(),
            KeyCode::Char(ch) if !key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) => {
                doc.insert(ch.encode_utf8(&mut [0; 4]));
            }
            _ => {}
        }
    }

    fn run_action(&mut self, action: Action) -> Flow {
        let path_before: Option<PathBuf> = self.editor.document().path().map(Into::into);
        let size = self.terminal.refresh_size();
        let mut dialogs = TermDialogs::new(&mut self.reader, size);
        let flow = self.editor.dispatch(action, &mut dialogs);

        if self.editor.document().path() != path_before.as_deref() {
            self.view.reset();
        }
        if let Some(status) = self.editor.take_status() {
            self.message = Some(status);
        }
        flow
    }

    // ─── Painting ────────────────────────────────────────────────────────────

    fn paint(&mut self) -> io::Result<()> {
        let size = self.terminal.refresh_size();
        let mut screen = Screen::new(size);

        let generation = self.editor.presentation().generation();
        if generation != self.generation {
            debug!(generation, "restyle");
            self.generation = generation;
            screen.clear();
        }

        let title = self.editor.title();
        if title != self.title {
            screen.title(&title);
            self.title = title;
        }

        let cursor = self.compose(&mut screen);
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        screen.present(cursor, &mut lock)
    }

    /// Paint every row of one frame. Returns where the cursor goes.
    fn compose(&mut self, screen: &mut Screen) -> Option<(u16, u16)> {
        let size = screen.size();
        let (bar, fill) = menu::bar(self.menu.as_ref().map(MenuBar::menu), size.cols);
        screen.line(0, &bar, Some(&fill));

        let band = size.rows.saturating_sub(2);
        self.page = usize::from(band.saturating_sub(1));
        let cursor = self.view.render(&self.editor, screen, 1, band);

        let bottom = size.rows.saturating_sub(1);
        if bottom > 0 {
            let line = self.message.as_ref().map_or_else(
                || Span::styled(HINT, Attr::DIM),
                |m| Span::plain(m.as_str()),
            );
            screen.line(bottom, &[line], None);
        }

        if let Some(bar) = self.menu {
            let (col, rows) = bar.dropdown();
            for (i, row) in (1u16..).zip(rows) {
                screen.put(i, col, &row);
            }
            return None;
        }
        cursor
    }
}

/// The event loop's own error wins over a failure to restore the
/// terminal, which is only logged in that case.
fn first_error(result: io::Result<()>, left: io::Result<()>) -> io::Result<()> {
    if let Err(e) = left {
        warn!(error = %e, "cannot restore terminal");
        result?;
        return Err(e);
    }
    result
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use n_term::terminal::Size;
    use pretty_assertions::assert_eq;

    fn shell() -> Shell {
        Shell::new(Editor::default()).unwrap()
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::plain(code))
    }

    fn chars(shell: &mut Shell, s: &str) {
        for ch in s.chars() {
            assert_eq!(shell.handle(press(KeyCode::Char(ch))), None);
        }
    }

    fn shifted(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: Modifiers::SHIFT,
        })
    }

    #[test]
    fn typing_edits_the_document() {
        let mut s = shell();
        chars(&mut s, "hello");
        s.handle(press(KeyCode::Enter));
        chars(&mut s, "world");
        s.handle(press(KeyCode::Backspace));
        assert_eq!(s.editor.document().text(), "hello\nworl");
        assert!(s.editor.document().is_modified());
    }

    #[test]
    fn shortcuts_become_actions() {
        let mut s = shell();
        assert_eq!(s.handle(Event::Key(KeyEvent::ctrl('s'))), Some(Action::Save));
        assert_eq!(s.handle(Event::Key(KeyEvent::ctrl('q'))), Some(Action::Quit));
        assert_eq!(s.editor.document().text(), "");
    }

    #[test]
    fn shift_arrows_select() {
        let mut s = shell();
        chars(&mut s, "abc");
        s.handle(shifted(KeyCode::Left));
        s.handle(shifted(KeyCode::Left));
        chars(&mut s, "X");
        assert_eq!(s.editor.document().text(), "aX");
    }

    #[test]
    fn ctrl_home_goes_to_start() {
        let mut s = shell();
        chars(&mut s, "one");
        s.handle(press(KeyCode::Enter));
        chars(&mut s, "two");
        s.handle(Event::Key(KeyEvent {
            code: KeyCode::Home,
            modifiers: Modifiers::CTRL,
        }));
        chars(&mut s, ">");
        assert_eq!(s.editor.document().text(), ">one\ntwo");
    }

    #[test]
    fn paste_inserts_text() {
        let mut s = shell();
        s.handle(Event::Paste("a\nb".into()));
        assert_eq!(s.editor.document().text(), "a\nb");
    }

    #[test]
    fn f10_opens_menu_and_enter_runs() {
        let mut s = shell();
        assert_eq!(s.handle(press(KeyCode::F(10))), None);
        assert_eq!(s.menu.map(|m| m.menu()), Some(Menu::File));
        s.handle(press(KeyCode::Right));
        s.handle(press(KeyCode::Down));
        assert_eq!(s.handle(press(KeyCode::Enter)), Some(Action::Redo));
        assert!(s.menu.is_none());
    }

    #[test]
    fn open_menu_swallows_typing() {
        let mut s = shell();
        s.handle(Event::Key(KeyEvent {
            code: KeyCode::Char('o'),
            modifiers: Modifiers::ALT,
        }));
        assert_eq!(s.menu.map(|m| m.menu()), Some(Menu::Format));
        s.handle(Event::Paste("ignored".into()));
        s.handle(press(KeyCode::Escape));
        assert!(s.menu.is_none());
        assert_eq!(s.editor.document().text(), "");
    }

    #[test]
    fn next_key_clears_message() {
        let mut s = shell();
        s.message = Some("Replaced 3 occurrences".into());
        s.handle(press(KeyCode::Right));
        assert_eq!(s.message, None);
    }

    #[test]
    fn frame_has_menu_bar_status_and_hint() {
        let mut s = shell();
        chars(&mut s, "hi");
        let mut screen = Screen::new(Size { cols: 80, rows: 6 });
        let cursor = s.compose(&mut screen);
        let out = String::from_utf8_lossy(screen.bytes()).into_owned();
        assert!(out.contains("File"));
        assert!(out.contains("Format"));
        assert!(out.contains("Ln 1, Col 3"));
        assert!(out.contains(HINT));
        assert_eq!(cursor, Some((2, 1)));
        assert_eq!(s.page, 3);
    }

    #[test]
    fn open_dropdown_hides_cursor() {
        let mut s = shell();
        s.handle(press(KeyCode::F(10)));
        let mut screen = Screen::new(Size { cols: 80, rows: 10 });
        assert_eq!(s.compose(&mut screen), None);
        let out = String::from_utf8_lossy(screen.bytes()).into_owned();
        assert!(out.contains("Open..."));
        assert!(out.contains("Ctrl+Q"));
    }

    #[test]
    fn loop_error_wins_over_restore_error() {
        let looped = io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed");
        let restore = io::Error::other("tcsetattr failed");
        let err = first_error(Err(looped), Err(restore)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(err.to_string(), "stdin closed");
    }

    #[test]
    fn restore_error_reported_after_clean_loop() {
        let restore = io::Error::other("tcsetattr failed");
        let err = first_error(Ok(()), Err(restore)).unwrap_err();
        assert_eq!(err.to_string(), "tcsetattr failed");
        assert!(first_error(Ok(()), Ok(())).is_ok());
    }
}
