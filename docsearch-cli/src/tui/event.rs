//! Event handling for the TUI
//!
//! Each terminal key press is replayed the way a browser delivers it to the page:
//! key-down reaches the page-wide dismiss listener, the search box is edited, then
//! key-up reaches the search box's update listener.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use docsearch_core::KeyCode as DomKeyCode;

use super::app::App;

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
}

/// DOM `keyCode` for a terminal key, 0 when there is no sensible equivalent
pub fn dom_key_code(key: &KeyEvent) -> DomKeyCode {
    let code = match key.code {
        KeyCode::Backspace => 8,
        KeyCode::Tab => 9,
        KeyCode::Enter => 13,
        KeyCode::Esc => 27,
        KeyCode::End => 35,
        KeyCode::Home => 36,
        KeyCode::Left => 37,
        KeyCode::Up => 38,
        KeyCode::Right => 39,
        KeyCode::Down => 40,
        KeyCode::Delete => 46,
        KeyCode::Char(' ') => 32,
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase() as u32,
        KeyCode::Char('.') => 190,
        KeyCode::Char('-') | KeyCode::Char('_') => 189,
        _ => 0,
    };
    DomKeyCode(code)
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Release/repeat events are reported on some platforms; only presses count
    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    // Global quit shortcuts (Ctrl+C, Ctrl+Q)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return HandleResult::Quit,
            KeyCode::Char('u') => {
                app.input.clear();
                app.cursor = 0;
                app.key_up(DomKeyCode(0));
            }
            _ => {}
        }
        return HandleResult::Continue;
    }

    // Selection keys move through the list and never reach the widget
    match key.code {
        KeyCode::Up => {
            app.select_prev();
            return HandleResult::Continue;
        }
        KeyCode::Down => {
            app.select_next();
            return HandleResult::Continue;
        }
        KeyCode::Enter => {
            app.choose();
            return if app.should_quit {
                HandleResult::Quit
            } else {
                HandleResult::Continue
            };
        }
        _ => {}
    }

    let code = dom_key_code(&key);
    app.key_down(code);

    match key.code {
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_back(),
        KeyCode::Delete => app.delete_forward(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        _ => {}
    }

    app.key_up(code);
    HandleResult::Continue
}
