//! Keyboard editing for `tui_input` text fields.
//!
//! `tui_input`'s bundled crossterm backend is built against a different
//! crossterm release than this crate, so its event types cannot cross
//! the boundary. Key presses are translated into backend-independent
//! `InputRequest`s instead.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::{Input, InputRequest};

/// Apply one key press to a text field. Unmapped keys are ignored.
pub fn apply_key(input: &mut Input, key: KeyEvent) {
    if let Some(request) = request_for(key) {
        input.handle(request);
    }
}

fn request_for(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('w') if ctrl => Some(InputRequest::DeletePrevWord),
        KeyCode::Char('u') if ctrl => Some(InputRequest::DeleteLine),
        KeyCode::Char(c) if !ctrl => Some(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Left => Some(InputRequest::GoToPrevChar),
        KeyCode::Right => Some(InputRequest::GoToNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}
