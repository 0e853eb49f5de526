use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use triage_core::Screen;

use crate::app::Action;

/// Map key events to actions based on the active screen
pub fn handle_key(key: KeyEvent, screen: Screen) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::ForceQuit;
    }

    match screen {
        Screen::Loading | Screen::Progress => Action::None,
        Screen::Review => handle_key_review(key),
        Screen::Confirm => handle_key_confirm(key),
        Screen::Complete => handle_key_complete(key),
    }
}

fn handle_key_review(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('y') => Action::Keep,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('n') => Action::Delete,
        KeyCode::Char('s') => Action::Skip,
        KeyCode::Char('u') => Action::Undo,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

fn handle_key_confirm(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') => Action::ConfirmYes,
        KeyCode::Char('n') | KeyCode::Esc => Action::ConfirmNo,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

fn handle_key_complete(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Action::Quit,
        _ => Action::None,
    }
}
