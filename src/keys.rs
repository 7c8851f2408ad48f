use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Action, App};
use crate::runtime::AppEvent;

/// What the event loop should do in response to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(Action),
    OpenLink(String),
    Quit,
}

/// Map any runtime event to a command; ticks and resizes only redraw.
pub fn command_for_event(app: &App, event: AppEvent) -> Option<Command> {
    match event {
        AppEvent::Tick | AppEvent::Resize => None,
        AppEvent::Feed(result) => Some(Command::Apply(Action::from_feed(result))),
        AppEvent::Key(key) => command_for_key(app, key),
    }
}

pub fn command_for_key(app: &App, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    if let Some(dialog) = &app.dialog {
        return match key.code {
            KeyCode::Char('o') => dialog.link.clone().map(Command::OpenLink),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                Some(Command::Apply(Action::CloseShare))
            }
            _ => None,
        };
    }

    if app.is_running() {
        return match key.code {
            KeyCode::Esc => Some(Command::Apply(Action::Stop)),
            KeyCode::Backspace => Some(Command::Apply(Action::Backspace)),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Apply(Action::Type(c)))
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(Command::Apply(Action::Start)),
        KeyCode::Char('r') => Some(Command::Apply(Action::Reset)),
        KeyCode::Char('s') => Some(Command::Apply(Action::OpenShare)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
