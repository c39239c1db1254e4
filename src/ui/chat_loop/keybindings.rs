//! Translates terminal events into [`AppAction`]s.
//!
//! A handful of keys are global; everything else depends on which widget
//! has focus.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tui_textarea::Input as TAInput;

use crate::core::app::{App, AppAction, Focus};

const MOUSE_SCROLL_LINES: u16 = 3;

fn global_action(app: &App, key: &KeyEvent, page: u16) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(AppAction::Quit),
        KeyCode::Tab => Some(AppAction::FocusNext),
        KeyCode::BackTab => Some(AppAction::FocusPrevious),
        KeyCode::F(1) => Some(AppAction::ToggleTips),
        KeyCode::F(2) => Some(AppAction::ToggleConfigPanel),
        KeyCode::PageUp => Some(AppAction::ScrollUp { lines: page }),
        KeyCode::PageDown => Some(AppAction::ScrollDown { lines: page }),
        KeyCode::End if ctrl => Some(AppAction::ScrollToBottom),
        KeyCode::Esc if app.ui.notice.is_some() => Some(AppAction::DismissNotice),
        _ => None,
    }
}

fn is_activate(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Char(' '))
}

/// Map a key press to an action, or `None` when the key does nothing here.
pub fn map_key(app: &App, key: KeyEvent, page: u16) -> Option<AppAction> {
    if let Some(action) = global_action(app, &key, page) {
        return Some(action);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match app.ui.focus {
        Focus::ApiKey => match key.code {
            KeyCode::Char('u') if ctrl => Some(AppAction::ApiKeyClear),
            KeyCode::Char(ch) if !ctrl && !alt => Some(AppAction::ApiKeyChar { ch }),
            KeyCode::Backspace => Some(AppAction::ApiKeyBackspace),
            KeyCode::Delete => Some(AppAction::ApiKeyClear),
            KeyCode::Enter if app.chat_visible() => Some(AppAction::FocusChatInput),
            KeyCode::Enter => Some(AppAction::FocusNext),
            _ => None,
        },
        Focus::GetKeyButton if is_activate(key.code) => Some(AppAction::ShowApiKeyLink),
        Focus::Model => match key.code {
            KeyCode::Left | KeyCode::Up => Some(AppAction::ModelPrevious),
            KeyCode::Right | KeyCode::Down => Some(AppAction::ModelNext),
            code if is_activate(code) => Some(AppAction::ModelNext),
            _ => None,
        },
        Focus::Temperature => match key.code {
            KeyCode::Left | KeyCode::Down | KeyCode::Char('-') => {
                Some(AppAction::TemperatureDown)
            }
            KeyCode::Right | KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
                Some(AppAction::TemperatureUp)
            }
            _ => None,
        },
        Focus::ClearButton if is_activate(key.code) => Some(AppAction::ClearConversation),
        Focus::ChatInput => match key.code {
            KeyCode::Enter if alt || key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(AppAction::InsertNewline)
            }
            KeyCode::Enter => Some(AppAction::SubmitInput),
            _ => Some(AppAction::TextAreaInput {
                input: TAInput::from(key),
            }),
        },
        _ => None,
    }
}

/// Bracketed paste goes to whichever text field has focus.
pub fn map_paste(app: &App, text: String) -> Option<AppAction> {
    match app.ui.focus {
        Focus::ApiKey => Some(AppAction::ApiKeyPaste { text }),
        Focus::ChatInput => Some(AppAction::InsertIntoInput { text }),
        _ => None,
    }
}

pub fn map_mouse(event: MouseEvent) -> Option<AppAction> {
    match event.kind {
        MouseEventKind::ScrollUp => Some(AppAction::ScrollUp {
            lines: MOUSE_SCROLL_LINES,
        }),
        MouseEventKind::ScrollDown => Some(AppAction::ScrollDown {
            lines: MOUSE_SCROLL_LINES,
        }),
        _ => None,
    }
}
