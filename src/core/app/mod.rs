//! Application state owned by the chat loop.
//!
//! [`App`] bundles the caller-owned [`ChatSession`], the sidebar's
//! [`ChatSettings`], and the terminal [`UiState`]. Input is translated into
//! [`AppAction`]s and applied through [`apply_action`]; anything that needs
//! the network comes back as an [`AppCommand`] for the loop to run.

pub mod actions;
pub mod streaming;
pub mod ui_state;

pub use actions::{apply_action, AppAction, AppActionContext, AppCommand};
pub use ui_state::{Focus, Notice, UiState};

use crate::core::session::ChatSession;
use crate::core::settings::{ApiKey, ChatSettings, Model, Temperature};
use crate::ui::theme::Theme;

pub struct AppInitConfig {
    pub model: Model,
    pub temperature: Temperature,
}

pub struct App {
    pub session: ChatSession,
    pub settings: ChatSettings,
    pub ui: UiState,
}

impl App {
    pub fn new(init: AppInitConfig, theme: Theme) -> Self {
        Self {
            session: ChatSession::new(),
            settings: ChatSettings::new(ApiKey::default(), init.model, init.temperature),
            ui: UiState::new(theme),
        }
    }

    /// The chat panel is only shown once an API key has been entered.
    pub fn chat_visible(&self) -> bool {
        self.settings.has_api_key()
    }

    pub fn message_count(&self) -> usize {
        self.session.conversation().len()
    }
}

#[cfg(test)]
impl App {
    pub fn new_test() -> Self {
        Self::new(
            AppInitConfig {
                model: Model::default(),
                temperature: Temperature::default(),
            },
            Theme::dark_default(),
        )
    }

    pub fn new_test_with_key(key: &str) -> Self {
        let mut app = Self::new_test();
        app.settings.api_key = ApiKey::new(key);
        app
    }
}
