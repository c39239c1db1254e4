use tracing::debug;

use super::{App, Focus};
use crate::core::message::Turn;
use crate::core::provider::ProviderError;
use crate::core::session::SubmitError;
use crate::core::settings::API_KEY_URL;
use crate::ui::layout::max_scroll;
use crate::utils::input::{sanitize_secret_input, sanitize_text_input};

pub enum AppAction {
    FocusNext,
    FocusPrevious,
    FocusChatInput,
    ApiKeyChar { ch: char },
    ApiKeyBackspace,
    ApiKeyClear,
    ApiKeyPaste { text: String },
    ShowApiKeyLink,
    ModelNext,
    ModelPrevious,
    TemperatureUp,
    TemperatureDown,
    ClearConversation,
    TextAreaInput { input: tui_textarea::Input },
    InsertIntoInput { text: String },
    InsertNewline,
    SubmitInput,
    AppendResponseChunk { content: String },
    CompletionFinished { result: Result<String, ProviderError> },
    ScrollUp { lines: u16 },
    ScrollDown { lines: u16 },
    ScrollToBottom,
    ToggleTips,
    ToggleConfigPanel,
    DismissNotice,
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

/// Work the event loop must perform outside of plain state mutation.
#[derive(Debug, PartialEq, Eq)]
pub enum AppCommand {
    /// Send `history` (ending with the new user turn) to the provider.
    RunCompletion { history: Vec<Turn> },
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
    ctx: AppActionContext,
) -> Vec<AppCommand> {
    actions
        .into_iter()
        .filter_map(|action| apply_action(app, action, ctx))
        .collect()
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    match action {
        AppAction::FocusNext => {
            app.ui.focus = app.ui.focus.next(app.chat_visible());
            None
        }
        AppAction::FocusPrevious => {
            app.ui.focus = app.ui.focus.previous(app.chat_visible());
            None
        }
        AppAction::FocusChatInput => {
            if app.chat_visible() {
                app.ui.focus = Focus::ChatInput;
            }
            None
        }
        AppAction::ApiKeyChar { ch } => {
            if !ch.is_control() && !ch.is_whitespace() {
                app.settings.api_key.push(ch);
            }
            None
        }
        AppAction::ApiKeyBackspace => {
            app.settings.api_key.pop();
            hide_chat_if_key_removed(app);
            None
        }
        AppAction::ApiKeyClear => {
            app.settings.api_key.clear();
            hide_chat_if_key_removed(app);
            None
        }
        AppAction::ApiKeyPaste { text } => {
            app.settings.api_key.push_str(&sanitize_secret_input(&text));
            None
        }
        AppAction::ShowApiKeyLink => {
            app.ui
                .set_info(format!("Get your free Gemini API key here: {API_KEY_URL}"));
            None
        }
        AppAction::ModelNext => {
            app.settings.model = app.settings.model.next();
            debug!(model = %app.settings.model, "model changed");
            None
        }
        AppAction::ModelPrevious => {
            app.settings.model = app.settings.model.previous();
            debug!(model = %app.settings.model, "model changed");
            None
        }
        AppAction::TemperatureUp => {
            app.settings.temperature = app.settings.temperature.increase();
            None
        }
        AppAction::TemperatureDown => {
            app.settings.temperature = app.settings.temperature.decrease();
            None
        }
        AppAction::ClearConversation => {
            app.session.clear();
            app.ui.notice = None;
            app.ui.scroll_from_bottom = 0;
            None
        }
        AppAction::TextAreaInput { input } => {
            app.ui.apply_textarea_edit(|ta| {
                ta.input(input);
            });
            None
        }
        AppAction::InsertIntoInput { text } => {
            let sanitized = sanitize_text_input(&text);
            app.ui.apply_textarea_edit(|ta| {
                ta.insert_str(&sanitized);
            });
            None
        }
        AppAction::InsertNewline => {
            app.ui.apply_textarea_edit(|ta| ta.insert_newline());
            None
        }
        AppAction::SubmitInput => submit_input(app),
        AppAction::AppendResponseChunk { content } => {
            if let Some(pending) = app.ui.pending_response.as_mut() {
                pending.push_str(&content);
            }
            None
        }
        AppAction::CompletionFinished { result } => {
            app.ui.pending_response = None;
            let outcome = app.session.finish_turn(result).map(|_| ());
            if let Err(err) = outcome {
                app.ui.set_error(SubmitError::Provider(err).to_string());
            }
            None
        }
        AppAction::ScrollUp { lines } => {
            let max = max_scroll(app, ctx.term_width, ctx.term_height);
            app.ui.scroll_from_bottom = app.ui.scroll_from_bottom.saturating_add(lines).min(max);
            None
        }
        AppAction::ScrollDown { lines } => {
            app.ui.scroll_from_bottom = app.ui.scroll_from_bottom.saturating_sub(lines);
            None
        }
        AppAction::ScrollToBottom => {
            app.ui.scroll_from_bottom = 0;
            None
        }
        AppAction::ToggleTips => {
            app.ui.show_tips = !app.ui.show_tips;
            None
        }
        AppAction::ToggleConfigPanel => {
            app.ui.show_config = !app.ui.show_config;
            None
        }
        AppAction::DismissNotice => {
            app.ui.notice = None;
            None
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            None
        }
    }
}

fn hide_chat_if_key_removed(app: &mut App) {
    if !app.chat_visible() && app.ui.focus == Focus::ChatInput {
        app.ui.focus = Focus::ApiKey;
    }
}

fn submit_input(app: &mut App) -> Option<AppCommand> {
    if !app.chat_visible() || app.ui.is_waiting() {
        return None;
    }

    let text = app.ui.get_input_text();
    match app.session.begin_turn(&text) {
        Ok(history) => {
            app.ui.clear_input();
            app.ui.notice = None;
            app.ui.pending_response = Some(String::new());
            app.ui.scroll_from_bottom = 0;
            Some(AppCommand::RunCompletion { history })
        }
        Err(SubmitError::EmptyInput) => None,
        Err(err) => {
            app.ui.set_error(err.to_string());
            None
        }
    }
}
