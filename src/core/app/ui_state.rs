use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use crate::ui::theme::Theme;

/// Widget that receives keyboard input, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ApiKey,
    GetKeyButton,
    Model,
    Temperature,
    ClearButton,
    ChatInput,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::ApiKey,
        Focus::GetKeyButton,
        Focus::Model,
        Focus::Temperature,
        Focus::ClearButton,
        Focus::ChatInput,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next widget in Tab order; the chat input is skipped while it is hidden.
    pub fn next(self, chat_visible: bool) -> Self {
        let mut idx = self.index();
        loop {
            idx = (idx + 1) % Self::ORDER.len();
            let candidate = Self::ORDER[idx];
            if chat_visible || candidate != Focus::ChatInput {
                return candidate;
            }
        }
    }

    pub fn previous(self, chat_visible: bool) -> Self {
        let mut idx = self.index();
        loop {
            idx = (idx + Self::ORDER.len() - 1) % Self::ORDER.len();
            let candidate = Self::ORDER[idx];
            if chat_visible || candidate != Focus::ChatInput {
                return candidate;
            }
        }
    }

    pub fn is_sidebar(self) -> bool {
        self != Focus::ChatInput
    }
}

/// Inline message shown between the transcript and the input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: Focus,
    textarea: TextArea<'static>,
    pub theme: Theme,
    pub notice: Option<Notice>,
    /// Text streamed so far while a completion is in flight.
    pub pending_response: Option<String>,
    /// Distance from the bottom of the transcript; 0 follows new output.
    pub scroll_from_bottom: u16,
    pub show_tips: bool,
    pub show_config: bool,
    pub exit_requested: bool,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        let mut state = Self {
            focus: Focus::ApiKey,
            textarea: TextArea::default(),
            theme,
            notice: None,
            pending_response: None,
            scroll_from_bottom: 0,
            show_tips: false,
            show_config: false,
            exit_requested: false,
        };
        state.configure_textarea();
        state
    }

    pub(crate) fn configure_textarea(&mut self) {
        self.textarea.set_style(self.theme.input_text_style);
        self.textarea.set_cursor_style(self.theme.input_cursor_style);
        self.textarea
            .set_cursor_line_style(self.theme.input_cursor_line_style);
        self.textarea
            .set_placeholder_text("Type your message here...");
        self.textarea.set_placeholder_style(self.theme.footer_style);
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    /// Textarea with the border that matches the current focus, ready to render.
    pub fn styled_textarea(&self) -> TextArea<'static> {
        let focused = self.focus == Focus::ChatInput;
        let mut textarea = self.textarea.clone();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border_for(focused))
                .title("Message (Enter to send, Alt+Enter for new line)")
                .title_style(self.theme.input_title_style),
        );
        if !focused {
            textarea.set_cursor_style(Style::default());
        }
        textarea
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }

    pub fn get_input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn input_line_count(&self) -> usize {
        self.textarea.lines().len().max(1)
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
        self.configure_textarea();
    }

    pub fn is_waiting(&self) -> bool {
        self.pending_response.is_some()
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::Info(text.into()));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::Error(text.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_skips_hidden_chat_input() {
        assert_eq!(Focus::ClearButton.next(false), Focus::ApiKey);
        assert_eq!(Focus::ApiKey.previous(false), Focus::ClearButton);
        assert_eq!(Focus::ClearButton.next(true), Focus::ChatInput);
        assert_eq!(Focus::ChatInput.next(true), Focus::ApiKey);
        assert_eq!(Focus::ApiKey.previous(true), Focus::ChatInput);
    }

    #[test]
    fn input_text_joins_lines() {
        let mut ui = UiState::new(Theme::dark_default());
        ui.apply_textarea_edit(|ta| {
            ta.insert_str("first");
            ta.insert_newline();
            ta.insert_str("second");
        });
        assert_eq!(ui.get_input_text(), "first\nsecond");
        assert_eq!(ui.input_line_count(), 2);

        ui.clear_input();
        assert_eq!(ui.get_input_text(), "");
    }
}
