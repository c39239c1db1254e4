//! Static help text: the onboarding view shown before a key is entered,
//! the usage tips panel, and the current-configuration panel.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::core::app::App;
use crate::core::settings::{Model, API_KEY_URL};
use crate::ui::theme::Theme;

pub fn onboarding_lines(theme: &Theme) -> Vec<Line<'static>> {
    let heading = theme.heading_style;
    let text = theme.assistant_text_style;
    let bold = text.add_modifier(Modifier::BOLD);

    vec![
        Line::from(Span::styled(
            "👈 Please enter your Gemini API key in the sidebar to start chatting!",
            theme.info_style,
        )),
        Line::default(),
        Line::from(Span::styled("How to get started:", heading)),
        Line::default(),
        Line::from(vec![
            Span::styled("1. ", heading),
            Span::styled("Get your free API key:", bold),
        ]),
        Line::from(vec![
            Span::styled("   • Go to Google AI Studio: ", text),
            Span::styled(API_KEY_URL, theme.link_style),
        ]),
        Line::from(Span::styled("   • Sign in with your Google account", text)),
        Line::from(Span::styled("   • Create a new API key", text)),
        Line::from(vec![
            Span::styled("2. ", heading),
            Span::styled("Enter the API key", bold),
            Span::styled(" in the sidebar (paste works too)", text),
        ]),
        Line::from(vec![
            Span::styled("3. ", heading),
            Span::styled("Start chatting!", bold),
        ]),
        Line::default(),
        Line::from(Span::styled("Features:", heading)),
        Line::default(),
        feature_line("Conversational memory", "remembers your chat history", theme),
        feature_line("Configurable models", "choose between different Gemini models", theme),
        feature_line("Temperature control", "adjust response creativity", theme),
        feature_line("Clear history", "start fresh conversations", theme),
        feature_line("Free to use", "uses Google's free Gemini API tier", theme),
    ]
}

fn feature_line(title: &'static str, detail: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("• ", theme.heading_style),
        Span::styled(title, theme.assistant_text_style.add_modifier(Modifier::BOLD)),
        Span::styled(format!(": {detail}"), theme.assistant_text_style),
    ])
}

pub fn usage_tips_lines(theme: &Theme) -> Vec<Line<'static>> {
    let text = theme.assistant_text_style;
    let mut lines = vec![Line::from(vec![
        Span::styled("API key: ", text.add_modifier(Modifier::BOLD)),
        Span::styled(API_KEY_URL, theme.link_style),
    ])];
    for model in Model::ALL {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", model.as_str()), theme.code_style),
            Span::styled(format!(": {}", model.description()), text),
        ]));
    }
    lines.extend([
        Line::from(Span::styled(
            "Temperature: 0 = deterministic, 1 = very random",
            text,
        )),
        Line::from(Span::styled(
            "Memory: the whole conversation is sent with every message",
            text,
        )),
        Line::from(Span::styled(
            "Tab/Shift+Tab move between controls, Clear Chat History starts over",
            text,
        )),
    ]);
    lines
}

pub fn config_panel_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.ui.theme;
    let label = theme.sidebar_label_style;
    let value = theme.sidebar_value_style;
    vec![
        Line::from(vec![
            Span::styled("Model: ", label),
            Span::styled(app.settings.model.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Temperature: ", label),
            Span::styled(app.settings.temperature.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Messages in conversation: ", label),
            Span::styled(app.message_count().to_string(), value),
        ]),
    ]
}
