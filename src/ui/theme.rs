use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub background_color: Color,
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub code_style: Style,
    pub heading_style: Style,
    pub link_style: Style,

    // Chrome
    pub title_style: Style,
    pub thinking_indicator_style: Style,
    pub footer_style: Style,
    pub panel_border_style: Style,
    pub focused_border_style: Style,
    pub sidebar_label_style: Style,
    pub sidebar_value_style: Style,
    pub sidebar_hint_style: Style,
    pub button_style: Style,
    pub focused_button_style: Style,
    pub gauge_style: Style,
    pub info_style: Style,
    pub error_style: Style,

    // Input area
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub input_cursor_line_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Reset,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_text_style: Style::default().fg(Color::White),
            code_style: Style::default().fg(Color::LightYellow),
            heading_style: Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
            link_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),

            title_style: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            thinking_indicator_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
            footer_style: Style::default().fg(Color::DarkGray),
            panel_border_style: Style::default().fg(Color::DarkGray),
            focused_border_style: Style::default().fg(Color::Yellow),
            sidebar_label_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            sidebar_value_style: Style::default().fg(Color::White),
            sidebar_hint_style: Style::default().fg(Color::DarkGray),
            button_style: Style::default().fg(Color::Gray),
            focused_button_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            gauge_style: Style::default().fg(Color::LightRed).bg(Color::DarkGray),
            info_style: Style::default().fg(Color::LightBlue),
            error_style: Style::default().fg(Color::LightRed),

            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            input_cursor_line_style: Style::default(),
        }
    }

    /// Border style for a panel depending on keyboard focus.
    pub fn border_for(&self, focused: bool) -> Style {
        if focused {
            self.focused_border_style
        } else {
            self.panel_border_style
        }
    }

    pub fn button_for(&self, focused: bool) -> Style {
        if focused {
            self.focused_button_style
        } else {
            self.button_style
        }
    }
}
