use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::app::App;
use crate::ui::layout::{inner, split_chat, split_frame, split_onboarding, wrapped_line_count};
use crate::ui::panels::{config_panel_lines, onboarding_lines, usage_tips_lines};
use crate::ui::sidebar::render_sidebar;
use crate::ui::transcript::build_transcript_lines;
use crate::utils::version::build_version;

pub const TITLE: &str = "Gemini Chatbot";

fn title_text(app: &App) -> String {
    format!(
        "{} {} • {} • temperature {}",
        TITLE,
        build_version(),
        app.settings.model,
        app.settings.temperature
    )
}

fn footer_text(app: &App) -> &'static str {
    if app.ui.is_waiting() {
        "Waiting for Gemini... • Ctrl+C quit"
    } else if app.chat_visible() {
        "Tab focus • PgUp/PgDn scroll • F1 tips • F2 config • Esc dismiss • Ctrl+C quit"
    } else {
        "Tab focus • F1 tips • F2 config • Ctrl+C quit • Powered by Google Gemini"
    }
}

pub fn ui(f: &mut Frame, app: &App) {
    let theme = &app.ui.theme;
    let frame = split_frame(f.area());

    f.render_widget(
        Paragraph::new(Span::styled(title_text(app), theme.title_style)),
        frame.title,
    );

    render_sidebar(f, frame.sidebar, app);

    if app.chat_visible() {
        render_chat(f, frame.main, app);
    } else {
        render_onboarding(f, frame.main, app);
    }

    f.render_widget(
        Paragraph::new(Span::styled(footer_text(app), theme.footer_style)),
        frame.footer,
    );
}

fn render_onboarding(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.ui.theme;
    let areas = split_onboarding(app, area);
    f.render_widget(
        Paragraph::new(onboarding_lines(theme))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.panel_border_style)
                    .title(Span::styled("Welcome", theme.heading_style)),
            )
            .wrap(Wrap { trim: false }),
        areas.welcome,
    );
    render_side_panels(f, app, areas.tips, areas.config, areas.notice);
}

/// Tips, configuration and notice rows shared by both main views.
fn render_side_panels(
    f: &mut Frame,
    app: &App,
    tips: Option<Rect>,
    config: Option<Rect>,
    notice: Option<Rect>,
) {
    let theme = &app.ui.theme;
    if let Some(tips) = tips {
        render_panel(f, tips, "Usage Tips", usage_tips_lines(theme), app);
    }
    if let Some(config) = config {
        render_panel(
            f,
            config,
            "Current Configuration",
            config_panel_lines(app),
            app,
        );
    }
    if let (Some(area), Some(notice)) = (notice, app.ui.notice.as_ref()) {
        let style = if notice.is_error() {
            theme.error_style
        } else {
            theme.info_style
        };
        f.render_widget(
            Paragraph::new(Span::styled(notice.text().to_string(), style))
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

fn render_panel(
    f: &mut Frame,
    area: Rect,
    title: &'static str,
    lines: Vec<Line<'static>>,
    app: &App,
) {
    let theme = &app.ui.theme;
    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.panel_border_style)
                    .title(Span::styled(title, theme.sidebar_label_style)),
            )
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_chat(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.ui.theme;
    let chat = split_chat(app, area);

    let lines = build_transcript_lines(
        app.session.conversation().turns(),
        app.ui.pending_response.as_deref(),
        theme,
    );
    let view = inner(chat.transcript);
    let total = wrapped_line_count(&lines, view.width);
    let max = total.saturating_sub(view.height as usize).min(u16::MAX as usize) as u16;
    let offset = max - app.ui.scroll_from_bottom.min(max);

    let title = if app.ui.scroll_from_bottom > 0 {
        format!(
            "Chat ({} lines above the latest)",
            app.ui.scroll_from_bottom.min(max)
        )
    } else {
        "Chat".to_string()
    };

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.panel_border_style)
                    .title(Span::styled(title, theme.heading_style)),
            )
            .wrap(Wrap { trim: false })
            .scroll((offset, 0)),
        chat.transcript,
    );

    render_side_panels(f, app, chat.tips, chat.config, chat.notice);

    f.render_widget(&app.ui.styled_textarea(), chat.input);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn onboarding_replaces_chat_without_key() {
        let app = App::new_test();
        let screen = render(&app, 120, 40);
        assert!(screen.contains(TITLE));
        assert!(screen.contains("How to get started"));
        assert!(!screen.contains("Message (Enter to send"));
    }

    #[test]
    fn chat_panel_appears_once_key_entered() {
        let mut app = App::new_test_with_key("secret-key");
        app.session.begin_turn("hello").unwrap();
        app.session.finish_turn(Ok("Hi there".into())).unwrap();

        let screen = render(&app, 120, 40);
        assert!(!screen.contains("How to get started"));
        assert!(screen.contains("You: hello"));
        assert!(screen.contains("Hi there"));
        assert!(screen.contains("Message (Enter to send"));
        assert!(!screen.contains("secret-key"));
    }

    #[test]
    fn thinking_indicator_while_waiting() {
        let mut app = App::new_test_with_key("k");
        app.session.begin_turn("hello").unwrap();
        app.ui.pending_response = Some(String::new());
        let screen = render(&app, 120, 40);
        assert!(screen.contains("Thinking..."));
    }

    #[test]
    fn error_notice_is_shown() {
        let mut app = App::new_test_with_key("k");
        app.ui.set_error("Error generating response: HTTP 400: bad key");
        let screen = render(&app, 120, 40);
        assert!(screen.contains("HTTP 400: bad key"));
    }

    #[test]
    fn config_panel_reports_settings() {
        let mut app = App::new_test_with_key("k");
        app.ui.show_config = true;
        let screen = render(&app, 120, 40);
        assert!(screen.contains("Current Configuration"));
        assert!(screen.contains("Messages in conversation: 0"));
    }

    #[test]
    fn onboarding_shows_config_panel_and_key_link() {
        let mut app = App::new_test();
        app.ui.show_config = true;
        app.ui.set_info("Get your free Gemini API key here");
        let screen = render(&app, 120, 40);
        assert!(screen.contains("How to get started"));
        assert!(screen.contains("Current Configuration"));
        assert!(screen.contains("Messages in conversation: 0"));
        assert!(screen.contains("Get your free Gemini API key here"));
    }
}
