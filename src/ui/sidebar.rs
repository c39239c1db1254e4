use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::{App, Focus};
use crate::core::settings::{ApiKey, Temperature};

const KEY_PLACEHOLDER: &str = "Paste or type your key";

/// Masked key trimmed from the left so the tail (where typing happens) stays visible.
pub fn masked_key_view(key: &ApiKey, width: u16) -> String {
    let masked = key.masked();
    let width = width as usize;
    if UnicodeWidthStr::width(masked.as_str()) <= width {
        return masked;
    }
    let keep = width.saturating_sub(1);
    let tail: String = masked
        .chars()
        .rev()
        .take(keep)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("…{tail}")
}

fn label(text: &'static str, app: &App) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(text, app.ui.theme.sidebar_label_style)))
}

fn button(text: &'static str, focused: bool, app: &App) -> Paragraph<'static> {
    let marker = if focused { "▶ " } else { "  " };
    Paragraph::new(Line::from(Span::styled(
        format!("{marker}[ {text} ]"),
        app.ui.theme.button_for(focused),
    )))
}

pub fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.ui.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_for(app.ui.focus.is_sidebar()))
        .title(Span::styled(
            "Configuration",
            theme.sidebar_label_style.add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // key label
            Constraint::Length(3), // key field
            Constraint::Length(1), // get key
            Constraint::Length(1),
            Constraint::Length(1), // model label
            Constraint::Length(1), // model value
            Constraint::Length(2), // model description
            Constraint::Length(1), // temperature label
            Constraint::Length(1), // gauge
            Constraint::Length(2), // temperature hint
            Constraint::Length(1), // clear
            Constraint::Min(0),
        ])
        .split(inner);

    let focus = app.ui.focus;

    f.render_widget(label("Gemini API Key", app), rows[0]);
    let key_focused = focus == Focus::ApiKey;
    let key_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_for(key_focused));
    let field = key_block.inner(rows[1]);
    let key_text = if app.settings.api_key.is_empty() {
        Span::styled(KEY_PLACEHOLDER, theme.sidebar_hint_style)
    } else {
        Span::styled(
            masked_key_view(&app.settings.api_key, field.width.saturating_sub(1)),
            theme.sidebar_value_style,
        )
    };
    f.render_widget(Paragraph::new(Line::from(key_text)).block(key_block), rows[1]);
    if key_focused {
        let shown = if app.settings.api_key.is_empty() {
            0
        } else {
            UnicodeWidthStr::width(
                masked_key_view(&app.settings.api_key, field.width.saturating_sub(1)).as_str(),
            ) as u16
        };
        f.set_cursor_position(Position::new(
            field.x + shown.min(field.width.saturating_sub(1)),
            field.y,
        ));
    }

    f.render_widget(
        button("Get API Key", focus == Focus::GetKeyButton, app),
        rows[2],
    );

    f.render_widget(label("Model", app), rows[4]);
    let model_focused = focus == Focus::Model;
    let model_style = if model_focused {
        theme.focused_button_style
    } else {
        theme.sidebar_value_style
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("◀ ", theme.sidebar_hint_style),
            Span::styled(app.settings.model.as_str(), model_style),
            Span::styled(" ▶", theme.sidebar_hint_style),
        ])),
        rows[5],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            app.settings.model.description(),
            theme.sidebar_hint_style,
        ))
        .wrap(Wrap { trim: true }),
        rows[6],
    );

    f.render_widget(label("Temperature", app), rows[7]);
    let temperature = app.settings.temperature;
    let ratio = f64::from(
        (temperature.value() - Temperature::MIN) / (Temperature::MAX - Temperature::MIN),
    );
    let gauge_label_style = if focus == Focus::Temperature {
        theme.focused_button_style
    } else {
        theme.sidebar_value_style
    };
    f.render_widget(
        LineGauge::default()
            .ratio(ratio.clamp(0.0, 1.0))
            .label(Span::styled(temperature.to_string(), gauge_label_style))
            .filled_style(theme.gauge_style)
            .unfilled_style(theme.sidebar_hint_style),
        rows[8],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "Higher values make output more random",
            theme.sidebar_hint_style,
        ))
        .wrap(Wrap { trim: true }),
        rows[9],
    );

    f.render_widget(
        button("Clear Chat History", focus == Focus::ClearButton, app),
        rows[10],
    );
}
