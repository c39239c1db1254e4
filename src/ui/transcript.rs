use ratatui::text::{Line, Span};

use crate::core::message::{Role, Turn};
use crate::ui::markdown::render_markdown;
use crate::ui::theme::Theme;

pub const USER_PREFIX: &str = "You: ";
pub const THINKING: &str = "Thinking...";

fn push_user_lines(lines: &mut Vec<Line<'static>>, text: &str, theme: &Theme) {
    let indent = " ".repeat(USER_PREFIX.len());
    for (i, content_line) in text.lines().enumerate() {
        let prefix = if i == 0 {
            Span::styled(USER_PREFIX, theme.user_prefix_style)
        } else {
            Span::raw(indent.clone())
        };
        lines.push(Line::from(vec![
            prefix,
            Span::styled(content_line.to_string(), theme.user_text_style),
        ]));
    }
}

/// Flatten the conversation, plus any in-flight reply, into display lines.
pub fn build_transcript_lines(
    turns: &[Turn],
    pending: Option<&str>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for turn in turns {
        match turn.role() {
            Role::User => push_user_lines(&mut lines, turn.text(), theme),
            Role::Assistant => lines.extend(render_markdown(turn.text(), theme)),
        }
        lines.push(Line::default());
    }

    match pending {
        Some("") => {
            lines.push(Line::from(Span::styled(THINKING, theme.thinking_indicator_style)));
        }
        Some(partial) => {
            lines.extend(render_markdown(partial, theme));
            lines.push(Line::from(Span::styled("▌", theme.thinking_indicator_style)));
        }
        None => {}
    }

    lines
}
