//! Frame geometry shared by the renderer and the scroll math.
//!
//! Both sides must agree on where the transcript lands and how tall its
//! wrapped content is, so every size is derived here.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use unicode_width::UnicodeWidthStr;

use crate::core::app::App;
use crate::ui::panels::{config_panel_lines, usage_tips_lines};
use crate::ui::transcript::build_transcript_lines;

pub const SIDEBAR_WIDTH: u16 = 34;
const MAX_INPUT_LINES: u16 = 5;
const MAX_NOTICE_LINES: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAreas {
    pub title: Rect,
    pub sidebar: Rect,
    pub main: Rect,
    pub footer: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatAreas {
    pub transcript: Rect,
    pub tips: Option<Rect>,
    pub config: Option<Rect>,
    pub notice: Option<Rect>,
    pub input: Rect,
}

/// Main area before an API key is entered: the welcome text takes the
/// place of the transcript and there is no input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingAreas {
    pub welcome: Rect,
    pub tips: Option<Rect>,
    pub config: Option<Rect>,
    pub notice: Option<Rect>,
}

pub fn split_frame(area: Rect) -> FrameAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let sidebar_width = if area.width < SIDEBAR_WIDTH * 2 {
        area.width / 3
    } else {
        SIDEBAR_WIDTH
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(rows[1]);

    FrameAreas {
        title: rows[0],
        sidebar: columns[0],
        main: columns[1],
        footer: rows[2],
    }
}

fn panel_heights(app: &App, width: u16) -> (u16, u16, u16) {
    let tips_height = if app.ui.show_tips {
        usage_tips_lines(&app.ui.theme).len() as u16 + 2
    } else {
        0
    };
    let config_height = if app.ui.show_config {
        config_panel_lines(app).len() as u16 + 2
    } else {
        0
    };
    let notice_height = app
        .ui
        .notice
        .as_ref()
        .map(|notice| (wrapped_rows(notice.text(), width) as u16).clamp(1, MAX_NOTICE_LINES))
        .unwrap_or(0);
    (tips_height, config_height, notice_height)
}

pub fn split_chat(app: &App, main: Rect) -> ChatAreas {
    let (tips_height, config_height, notice_height) = panel_heights(app, main.width);
    let input_height = (app.ui.input_line_count() as u16).min(MAX_INPUT_LINES) + 2;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(tips_height),
            Constraint::Length(config_height),
            Constraint::Length(notice_height),
            Constraint::Length(input_height),
        ])
        .split(main);

    ChatAreas {
        transcript: rows[0],
        tips: (tips_height > 0).then_some(rows[1]),
        config: (config_height > 0).then_some(rows[2]),
        notice: (notice_height > 0).then_some(rows[3]),
        input: rows[4],
    }
}

pub fn split_onboarding(app: &App, main: Rect) -> OnboardingAreas {
    let (tips_height, config_height, notice_height) = panel_heights(app, main.width);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(tips_height),
            Constraint::Length(config_height),
            Constraint::Length(notice_height),
        ])
        .split(main);

    OnboardingAreas {
        welcome: rows[0],
        tips: (tips_height > 0).then_some(rows[1]),
        config: (config_height > 0).then_some(rows[2]),
        notice: (notice_height > 0).then_some(rows[3]),
    }
}

/// Area inside a one-cell border.
pub fn inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

/// Rows a single line of text occupies under greedy word wrapping.
pub fn wrapped_rows(text: &str, width: u16) -> usize {
    let width = width as usize;
    if width == 0 {
        return 0;
    }

    let mut rows = 1usize;
    let mut col = 0usize;
    for word in text.split(' ') {
        let w = UnicodeWidthStr::width(word);
        if col > 0 && col + 1 + w <= width {
            col += 1 + w;
            continue;
        }
        if col > 0 {
            rows += 1;
        }
        if w > width {
            rows += (w - 1) / width;
            col = (w - 1) % width + 1;
        } else {
            col = w;
        }
    }
    rows
}

pub fn wrapped_line_count(lines: &[Line<'_>], width: u16) -> usize {
    lines
        .iter()
        .map(|line| {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            wrapped_rows(&text, width)
        })
        .sum()
}

/// Largest useful `scroll_from_bottom` for the given terminal size.
pub fn max_scroll(app: &App, term_width: u16, term_height: u16) -> u16 {
    let frame = split_frame(Rect::new(0, 0, term_width, term_height));
    let chat = split_chat(app, frame.main);
    let area = inner(chat.transcript);
    let lines = build_transcript_lines(
        app.session.conversation().turns(),
        app.ui.pending_response.as_deref(),
        &app.ui.theme,
    );
    let total = wrapped_line_count(&lines, area.width);
    total.saturating_sub(area.height as usize).min(u16::MAX as usize) as u16
}
