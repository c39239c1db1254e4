//! Main chat event loop
//!
//! Reads terminal events, turns them into actions, and runs completions
//! inline: while a reply streams in, each chunk is applied to the app and
//! the screen is redrawn before the next chunk is read.

pub mod keybindings;
pub mod lifecycle;

use std::{error::Error, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;
use tracing::{info, warn};

use self::keybindings::{map_key, map_mouse, map_paste};
use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::core::app::streaming::run_completion;
use crate::core::app::{apply_action, App, AppAction, AppActionContext, AppCommand, AppInitConfig};
use crate::core::provider::CompletionProvider;
use crate::ui::layout::{inner, split_chat, split_frame};
use crate::ui::renderer::ui;
use crate::ui::theme::Theme;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn action_context(terminal: &ChatTerminal) -> Result<AppActionContext, Box<dyn Error>> {
    let size = terminal.size()?;
    Ok(AppActionContext {
        term_width: size.width,
        term_height: size.height,
    })
}

/// Rows of transcript visible at once; PageUp/PageDown move by this much.
fn page_size(app: &App, ctx: AppActionContext) -> u16 {
    let frame = split_frame(Rect::new(0, 0, ctx.term_width, ctx.term_height));
    inner(split_chat(app, frame.main).transcript).height.max(1)
}

fn event_to_action(app: &App, event: Event, ctx: AppActionContext) -> Option<AppAction> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            map_key(app, key, page_size(app, ctx))
        }
        Event::Paste(text) => map_paste(app, text),
        Event::Mouse(mouse) if app.chat_visible() => map_mouse(mouse),
        _ => None,
    }
}

async fn event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    provider: &dyn CompletionProvider,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, app))?;
        if app.ui.exit_requested {
            return Ok(());
        }

        if !event::poll(POLL_INTERVAL)? {
            tokio::task::yield_now().await;
            continue;
        }

        let ctx = action_context(terminal)?;
        let Some(action) = event_to_action(app, event::read()?, ctx) else {
            continue;
        };

        if let Some(AppCommand::RunCompletion { history }) = apply_action(app, action, ctx) {
            // Show the user turn and "Thinking..." before the request goes out.
            terminal.draw(|f| ui(f, app))?;
            let mut redraw = |app: &App| {
                if let Err(err) = terminal.draw(|f| ui(f, app)) {
                    warn!(error = %err, "redraw during streaming failed");
                }
            };
            run_completion(app, provider, history, ctx, &mut redraw).await;
        }
    }
}

pub async fn run_chat(
    init: AppInitConfig,
    provider: &dyn CompletionProvider,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(init, Theme::dark_default());
    info!(model = %app.settings.model, temperature = %app.settings.temperature, "starting chat");

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, provider).await;
    restore_terminal(&mut terminal)?;

    info!(turns = app.message_count(), "chat ended");
    result
}
