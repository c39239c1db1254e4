//! Runs one completion against the app: streamed chunks land in the pending
//! reply, and the final result is recorded through `CompletionFinished`.

use tracing::debug;

use super::{apply_action, App, AppAction, AppActionContext};
use crate::core::message::Turn;
use crate::core::provider::CompletionProvider;

/// Complete `history` (as returned by `AppCommand::RunCompletion`).
///
/// `redraw` is called after every chunk so the caller can repaint while the
/// provider is still streaming.
pub async fn run_completion(
    app: &mut App,
    provider: &dyn CompletionProvider,
    history: Vec<Turn>,
    ctx: AppActionContext,
    redraw: &mut (dyn for<'a> FnMut(&'a App) + Send),
) {
    let settings = app.settings.clone();
    debug!(turns = history.len(), model = %settings.model, "requesting completion");

    let result = {
        let mut on_chunk = |chunk: &str| {
            apply_action(
                app,
                AppAction::AppendResponseChunk {
                    content: chunk.to_string(),
                },
                ctx,
            );
            redraw(app);
        };
        provider.complete(&history, &settings, &mut on_chunk).await
    };

    apply_action(app, AppAction::CompletionFinished { result }, ctx);
}
