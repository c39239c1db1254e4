//! Caller-owned chat session: the conversation store plus the per-turn flow
//! of the completion bridge.
//!
//! A turn is split into [`ChatSession::begin_turn`] and
//! [`ChatSession::finish_turn`] so the event loop can redraw while the
//! provider streams, with [`ChatSession::submit`] tying the two together.

use std::error::Error as StdError;
use std::fmt;

use tracing::{debug, warn};

use crate::core::conversation::Conversation;
use crate::core::message::Turn;
use crate::core::provider::{CompletionProvider, ProviderError};
use crate::core::settings::ChatSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// No API key was entered; the provider was not contacted.
    MissingApiKey,
    /// The input was empty after trimming.
    EmptyInput,
    Provider(ProviderError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::MissingApiKey => {
                f.write_str("Enter your Gemini API key to start chatting")
            }
            SubmitError::EmptyInput => f.write_str("Cannot send an empty message"),
            SubmitError::Provider(err) => write!(f, "Error generating response: {err}"),
        }
    }
}

impl StdError for SubmitError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SubmitError::Provider(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProviderError> for SubmitError {
    fn from(value: ProviderError) -> Self {
        SubmitError::Provider(value)
    }
}

#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Conversation,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn clear(&mut self) {
        debug!(turns = self.conversation.len(), "clearing conversation");
        self.conversation.clear();
    }

    /// Record the user's turn and return the history to send, ending with it.
    pub fn begin_turn(&mut self, text: &str) -> Result<Vec<Turn>, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        self.conversation.append(Turn::user(text));
        Ok(self.conversation.snapshot())
    }

    /// Append the assistant's reply, or leave the store untouched on failure.
    pub fn finish_turn(
        &mut self,
        result: Result<String, ProviderError>,
    ) -> Result<&Turn, ProviderError> {
        match result {
            Ok(text) => {
                self.conversation.append(Turn::assistant(text));
                let turn = self
                    .conversation
                    .last()
                    .ok_or(ProviderError::EmptyResponse)?;
                Ok(turn)
            }
            Err(err) => {
                warn!(error = %err, "completion failed");
                Err(err)
            }
        }
    }

    pub async fn submit(
        &mut self,
        text: &str,
        settings: &ChatSettings,
        provider: &dyn CompletionProvider,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<&Turn, SubmitError> {
        if !settings.has_api_key() {
            return Err(SubmitError::MissingApiKey);
        }
        let history = self.begin_turn(text)?;
        let result = provider.complete(&history, settings, on_chunk).await;
        Ok(self.finish_turn(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;
    use crate::core::settings::{ApiKey, Model, Temperature};
    use crate::utils::test_utils::{test_settings, StubProvider};

    fn ignore_chunks() -> impl FnMut(&str) + Send {
        |_: &str| {}
    }

    #[tokio::test]
    async fn ping_yields_pong() {
        let provider = StubProvider::replying(|history| {
            match history.last().map(Turn::text) {
                Some("ping") => Ok("pong".to_string()),
                other => Ok(format!("unexpected {other:?}")),
            }
        });
        let settings = ChatSettings::new(
            ApiKey::new("key"),
            Model::Gemini15Flash,
            Temperature::new(0.0),
        );
        let mut session = ChatSession::new();

        session
            .submit("ping", &settings, &provider, &mut ignore_chunks())
            .await
            .unwrap();

        assert_eq!(
            session.conversation().turns(),
            &[Turn::user("ping"), Turn::assistant("pong")]
        );
    }

    #[tokio::test]
    async fn n_successful_turns_store_two_n_in_order() {
        let provider = StubProvider::echo();
        let settings = test_settings();
        let mut session = ChatSession::new();

        for i in 0..5 {
            session
                .submit(&format!("msg {i}"), &settings, &provider, &mut ignore_chunks())
                .await
                .unwrap();
        }

        let turns = session.conversation().turns();
        assert_eq!(turns.len(), 10);
        for (i, pair) in turns.chunks(2).enumerate() {
            assert_eq!(pair[0], Turn::user(format!("msg {i}")));
            assert_eq!(pair[1].role(), Role::Assistant);
            assert_eq!(pair[1].text(), format!("echo: msg {i}"));
        }
    }

    #[tokio::test]
    async fn provider_receives_full_history_with_new_turn_once() {
        let provider = StubProvider::echo();
        let settings = test_settings();
        let mut session = ChatSession::new();

        for text in ["first", "second"] {
            session
                .submit(text, &settings, &provider, &mut ignore_chunks())
                .await
                .unwrap();
        }

        let seen = provider.histories();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], vec![Turn::user("first")]);
        assert_eq!(
            seen[1],
            vec![
                Turn::user("first"),
                Turn::assistant("echo: first"),
                Turn::user("second"),
            ]
        );
    }

    #[tokio::test]
    async fn failure_leaves_user_turn_without_reply() {
        let provider = StubProvider::replying(|history| {
            if history.last().map(Turn::text) == Some("boom") {
                Err(ProviderError::Api {
                    status: 403,
                    message: "quota".into(),
                })
            } else {
                Ok("ok".into())
            }
        });
        let settings = test_settings();
        let mut session = ChatSession::new();

        for text in ["a", "b"] {
            session
                .submit(text, &settings, &provider, &mut ignore_chunks())
                .await
                .unwrap();
        }
        let before = session.conversation().snapshot();

        let err = session
            .submit("boom", &settings, &provider, &mut ignore_chunks())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmitError::Provider(ProviderError::Api {
                status: 403,
                message: "quota".into()
            })
        );
        let turns = session.conversation().turns();
        assert_eq!(turns.len(), 5);
        assert_eq!(&turns[..4], before.as_slice());
        assert_eq!(turns[4], Turn::user("boom"));
    }

    #[tokio::test]
    async fn empty_api_key_never_invokes_provider() {
        let provider = StubProvider::echo();
        let mut session = ChatSession::new();

        for key in ["", "   "] {
            let settings =
                ChatSettings::new(ApiKey::new(key), Model::default(), Temperature::default());
            let err = session
                .submit("hello", &settings, &provider, &mut ignore_chunks())
                .await
                .unwrap_err();
            assert_eq!(err, SubmitError::MissingApiKey);
        }

        assert_eq!(provider.calls(), 0);
        assert!(session.conversation().is_empty());
    }

    #[tokio::test]
    async fn blank_input_is_rejected_before_the_store() {
        let provider = StubProvider::echo();
        let mut session = ChatSession::new();

        let err = session
            .submit(" \n ", &test_settings(), &provider, &mut ignore_chunks())
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::EmptyInput);
        assert_eq!(provider.calls(), 0);
        assert!(session.conversation().is_empty());
    }

    #[tokio::test]
    async fn streamed_chunks_reach_the_callback() {
        let provider = StubProvider::chunked(vec!["po", "ng"]);
        let mut session = ChatSession::new();
        let mut seen = String::new();

        let turn = session
            .submit("ping", &test_settings(), &provider, &mut |chunk: &str| seen.push_str(chunk))
            .await
            .unwrap();

        assert_eq!(turn.text(), "pong");
        assert_eq!(seen, "pong");
    }

    #[tokio::test]
    async fn clear_after_turns_empties_the_store() {
        let provider = StubProvider::echo();
        let mut session = ChatSession::new();
        session.submit("x", &test_settings(), &provider, &mut ignore_chunks()).await.unwrap();

        session.clear();

        assert!(session.conversation().is_empty());
    }
}
