#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use crate::core::message::Turn;
#[cfg(test)]
use crate::core::provider::{CompletionProvider, ProviderError};
#[cfg(test)]
use crate::core::settings::{ApiKey, ChatSettings, Model, Temperature};

#[cfg(test)]
type ReplyFn = dyn Fn(&[Turn]) -> Result<String, ProviderError> + Send + Sync;

/// Deterministic provider that records every history it is asked to complete.
#[cfg(test)]
pub struct StubProvider {
    reply: Box<ReplyFn>,
    chunks: Option<Vec<String>>,
    histories: Mutex<Vec<Vec<Turn>>>,
}

#[cfg(test)]
impl StubProvider {
    pub fn replying<F>(reply: F) -> Self
    where
        F: Fn(&[Turn]) -> Result<String, ProviderError> + Send + Sync + 'static,
    {
        Self {
            reply: Box::new(reply),
            chunks: None,
            histories: Mutex::new(Vec::new()),
        }
    }

    /// Replies with `echo: <last user text>`.
    pub fn echo() -> Self {
        Self::replying(|history| {
            let last = history.last().map(Turn::text).unwrap_or_default();
            Ok(format!("echo: {last}"))
        })
    }

    pub fn failing(err: ProviderError) -> Self {
        Self::replying(move |_| Err(err.clone()))
    }

    /// Streams the given fragments one by one.
    pub fn chunked(chunks: Vec<&str>) -> Self {
        let joined: String = chunks.concat();
        let mut stub = Self::replying(move |_| Ok(joined.clone()));
        stub.chunks = Some(chunks.into_iter().map(str::to_string).collect());
        stub
    }

    pub fn calls(&self) -> usize {
        self.histories.lock().unwrap().len()
    }

    pub fn histories(&self) -> Vec<Vec<Turn>> {
        self.histories.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(
        &self,
        history: &[Turn],
        _settings: &ChatSettings,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<String, ProviderError> {
        self.histories.lock().unwrap().push(history.to_vec());
        let text = (self.reply)(history)?;
        match &self.chunks {
            Some(chunks) => chunks.iter().for_each(|chunk| on_chunk(chunk)),
            None => on_chunk(&text),
        }
        Ok(text)
    }
}

#[cfg(test)]
pub fn test_settings() -> ChatSettings {
    ChatSettings::new(ApiKey::new("test-key"), Model::default(), Temperature::default())
}

#[cfg(test)]
pub fn create_test_turns() -> Vec<Turn> {
    vec![
        Turn::user("Hello"),
        Turn::assistant("Hi there!"),
        Turn::user("How are you?"),
        Turn::assistant("I'm doing **well**, thank you for asking!"),
    ]
}
