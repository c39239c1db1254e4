use async_trait::async_trait;
use futures_util::StreamExt;
use memchr::memchr;
use tracing::{debug, warn};

use crate::api::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::core::message::Turn;
use crate::core::provider::{CompletionProvider, ProviderError};
use crate::core::settings::ChatSettings;
use crate::utils::url::construct_api_url;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Streams completions from the Gemini REST API.
#[derive(Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn stream_url(&self, model: &str) -> String {
        construct_api_url(
            &self.base_url,
            &format!("models/{model}:streamGenerateContent?alt=sse"),
        )
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

pub fn build_request(history: &[Turn], settings: &ChatSettings) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: history.iter().map(Content::from).collect(),
        generation_config: GenerationConfig {
            temperature: settings.temperature.value(),
        },
    }
}

fn extract_data_payload(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(str::trim_start)
}

/// Decode one SSE `data:` payload into the text fragment it carries.
fn parse_payload(payload: &str) -> Result<Option<String>, ProviderError> {
    if payload.trim().is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| ProviderError::Malformed(format!("{e}: {payload}")))?;

    if value.get("error").is_some() {
        let status = value
            .pointer("/error/code")
            .and_then(|code| code.as_u64())
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(0);
        return Err(ProviderError::Api {
            status,
            message: format_api_error(payload),
        });
    }

    let response: GenerateContentResponse = serde_json::from_value(value)
        .map_err(|e| ProviderError::Malformed(e.to_string()))?;

    if let Some(reason) = response.block_reason() {
        return Err(ProviderError::Blocked(reason.to_string()));
    }

    match response.text() {
        Some(text) => Ok(Some(text)),
        None => match response
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
        {
            Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                Err(ProviderError::Blocked(reason.to_string()))
            }
            _ => Ok(None),
        },
    }
}

/// Feed one SSE line, appending any text to `accumulated`.
fn process_sse_line(
    line: &str,
    accumulated: &mut String,
    on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
) -> Result<(), ProviderError> {
    let Some(payload) = extract_data_payload(line) else {
        return Ok(());
    };

    if let Some(text) = parse_payload(payload)? {
        if !text.is_empty() {
            on_chunk(&text);
            accumulated.push_str(&text);
        }
    }
    Ok(())
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .or_else(|| {
            // Some gateways wrap the payload in a one-element array.
            value
                .as_array()
                .and_then(|items| items.first())
                .and_then(extract_error_summary)
        });

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Reduce an error body to the message a user can act on.
pub fn format_api_error(error_text: &str) -> String {
    let trimmed = error_text.trim();

    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(summary) = extract_error_summary(&json_value) {
            if !summary.is_empty() {
                return summary;
            }
        }
    }

    trimmed.to_string()
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(
        &self,
        history: &[Turn],
        settings: &ChatSettings,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<String, ProviderError> {
        let model = settings.model.as_str();
        let request = build_request(history, settings);
        debug!(
            model,
            temperature = settings.temperature.value(),
            turns = history.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(self.stream_url(model))
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", settings.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            warn!(status = status.as_u16(), "completion request rejected");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: format_api_error(&error_text),
            });
        }

        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut accumulated = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk_bytes = chunk.map_err(|e| ProviderError::Network(e.to_string()))?;
            buffer.extend_from_slice(&chunk_bytes);

            while let Some(newline_pos) = memchr(b'\n', &buffer) {
                let line = String::from_utf8_lossy(&buffer[..newline_pos]).trim().to_string();
                buffer.drain(..=newline_pos);
                process_sse_line(&line, &mut accumulated, on_chunk)?;
            }
        }

        if !buffer.is_empty() {
            let line = String::from_utf8_lossy(&buffer).trim().to_string();
            process_sse_line(&line, &mut accumulated, on_chunk)?;
        }

        debug!(chars = accumulated.len(), "completion stream finished");

        if accumulated.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(accumulated)
    }
}
