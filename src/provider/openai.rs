//! OpenAI-compatible streaming completion client.
//!
//! Works against any endpoint that speaks the OpenAI chat completions
//! protocol: the official API, OpenRouter, or local LLMs via LM Studio,
//! Ollama and friends. Each debate role gets its own client instance, so the
//! two sides can run on entirely different endpoints and models.

use super::error::{ProviderError, Result};
use super::r#trait::{CompletionClient, FragmentStream};
use super::tokens::estimate_tokens;
use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Streaming client for one OpenAI-compatible endpoint.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

impl OpenAiClient {
    /// Create a client for the given endpoint.
    ///
    /// `base_url` and `model` fall back to the official API and the baseline
    /// model when unset.
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client,
        }
    }

    /// Model identifier this client submits.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Build request headers.
    fn headers(&self) -> Result<reqwest::header::HeaderMap> {
        let mut headers = reqwest::header::HeaderMap::new();

        // Sanitize API key: trim whitespace/newlines that may have leaked from input
        let clean_key = self.api_key.trim();
        if !clean_key.is_empty() {
            let header_value: reqwest::header::HeaderValue =
                format!("Bearer {}", clean_key).parse().map_err(|_| {
                    tracing::error!(
                        "API key contains invalid characters (length={})",
                        clean_key.len()
                    );
                    ProviderError::InvalidApiKey
                })?;
            headers.insert(reqwest::header::AUTHORIZATION, header_value);
        }

        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().expect("valid content-type"),
        );

        Ok(headers)
    }

    /// Turn a non-success response into a `ProviderError`.
    async fn handle_error(&self, response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();

        let message = match response.json::<ApiErrorResponse>().await {
            Ok(body) => body.error.message,
            Err(_) => "Unknown error".to_string(),
        };

        if status == 429 {
            ProviderError::RateLimited(message)
        } else {
            ProviderError::Api { status, message }
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn count_tokens(&self, text: &str) -> u32 {
        estimate_tokens(text)
    }

    async fn stream_complete(&self, instruction: &str, content: &str) -> Result<FragmentStream> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: instruction,
                },
                ChatMessage {
                    role: "user",
                    content,
                },
            ],
            temperature: DEFAULT_TEMPERATURE,
            stream: true,
        };

        tracing::info!(
            "Streaming request: model={}, url={}, instruction={} chars, content={} chars",
            self.model,
            self.chat_url(),
            instruction.len(),
            content.len()
        );

        let response = self
            .client
            .post(self.chat_url())
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        tracing::debug!("Response status: {}", response.status());

        if !response.status().is_success() {
            return Err(self.handle_error(response).await);
        }

        // Parse the Server-Sent Events stream. Chunk boundaries do not align
        // with line boundaries, so carry a partial line across chunks.
        let byte_stream = response.bytes_stream();
        let buffer = Arc::new(Mutex::new(String::new()));
        // Some providers (LM Studio, MiniMax) put the full text in the final
        // chunk's `message` field while `delta` is absent. Once we have seen
        // real delta content we must ignore `message` or the whole response
        // would be emitted twice.
        let seen_delta = Arc::new(Mutex::new(false));

        let fragment_stream = byte_stream
            .map(move |chunk_result| -> Vec<Result<String>> {
                let chunk = match chunk_result {
                    Ok(chunk) => chunk,
                    Err(e) => return vec![Err(ProviderError::Stream(e.to_string()))],
                };

                let mut buf = buffer.lock().expect("SSE buffer lock poisoned");
                buf.push_str(&String::from_utf8_lossy(&chunk));

                let mut fragments = Vec::new();

                // Process complete lines (terminated by \n)
                while let Some(newline_pos) = buf.find('\n') {
                    let line = buf[..newline_pos].trim().to_string();
                    buf.drain(..=newline_pos);

                    let Some(json_str) = line.strip_prefix("data: ") else {
                        continue;
                    };
                    if json_str == "[DONE]" {
                        continue;
                    }

                    let parsed: StreamChunk = match serde_json::from_str(json_str) {
                        Ok(parsed) => parsed,
                        Err(e) => {
                            tracing::debug!("Skipping unparseable SSE line: {}", e);
                            continue;
                        }
                    };

                    let Some(choice) = parsed.choices.first() else {
                        continue;
                    };

                    let mut seen = seen_delta.lock().expect("SSE state lock poisoned");
                    let text = match choice.delta.as_ref().and_then(|d| d.content.clone()) {
                        Some(delta_text) => {
                            if !delta_text.is_empty() {
                                *seen = true;
                            }
                            Some(delta_text)
                        }
                        None if !*seen => choice
                            .message
                            .as_ref()
                            .and_then(|m| m.content.clone()),
                        None => None,
                    };

                    if let Some(text) = text
                        && !text.is_empty()
                    {
                        fragments.push(Ok(text));
                    }
                }

                fragments
            })
            .flat_map(futures::stream::iter);

        Ok(Box::pin(fragment_stream))
    }
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Option<StreamDelta>,
    message: Option<StreamDelta>,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_url_handles_trailing_slash() {
        let client = OpenAiClient::new(
            "sk-test".to_string(),
            Some("https://example.com/v1/".to_string()),
            None,
        );
        assert_eq!(client.chat_url(), "https://example.com/v1/chat/completions");
    }

    #[test]
    fn defaults_applied_when_unset() {
        let client = OpenAiClient::new("sk-test".to_string(), None, None);
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert_eq!(
            client.chat_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn stream_chunk_parses_delta_content() {
        let json = r#"{"id":"x","choices":[{"delta":{"content":"Hello"},"finish_reason":null}]}"#;
        let chunk: StreamChunk = serde_json::from_str(json).unwrap();
        let delta = chunk.choices[0].delta.as_ref().unwrap();
        assert_eq!(delta.content.as_deref(), Some("Hello"));
    }

    #[test]
    fn stream_chunk_tolerates_missing_fields() {
        let chunk: StreamChunk = serde_json::from_str(r#"{"object":"chat.completion.chunk"}"#).unwrap();
        assert!(chunk.choices.is_empty());
    }
}
