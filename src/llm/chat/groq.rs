use async_trait::async_trait;
use futures::StreamExt;
use log::{ debug, info, warn };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::Serialize;
use url::Url;

use super::sse::{ self, LineBuffer, SseEvent };
use super::{ create_streaming_response, ChatClient, FragmentSender, FragmentStream };
use crate::llm::{ LlmConfig, ProviderError, DEFAULT_BASE_URL, DEFAULT_MODEL };
use crate::models::chat::ConversationMessage;

pub struct GroqChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct GroqRequest<'a> {
    messages: &'a [ConversationMessage],
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

impl GroqChatClient {
    pub fn new(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
        temperature: f32,
        max_tokens: u32
    ) -> Result<Self, ProviderError> {
        let chat_model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = Url::parse(&api_url).map_err(|e|
            ProviderError::Config(format!("Invalid base URL '{}': {}", api_url, e))
        )?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProviderError::Config(format!("Unsupported base URL scheme '{}'", parsed.scheme())));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match api_key.filter(|key| !key.is_empty()) {
            Some(key) => {
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|e|
                        ProviderError::Config(format!("Invalid API key format: {}", e))
                    )?
                );
            }
            None => warn!("No Groq API key configured; provider calls will be unauthenticated"),
        }

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        Ok(Self {
            http,
            model: chat_model,
            base_url: api_url,
            temperature,
            max_tokens,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        Self::new(
            config.api_key.clone(),
            config.completion_model.clone(),
            config.base_url.clone(),
            config.temperature,
            config.max_tokens
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn stream_chat(
        &self,
        messages: &[ConversationMessage]
    ) -> Result<FragmentStream, ProviderError> {
        let url = self.completions_url();
        let req = GroqRequest {
            messages,
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: true,
        };

        info!("Starting Groq stream request to {} ({} messages)", url, messages.len());

        let resp = self.http.post(&url).json(&req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status: status.as_u16(), message });
        }

        Ok(create_streaming_response(move |tx| relay_body(resp, tx)))
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}

/// Forwards every text delta of an SSE body until `[DONE]`, end of body, or
/// the receiver going away.
async fn relay_body(resp: reqwest::Response, tx: FragmentSender) {
    let mut body = resp.bytes_stream();
    let mut lines = LineBuffer::new();

    loop {
        let chunk_result = tokio::select! {
            _ = tx.closed() => {
                debug!("Fragment receiver dropped, abandoning Groq stream");
                return;
            }
            next = body.next() => match next {
                Some(result) => result,
                None => break,
            },
        };
        let chunk = match chunk_result {
            Ok(chunk) => chunk,
            Err(e) => {
                let _ = tx.send(Err(ProviderError::from(e))).await;
                return;
            }
        };
        debug!("Groq raw chunk: {} bytes", chunk.len());

        let complete = match lines.push(&chunk) {
            Ok(complete) => complete,
            Err(e) => {
                let _ = tx.send(Err(e)).await;
                return;
            }
        };
        for line in complete {
            if !forward_line(&line, &tx).await {
                return;
            }
        }
    }

    if let Some(line) = lines.finish() {
        forward_line(&line, &tx).await;
    }
}

/// Returns `false` once the stream should stop.
async fn forward_line(line: &str, tx: &FragmentSender) -> bool {
    match sse::parse_line(line) {
        Ok(Some(SseEvent::Text(content))) => tx.send(Ok(content)).await.is_ok(),
        Ok(Some(SseEvent::Done)) => false,
        Ok(None) => true,
        Err(e) => {
            let _ = tx.send(Err(e)).await;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let client = GroqChatClient::from_config(&LlmConfig::default()).unwrap();
        assert_eq!(client.get_model(), DEFAULT_MODEL);
        assert_eq!(client.completions_url(), "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(client.temperature, 0.7);
        assert_eq!(client.max_tokens, 4096);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = GroqChatClient::new(
            Some("key".into()),
            Some("m".into()),
            Some("http://localhost:9000/v1/".into()),
            0.7,
            16
        ).unwrap();
        assert_eq!(client.completions_url(), "http://localhost:9000/v1/chat/completions");
        assert_eq!(client.get_base_url().as_deref(), Some("http://localhost:9000/v1/"));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let result = GroqChatClient::new(None, None, Some("api.groq.com".into()), 0.7, 16);
        assert!(matches!(result, Err(ProviderError::Config(_))));
        let result = GroqChatClient::new(None, None, Some("ftp://api.groq.com".into()), 0.7, 16);
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }

    #[test]
    fn test_rejects_unprintable_key() {
        let result = GroqChatClient::new(Some("bad\nkey".into()), None, None, 0.7, 16);
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }

    #[test]
    fn test_request_shape() {
        let messages = vec![ConversationMessage::system("sys"), ConversationMessage::user("hi")];
        let req = GroqRequest {
            messages: &messages,
            model: DEFAULT_MODEL,
            temperature: 0.7,
            max_tokens: 4096,
            stream: true,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }
}
