//! OpenAI-compatible chat completion (Hugging Face router by default).

use std::fmt;
use std::time::Duration;

use breeze_config::ChatConfig;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::FetchError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Outcome of one chat turn. `Display` gives the text shown to the user and
/// stored in chat history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Answer(String),
    /// 200 OK without usable content.
    Empty,
    /// 503: the hosted model is still loading.
    Loading,
    /// 429
    RateLimited,
    /// 401
    Unauthorized,
    Failed(FetchError),
}

impl ChatReply {
    pub fn is_answer(&self) -> bool {
        matches!(self, ChatReply::Answer(_))
    }
}

impl fmt::Display for ChatReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatReply::Answer(text) => f.write_str(text),
            ChatReply::Empty => f.write_str("No response from AI."),
            ChatReply::Loading => f.write_str("AI is loading, wait 30 seconds and try again."),
            ChatReply::RateLimited => f.write_str("Too many requests. Slow down."),
            ChatReply::Unauthorized => f.write_str("Invalid token."),
            ChatReply::Failed(FetchError::Status { status, body }) => {
                write!(f, "HTTP {status}: {body}")
            }
            ChatReply::Failed(FetchError::Malformed(e)) => {
                write!(f, "Response format error: {e}. Try again.")
            }
            ChatReply::Failed(FetchError::Network(e)) => write!(f, "Connection error: {e}"),
            ChatReply::Failed(FetchError::NoData) => f.write_str("No response from AI."),
        }
    }
}

pub struct ChatClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
}

impl ChatClient {
    /// `api_key` is sent as a bearer token when present.
    pub fn new(client: Client, config: &ChatConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            url: config.url.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Send a single user message, without prior conversation context.
    pub async fn complete(&self, message: &str) -> ChatReply {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: message,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let mut builder = self
            .client
            .post(&self.url)
            .json(&request)
            .timeout(self.timeout);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("Chat request failed: {e}");
                return ChatReply::Failed(e.into());
            }
        };

        let status = resp.status();
        match status {
            StatusCode::SERVICE_UNAVAILABLE => return ChatReply::Loading,
            StatusCode::TOO_MANY_REQUESTS => return ChatReply::RateLimited,
            StatusCode::UNAUTHORIZED => return ChatReply::Unauthorized,
            StatusCode::OK => {}
            _ => {
                let body = resp.text().await.unwrap_or_default();
                tracing::warn!("Chat completion failed ({status}): {body}");
                return ChatReply::Failed(FetchError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
        }

        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => return ChatReply::Failed(e.into()),
        };
        match serde_json::from_str::<ChatResponse>(&text) {
            Ok(parsed) => reply_from(parsed),
            Err(e) => ChatReply::Failed(FetchError::Malformed(e.to_string())),
        }
    }
}

fn reply_from(response: ChatResponse) -> ChatReply {
    let Some(choice) = response.choices.into_iter().next() else {
        return ChatReply::Empty;
    };
    if let Some(content) = choice
        .message
        .and_then(|m| m.content)
        .filter(|c| !c.is_empty())
    {
        return ChatReply::Answer(content.trim().to_string());
    }
    match choice.text {
        Some(text) => ChatReply::Answer(text.trim().to_string()),
        None => ChatReply::Empty,
    }
}
