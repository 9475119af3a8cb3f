//! Chat-completion client that turns a statement payload into advice text.
//!
//! One POST per call, no retries. The caller supplies the credential; nothing
//! here reads the environment.

use std::fmt;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AdviceError;
use crate::prompt::build_prompt;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_MAX_TOKENS: u32 = 700;

#[derive(Debug, Clone, PartialEq)]
pub struct AdviceConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
    /// Longer answers are cut off by the endpoint.
    pub max_tokens: u32,
    /// `None` waits for the endpoint indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: Option<String>,
}

pub struct AdviceClient {
    http: reqwest::Client,
    api_key: String,
    config: AdviceConfig,
}

impl fmt::Debug for AdviceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdviceClient")
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl AdviceClient {
    pub fn new(api_key: impl Into<String>, config: AdviceConfig) -> Result<Self, AdviceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_key: api_key.into(),
            config,
        })
    }

    pub fn config(&self) -> &AdviceConfig {
        &self.config
    }

    /// Single-turn request body for `payload_json`.
    pub fn chat_request(&self, payload_json: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(payload_json),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Send the payload and return the first choice's text exactly as received.
    pub async fn request_advice(&self, payload_json: &str) -> Result<String, AdviceError> {
        let body = self.chat_request(payload_json);

        info!(
            endpoint = %self.config.endpoint,
            model = %body.model,
            payload_bytes = payload_json.len(),
            "requesting advice"
        );

        let resp = self
            .http
            .post(&self.config.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "advice endpoint rejected request");
            return Err(AdviceError::Status {
                status: status.as_u16(),
                body: txt,
            });
        }

        let raw = resp.text().await?;
        let out: Resp = serde_json::from_str(&raw)
            .map_err(|e| AdviceError::MalformedResponse(e.to_string()))?;

        let content = out
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AdviceError::MalformedResponse("no choices[0].message.content".to_string()))?;

        debug!(chars = content.len(), "advice received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_default_config() {
        let cfg = AdviceConfig::default();
        assert_eq!(cfg.endpoint, "https://api.openai.com/v1/chat/completions");
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.temperature, 0.2);
        assert_eq!(cfg.max_tokens, 700);
        assert!(cfg.timeout.is_none());
    }

    #[test]
    fn test_chat_request_body() {
        let client = AdviceClient::new("sk-test", AdviceConfig::default()).unwrap();
        let req = client.chat_request("[]");

        let v: Value = serde_json::to_value(&req).unwrap();
        assert_eq!(v["model"], "gpt-4o-mini");
        assert_eq!(v["max_tokens"], 700);
        assert_eq!(v["temperature"], 0.2);
        assert_eq!(v["messages"].as_array().unwrap().len(), 1);
        assert_eq!(v["messages"][0]["role"], "user");
        assert_eq!(v["messages"][0]["content"], json!(build_prompt("[]")));
    }

    #[test]
    fn test_client_keeps_config() {
        let cfg = AdviceConfig {
            model: "gpt-4o".to_string(),
            max_tokens: 300,
            timeout: Some(Duration::from_secs(5)),
            ..AdviceConfig::default()
        };
        let client = AdviceClient::new("sk-test", cfg.clone()).unwrap();
        assert_eq!(client.config(), &cfg);
        assert_eq!(client.chat_request("[]").max_tokens, 300);
    }

    #[test]
    fn test_debug_hides_key() {
        let client = AdviceClient::new("sk-secret-value", AdviceConfig::default()).unwrap();
        let dbg = format!("{:?}", client);
        assert!(!dbg.contains("sk-secret-value"));
        assert!(dbg.contains("redacted"));
    }
}
