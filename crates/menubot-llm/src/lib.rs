//! OpenAI-compatible chat-completions client.
//!
//! Blocking: the answer pipeline is one synchronous request per turn.
//! Transport and timeout failures get a bounded retry with doubling
//! backoff; client-side rejections fail fast.

use menubot_core::config::Config;
use menubot_core::error::{Error, GenerationError};
use menubot_core::traits::Generator;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: u32 = 2;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

pub struct ChatClient {
    http: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
    timeout: Duration,
    max_retries: u32,
}

impl ChatClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: 0.2,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Build from `llm.*` config keys. The API key itself never lives
    /// in config files; `llm.api_key_env` names the variable holding
    /// it, and a missing credential fails fast at startup.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let base_url = config.get_or("llm.base_url", DEFAULT_BASE_URL.to_string());
        let model = config.get_or("llm.model", DEFAULT_MODEL.to_string());
        let api_key_env = config.get_or("llm.api_key_env", "OPENAI_API_KEY".to_string());
        let api_key = std::env::var(&api_key_env).map_err(|_| {
            Error::InvalidConfig(format!("missing credential: env var {api_key_env} is not set"))
        })?;
        let timeout_secs = config.get_or("llm.timeout_secs", DEFAULT_TIMEOUT.as_secs());
        Ok(Self::new(base_url, api_key, model).with_timeout(Duration::from_secs(timeout_secs)))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn request_once(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message { role: "system", content: system },
                Message { role: "user", content: user },
            ],
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.timeout)
                } else {
                    GenerationError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(self.timeout)
            } else {
                GenerationError::Transport(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: truncate(&body, 300),
            });
        }
        extract_content(&body)
    }
}

impl Generator for ChatClient {
    fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 0u32;
        loop {
            match self.request_once(system, user) {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(%err, attempt, "generation call failed, retrying");
                    std::thread::sleep(backoff);
                    backoff *= 2;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

fn extract_content(body: &str) -> Result<String, GenerationError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Malformed(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| GenerationError::Malformed("response carried no choices".to_string()))
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_content_reads_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Olá!"}}]}"#;
        assert_eq!(extract_content(body).expect("content"), "Olá!");
    }

    #[test]
    fn extract_content_rejects_empty_choices() {
        let err = extract_content(r#"{"choices":[]}"#).expect_err("no choices");
        assert!(matches!(err, GenerationError::Malformed(_)));
    }

    #[test]
    fn extract_content_rejects_non_json() {
        let err = extract_content("<html>gateway error</html>").expect_err("not json");
        assert!(matches!(err, GenerationError::Malformed(_)));
    }

    #[test]
    fn request_payload_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                Message { role: "system", content: "s" },
                Message { role: "user", content: "u" },
            ],
            temperature: 0.2,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abc", 10), "abc");
        let cut = truncate("cardápio completo", 7);
        assert!(cut.starts_with("cardá") || cut.starts_with("card"));
    }
}
