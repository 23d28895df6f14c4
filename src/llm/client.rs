// src/llm/client.rs

//! Low-level Groq chat-completions client. No wrappers; just reqwest.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::config::RelayConfig;
use crate::llm::schema::ChatMessage;

/// Outbound completion boundary: send a role-tagged message list, get back
/// the generated text. Handlers depend on this trait so tests can substitute
/// a canned client.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GroqClient {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.groq_api_key.clone(),
            api_base: config.groq_base_url.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let body = json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });

        debug!(model = %self.model, messages = messages.len(), "sending chat completion request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Groq chat completion failed: {} - {}", status, text));
        }

        let resp_json: serde_json::Value = resp.json().await?;
        let content = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("no message content in completion response"))?;

        Ok(content.to_string())
    }
}
