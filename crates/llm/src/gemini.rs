//! A Gemini-backed `TextGenerator`. The only concrete provider shipped;
//! the capability is a trait object so swapping providers never touches
//! the response generator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use scam_honeypot_core::{Error, Result};

use crate::LlmError;

/// Provider configuration. `api_key` absent (empty) means the capability
/// should not be constructed at all — bootstrap treats that as "no LLM
/// path" and wires only the template generator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            max_tokens: 200,
            temperature: 0.8,
            timeout: Duration::from_secs(10),
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

pub struct GeminiGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> std::result::Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration(
                "GEMINI_API_KEY not set".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LlmError::from)?;
        Ok(Self { config, client })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, self.config.api_key
        )
    }

    async fn call(&self, prompt: &str) -> std::result::Result<String, LlmError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        };

        let response = self.client.post(self.url()).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(LlmError::Network(format!("HTTP {status}: {body}")));
            }
            return Err(LlmError::Api(format!("HTTP {status}: {body}")));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| LlmError::InvalidResponse("no candidates in response".to_string()))
    }
}

#[async_trait]
impl scam_honeypot_core::TextGenerator for GeminiGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.call(prompt).await.map_err(Error::from)
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_refuses_construction() {
        let err = GeminiGenerator::new(GeminiConfig::default()).unwrap_err();
        assert!(matches!(err, LlmError::Configuration(_)));
    }

    #[test]
    fn url_embeds_model_and_key() {
        let generator = GeminiGenerator::new(GeminiConfig::new("test-key")).unwrap();
        let url = generator.url();
        assert!(url.contains("gemini-1.5-flash"));
        assert!(url.contains("key=test-key"));
    }
}
