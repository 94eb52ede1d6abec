//! Google Gemini reasoning-service client.
//!
//! One `generateContent` call per active turn, with sampling parameters and
//! content-safety thresholds fixed by configuration. Authentication priority:
//! explicit config key, then `GEMINI_API_KEY`, then `GOOGLE_API_KEY`.

use crate::config::{Config, SamplingConfig};
use crate::error::LlmError;
use crate::llm::{build_provider_client, sanitize_api_error, traits::ReasoningService};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

mod types;
use types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    default_safety_settings,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    model: String,
    sampling: SamplingConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Like [`GeminiProvider::new`] but pointed at a non-default endpoint.
    /// Integration tests use this against a local mock server.
    pub fn with_base_url(config: &Config, base_url: &str) -> Self {
        let resolved_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            api_key: resolved_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            sampling: config.sampling.clone(),
            client: build_provider_client(),
        }
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.api_key.as_deref().ok_or(LlmError::MissingApiKey)
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.sampling.temperature,
                top_k: self.sampling.top_k,
                top_p: self.sampling.top_p,
                max_output_tokens: self.sampling.max_output_tokens,
            },
            safety_settings: default_safety_settings(),
        }
    }

    async fn ensure_success_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, LlmError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Upstream {
                status,
                message: sanitize_api_error(&error_text),
            });
        }

        Ok(response)
    }

    fn extract_text(result: &GenerateContentResponse) -> Result<String, LlmError> {
        let text = result
            .candidates
            .as_deref()
            .and_then(<[_]>::first)
            .map(|candidate| {
                let mut out = String::new();
                for part in &candidate.content.parts {
                    if let Some(t) = &part.text {
                        if !out.is_empty() {
                            out.push('\n');
                        }
                        out.push_str(t);
                    }
                }
                out
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyReply);
        }

        Ok(text)
    }

    async fn call_api(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key()?;
        let model_name = Self::model_name(&self.model);
        let url = format!(
            "{}/{model_name}:generateContent?key={api_key}",
            self.base_url
        );

        let request = self.build_request(prompt);
        let response = self.client.post(url).json(&request).send().await?;
        let response = Self::ensure_success_status(response).await?;

        let result: GenerateContentResponse = response.json().await?;

        if let Some(err) = result.error.as_ref() {
            return Err(LlmError::Upstream {
                status: err.code.unwrap_or(500),
                message: sanitize_api_error(&err.message),
            });
        }

        Self::extract_text(&result)
    }
}

impl ReasoningService for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.call_api(prompt))
    }
}
