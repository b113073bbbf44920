#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use super::envelope;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::HintPrompt;
use crate::domain::models::ReflectionPrompt;
use crate::domain::models::ReflectionVerdict;
use crate::domain::models::FALLBACK_HINT_OFFLINE;
use crate::domain::models::FALLBACK_HINT_UNEXPECTED;

const DEFAULT_MODEL: &str = "models/gemini-2.0-flash";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl CompletionRequest {
    fn new(prompt_text: String, json_output: bool) -> CompletionRequest {
        let mut req = CompletionRequest {
            contents: vec![Content {
                parts: vec![ContentPart { text: prompt_text }],
            }],
            generation_config: None,
        };

        if json_output {
            req.generation_config = Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
            });
        }

        return req;
    }
}

pub struct Gemini {
    url: String,
    token: String,
    timeout: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            token: Config::get(ConfigKey::GeminiToken),
            timeout: Config::get(ConfigKey::RequestTimeout),
        };
    }
}

impl Gemini {
    fn model(&self) -> String {
        let model = Config::get(ConfigKey::Model);
        if model.is_empty() {
            return DEFAULT_MODEL.to_string();
        }
        if !model.starts_with("models/") {
            return format!("models/{model}");
        }

        return model;
    }

    fn timeout_duration(&self) -> Duration {
        return Duration::from_millis(self.timeout.parse::<u64>().unwrap_or(20000));
    }

    async fn generate(&self, req: &CompletionRequest) -> Result<Value> {
        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/{model}:generateContent?key={key}",
                url = self.url,
                model = self.model(),
                key = self.token,
            ))
            .timeout(self.timeout_duration())
            .json(req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make generation request to Gemini"
            );
            bail!(format!(
                "Failed to make generation request to Gemini, {}",
                res.status().as_u16()
            ));
        }

        let body = res.json::<Value>().await?;
        return Ok(body);
    }
}

#[async_trait]
impl Backend for Gemini {
    fn name(&self) -> BackendName {
        return BackendName::Gemini;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let url = format!(
            "{url}/v1beta/{model}?key={key}",
            url = self.url,
            model = self.model(),
            key = self.token
        );

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(self.timeout_duration())
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Gemini is not reachable");
            bail!("Gemini is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_hint(&self, prompt: HintPrompt) -> String {
        let body = match self.generate(&CompletionRequest::new(prompt.format(), false)).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = ?err, "Gemini hint request failed, falling back");
                return FALLBACK_HINT_OFFLINE.to_string();
            }
        };

        match envelope::extract_text(&body) {
            Some(text) => return text,
            None => {
                tracing::warn!(body = ?body, "Gemini hint response held no usable text");
                return FALLBACK_HINT_UNEXPECTED.to_string();
            }
        }
    }

    #[allow(clippy::implicit_return)]
    async fn get_reflection(&self, prompt: ReflectionPrompt) -> ReflectionVerdict {
        let body = match self.generate(&CompletionRequest::new(prompt.format(), true)).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = ?err, "Gemini reflection request failed, falling back");
                return ReflectionVerdict::fallback();
            }
        };

        let Some(text) = envelope::extract_text(&body) else {
            tracing::warn!(body = ?body, "Gemini reflection response held no usable text");
            return ReflectionVerdict::fallback();
        };

        match ReflectionVerdict::parse(&text) {
            Ok(verdict) => return verdict,
            Err(err) => {
                tracing::warn!(error = ?err, "Gemini reflection was not a valid verdict");
                return ReflectionVerdict::fallback();
            }
        }
    }
}
