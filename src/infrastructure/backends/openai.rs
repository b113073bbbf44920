#[cfg(test)]
#[path = "openai_test.rs"]
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

const DEFAULT_MODEL: &str = "gpt-5-nano";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    input: String,
    store: bool,
}

pub struct OpenAI {
    url: String,
    token: String,
    timeout: String,
}

impl Default for OpenAI {
    fn default() -> OpenAI {
        return OpenAI {
            url: Config::get(ConfigKey::OpenaiURL),
            token: Config::get(ConfigKey::OpenaiToken),
            timeout: Config::get(ConfigKey::RequestTimeout),
        };
    }
}

impl OpenAI {
    fn model(&self) -> String {
        let model = Config::get(ConfigKey::Model);
        if model.is_empty() {
            return DEFAULT_MODEL.to_string();
        }

        return model;
    }

    fn timeout_duration(&self) -> Duration {
        return Duration::from_millis(self.timeout.parse::<u64>().unwrap_or(20000));
    }

    async fn generate(&self, prompt_text: String) -> Result<Value> {
        let req = CompletionRequest {
            model: self.model(),
            input: prompt_text,
            store: false,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/responses", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .timeout(self.timeout_duration())
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make generation request to OpenAI"
            );
            bail!(format!(
                "Failed to make generation request to OpenAI, {}",
                res.status().as_u16()
            ));
        }

        let body = res.json::<Value>().await?;
        return Ok(body);
    }
}

#[async_trait]
impl Backend for OpenAI {
    fn name(&self) -> BackendName {
        return BackendName::OpenAI;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("OpenAI URL is not defined");
        }
        if self.token.is_empty() {
            bail!("OpenAI token is not defined");
        }

        // The official API index returns a 404 or a 418, so only proxies get
        // an actual reachability probe.
        if self.url == "https://api.openai.com" {
            return Ok(());
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(self.timeout_duration())
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "OpenAI is not reachable");
            bail!("OpenAI is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "OpenAI health check failed");
            bail!("OpenAI health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_hint(&self, prompt: HintPrompt) -> String {
        let body = match self.generate(prompt.format()).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = ?err, "OpenAI hint request failed, falling back");
                return FALLBACK_HINT_OFFLINE.to_string();
            }
        };

        match envelope::extract_text(&body) {
            Some(text) => return text,
            None => {
                tracing::warn!(body = ?body, "OpenAI hint response held no usable text");
                return FALLBACK_HINT_UNEXPECTED.to_string();
            }
        }
    }

    #[allow(clippy::implicit_return)]
    async fn get_reflection(&self, prompt: ReflectionPrompt) -> ReflectionVerdict {
        let body = match self.generate(prompt.format()).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = ?err, "OpenAI reflection request failed, falling back");
                return ReflectionVerdict::fallback();
            }
        };

        let Some(text) = envelope::extract_text(&body) else {
            tracing::warn!(body = ?body, "OpenAI reflection response held no usable text");
            return ReflectionVerdict::fallback();
        };

        match ReflectionVerdict::parse(&text) {
            Ok(verdict) => return verdict,
            Err(err) => {
                tracing::warn!(error = ?err, "OpenAI reflection was not a valid verdict");
                return ReflectionVerdict::fallback();
            }
        }
    }
}
