#[cfg(test)]
#[path = "verdict_test.rs"]
mod tests;

use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

/// End-of-session analysis returned by the reflection request. Lives only as
/// long as the Reflecting screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionVerdict {
    pub sentence_count: u32,
    pub strength: String,
    pub improvement: String,
}

impl ReflectionVerdict {
    /// Returned whenever the remote reflection call fails in any way.
    pub fn fallback() -> ReflectionVerdict {
        return ReflectionVerdict {
            sentence_count: 0,
            strength: "Good effort!".to_string(),
            improvement: "Keep practicing.".to_string(),
        };
    }

    /// Parses a verdict from raw model output. Models frequently wrap JSON in
    /// markdown code fences even when asked not to, so fences are stripped
    /// before decoding.
    pub fn parse(raw: &str) -> Result<ReflectionVerdict> {
        let verdict = serde_json::from_str::<ReflectionVerdict>(&strip_code_fences(raw))?;
        return Ok(verdict);
    }
}

fn strip_code_fences(raw: &str) -> String {
    let mut text = raw.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped;
    } else if let Some(stripped) = text.strip_prefix("```") {
        text = stripped;
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }

    return text.trim().to_string();
}
