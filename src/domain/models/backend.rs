#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumVariantNames;

use super::Message;
use super::ReflectionVerdict;
use super::SessionConfig;

/// Returned when a hint request cannot reach the backend at all.
pub const FALLBACK_HINT_OFFLINE: &str =
    "I'm having trouble connecting right now. Try rereading your last sentence to see if it's clear.";

/// Returned when the backend answered but the response held no usable text.
pub const FALLBACK_HINT_UNEXPECTED: &str =
    "I see what you wrote. What is the main point you want to make?";

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    Gemini,
    OpenAI,
}

impl BackendName {
    pub fn parse(name: String) -> Option<BackendName> {
        match name.to_lowercase().as_str() {
            "gemini" => return Some(BackendName::Gemini),
            "openai" => return Some(BackendName::OpenAI),
            _ => return None,
        }
    }
}

/// A single hint request carrying everything the backend needs, snapshotted
/// from the session at the moment the student asked for help.
pub struct HintPrompt {
    pub topic: String,
    pub constraint: String,
    pub draft: String,
}

impl HintPrompt {
    pub fn new(config: &SessionConfig, draft: &str) -> HintPrompt {
        return HintPrompt {
            topic: config.topic.to_string(),
            constraint: config.constraint.to_string(),
            draft: draft.to_string(),
        };
    }

    /// Builds the instruction text sent to the model. Topic, task, and draft
    /// are embedded verbatim, the transport does its own encoding.
    pub fn format(&self) -> String {
        return format!(
            r#"You are a pedagogical writing assistant.

CONTEXT:
- Topic: "{topic}"
- Task: "{constraint}"
- Student Text: "{draft}"

YOUR ROLE:
- Act as a supportive writing partner.
- NEVER write the essay for the student.
- NEVER correct grammar directly.
- DO NOT ASK QUESTIONS. Make direct observations or give hints as statements.

YOUR GOAL:
- Read the student's text.
- Provide a specific hint or observation to help them continue or improve.

OUTPUT:
- A single, short, encouraging statement or hint (max 2 sentences)."#,
            topic = self.topic,
            constraint = self.constraint,
            draft = self.draft,
        );
    }
}

/// The end-of-session analysis request. Only the interaction count from the
/// transcript goes to the model, never the messages themselves.
pub struct ReflectionPrompt {
    pub draft: String,
    pub interaction_count: usize,
}

impl ReflectionPrompt {
    pub fn new(draft: &str, transcript: &[Message]) -> ReflectionPrompt {
        return ReflectionPrompt {
            draft: draft.to_string(),
            interaction_count: transcript.len(),
        };
    }

    pub fn format(&self) -> String {
        return format!(
            r#"Analyze this short writing session.

Student Text: "{draft}"
Interaction Count: {count}

Provide a "Metalinguistic Analysis" (NOT corrections).
1. Count sentences.
2. Identify 1 strong academic word used (if any).
3. Identify 1 area for improvement (e.g., "Sentence 2 is very long").

Format the output as JSON: {{ "sentence_count": number, "strength": string, "improvement": string }}"#,
            draft = self.draft,
            count = self.interaction_count,
        );
    }
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify the backend is reachable and credentials
    /// are in place. This is the one place a broken backend is a hard error.
    async fn health_check(&self) -> Result<()>;

    /// Requests a short non-corrective hint for the current draft. Never
    /// fails outward, any error resolves to one of the fixed fallback hint
    /// strings so the student can keep writing.
    async fn get_hint(&self, prompt: HintPrompt) -> String;

    /// Requests the end-of-session verdict. Never fails outward, any error
    /// resolves to `ReflectionVerdict::fallback()`.
    async fn get_reflection(&self, prompt: ReflectionPrompt) -> ReflectionVerdict;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
