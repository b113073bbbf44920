#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::Author;
use crate::domain::models::BackendBox;
use crate::domain::models::HintPrompt;
use crate::domain::models::Message;
use crate::domain::models::ReflectionPrompt;
use crate::domain::models::ReflectionVerdict;
use crate::domain::models::SessionConfig;
use crate::domain::models::SessionResult;
use crate::domain::models::SessionState;

pub const WELCOME_MESSAGE: &str =
    "Hi! I'm here to help you practice. Let's start with the prompt above.";

/// Owns all session data and the Configuring -> Writing -> Reflecting
/// lifecycle. Operations called from the wrong state are rejected with an
/// error and leave the controller untouched.
pub struct SessionController {
    state: SessionState,
    config: Option<SessionConfig>,
    draft: String,
    messages: Vec<Message>,
    result: Option<SessionResult>,
    waiting_for_hint: bool,
}

impl Default for SessionController {
    fn default() -> SessionController {
        return SessionController {
            state: SessionState::Configuring,
            config: None,
            draft: "".to_string(),
            messages: vec![],
            result: None,
            waiting_for_hint: false,
        };
    }
}

impl SessionController {
    pub fn state(&self) -> SessionState {
        return self.state;
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        return self.config.as_ref();
    }

    pub fn draft(&self) -> &str {
        return &self.draft;
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn result(&self) -> Option<&SessionResult> {
        return self.result.as_ref();
    }

    pub fn waiting_for_hint(&self) -> bool {
        return self.waiting_for_hint;
    }

    /// Stores the teacher's configuration, seeds the transcript with the
    /// fixed welcome message, and enters Writing.
    pub fn start(&mut self, config: SessionConfig) -> Result<()> {
        if self.state != SessionState::Configuring {
            bail!("a session is already running, reset it before starting a new one");
        }

        tracing::debug!(topic = config.topic, "session started");

        self.config = Some(config);
        self.draft = "".to_string();
        self.messages = vec![Message::new(Author::Assistant, WELCOME_MESSAGE)];
        self.state = SessionState::Writing;

        return Ok(());
    }

    /// Replaces the draft wholesale. No validation and no length limit.
    pub fn update_draft(&mut self, text: &str) -> Result<()> {
        if self.state != SessionState::Writing {
            bail!("the draft can only be edited while writing");
        }

        self.draft = text.to_string();
        return Ok(());
    }

    /// Marks a hint request as in flight and snapshots the draft and config
    /// into a prompt for the backend. At most one request may be pending,
    /// which keeps assistant messages from racing into the transcript.
    pub fn begin_hint(&mut self) -> Result<HintPrompt> {
        if self.state != SessionState::Writing {
            bail!("hints are only available while writing");
        }
        if self.waiting_for_hint {
            bail!("a hint request is already in flight");
        }

        let Some(config) = &self.config else {
            bail!("no session configuration is set");
        };

        self.waiting_for_hint = true;
        return Ok(HintPrompt::new(config, &self.draft));
    }

    /// Appends the assistant's answer, fallback text included, and clears
    /// the in-flight flag. Pairs with `begin_hint`.
    pub fn complete_hint(&mut self, text: &str) {
        self.messages.push(Message::new(Author::Assistant, text));
        self.waiting_for_hint = false;
    }

    /// Fire-and-await hint round trip. The backend never fails outward, so
    /// exactly one assistant message lands in the transcript per call.
    pub async fn request_hint(&mut self, backend: &BackendBox) -> Result<()> {
        let prompt = self.begin_hint()?;
        let hint = backend.get_hint(prompt).await;
        self.complete_hint(&hint);
        return Ok(());
    }

    /// Snapshots the draft and transcript into the session result and enters
    /// Reflecting. The transcript is frozen from here on.
    pub fn finish(&mut self) -> Result<()> {
        if self.state != SessionState::Writing {
            bail!("only a running writing session can be submitted");
        }
        if self.waiting_for_hint {
            bail!("wait for the pending hint before submitting");
        }

        self.result = Some(SessionResult {
            text: self.draft.to_string(),
            messages: self.messages.clone(),
        });
        self.state = SessionState::Reflecting;

        return Ok(());
    }

    /// Requests the end-of-session verdict for the submitted result.
    pub async fn reflect(&self, backend: &BackendBox) -> Result<ReflectionVerdict> {
        let Some(result) = &self.result else {
            bail!("reflection is only available after submitting");
        };

        let prompt = ReflectionPrompt::new(&result.text, &result.messages);
        return Ok(backend.get_reflection(prompt).await);
    }

    /// Discards all session data and returns to Configuring. Valid from any
    /// state.
    pub fn reset(&mut self) {
        self.state = SessionState::Configuring;
        self.config = None;
        self.draft = "".to_string();
        self.messages = vec![];
        self.result = None;
        self.waiting_for_hint = false;
    }
}
