use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;

/// The three screens of a classroom session. The machine is cyclic, a reset
/// from Reflecting starts the next session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Configuring,
    Writing,
    Reflecting,
}

/// Teacher-supplied prompt for one session. Vocabulary is a comma-separated
/// display string and is never parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub topic: String,
    pub vocabulary: String,
    pub constraint: String,
}

/// Snapshot of the draft and transcript taken at submission time.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub text: String,
    pub messages: Vec<Message>,
}
