//! Per-session conversational memory.

use serde::{Deserialize, Serialize};

/// Carried between turns within one session and discarded with it.
/// Owned by exactly one session; a question is fully processed before
/// the next is accepted, so there is never concurrent mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    /// The dish most recently resolved from a question.
    pub current_dish: Option<String>,
    /// The previous turn's question, for "what did I just ask".
    pub last_user_question: Option<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }
}
