use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
    backend::BackendError,
    transcript::{Message, Role, Transcript},
};

pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";
pub const ERROR_NOTICE: &str = "Failed to send message. Please try again.";

/// Anything that can turn one user message into one assistant reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, BackendError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, or a request is already outstanding.
    Ignored,
    Replied,
    /// The fallback reply was appended; `notice` is shown to the user.
    Failed { notice: &'static str },
}

pub struct ChatSession {
    transcript: Transcript,
    busy: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(Transcript::with_greeting())
    }
}

impl ChatSession {
    pub fn new(transcript: Transcript) -> Self {
        Self {
            transcript,
            busy: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Appends the user message and marks the session busy.
    pub fn begin(&mut self, text: &str) -> Option<PendingTurn> {
        let text = text.trim();
        if text.is_empty() || self.busy {
            return None;
        }

        self.transcript.push(Role::User, text);
        self.busy = true;
        Some(PendingTurn {
            message: text.to_string(),
        })
    }

    pub fn complete(&mut self, result: Result<String, BackendError>) -> SubmitOutcome {
        self.busy = false;
        match result {
            Ok(reply) => {
                self.transcript.push(Role::Assistant, reply);
                SubmitOutcome::Replied
            }
            Err(e) => {
                warn!("Error sending message: {e}");
                self.transcript.push(Role::Assistant, FALLBACK_REPLY);
                SubmitOutcome::Failed {
                    notice: ERROR_NOTICE,
                }
            }
        }
    }

    pub async fn submit(&mut self, text: &str, backend: &dyn ChatBackend) -> SubmitOutcome {
        let Some(turn) = self.begin(text) else {
            return SubmitOutcome::Ignored;
        };

        info!("Sending message ({} chars)", turn.message.len());
        let result = backend.send(&turn.message).await;
        self.complete(result)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.transcript.last()
    }
}
