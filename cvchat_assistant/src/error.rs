use std::fmt;

use reqwest::StatusCode;

use crate::{run::RunStatus, transport::TransportError};

/// The upstream call that was being made when a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateAssistant,
    CreateThread,
    PostMessage,
    CreateRun,
    GetRun,
    ListMessages,
}

impl Step {
    fn action(&self) -> &'static str {
        match self {
            Step::CreateAssistant => "create assistant",
            Step::CreateThread => "create thread",
            Step::PostMessage => "add message",
            Step::CreateRun => "run assistant",
            Step::GetRun => "check run status",
            Step::ListMessages => "retrieve messages",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Message is required")]
    MissingMessage,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Azure OpenAI API key not configured")]
    MissingCredential,

    #[error("Failed to {step}")]
    Upstream {
        step: Step,
        status: Option<StatusCode>,
        detail: String,
    },

    #[error("Assistant run failed with status: {0}")]
    RunNotCompleted(RunStatus),

    #[error("No response from assistant")]
    EmptyReply,
}

impl ChatError {
    pub(crate) fn upstream_status(step: Step, status: StatusCode, body: String) -> Self {
        ChatError::Upstream {
            step,
            status: Some(status),
            detail: body,
        }
    }

    pub(crate) fn upstream_transport(step: Step, err: TransportError) -> Self {
        ChatError::Upstream {
            step,
            status: None,
            detail: err.to_string(),
        }
    }

    pub(crate) fn upstream_decode(step: Step, err: serde_json::Error) -> Self {
        ChatError::Upstream {
            step,
            status: None,
            detail: format!("malformed response: {err}"),
        }
    }

    /// HTTP status reported to the caller of the chat endpoint.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::MissingMessage => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    pub fn failed_step(&self) -> Option<Step> {
        match self {
            ChatError::Upstream { step, .. } => Some(*step),
            _ => None,
        }
    }
}
