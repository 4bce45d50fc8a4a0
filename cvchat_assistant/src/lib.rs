use serde::{Deserialize, Serialize};

pub mod api;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod run;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{AssistantConfig, UpstreamConfig};
pub use error::{ChatError, Step};
pub use orchestrator::Orchestrator;
pub use run::{PollPolicy, RunStatus};
pub use transport::{HttpTransport, ReqwestTransport};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            assistant_id: None,
        }
    }

    pub fn with_assistant_id(mut self, assistant_id: impl Into<String>) -> Self {
        self.assistant_id = Some(assistant_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&ChatError> for ErrorBody {
    fn from(err: &ChatError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
