use std::time::Duration;

use assistant::{ChatReply, ChatRequest, ErrorBody};
use async_trait::async_trait;

use crate::session::ChatBackend;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("chat endpoint returned {status}: {error}")]
    Status { status: u16, error: String },
    #[error("malformed reply: {0}")]
    Malformed(String),
}

/// Sends each message to the chat endpoint over HTTP.
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint: String,
    assistant_id: Option<String>,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            assistant_id: None,
        })
    }

    pub fn with_assistant_id(mut self, assistant_id: Option<String>) -> Self {
        self.assistant_id = assistant_id;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &str) -> Result<String, BackendError> {
        let request = ChatRequest {
            message: Some(message.to_string()),
            assistant_id: self.assistant_id.clone(),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        parse_reply(status.as_u16(), &body)
    }
}

fn parse_reply(status: u16, body: &[u8]) -> Result<String, BackendError> {
    if !(200..300).contains(&status) {
        let error = serde_json::from_slice::<ErrorBody>(body)
            .map(|x| x.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());
        return Err(BackendError::Status { status, error });
    }

    serde_json::from_slice::<ChatReply>(body)
        .map(|x| x.reply)
        .map_err(|e| BackendError::Malformed(e.to_string()))
}
