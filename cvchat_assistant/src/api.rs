//! Typed calls against the hosted assistants API.
//!
//! Each call maps a failure onto [`ChatError::Upstream`] tagged with the
//! [`Step`] that was being performed. Run status checks are the exception:
//! a non-success status there is skipped by the poll loop.

use reqwest::{
    header::{HeaderValue, CONTENT_TYPE},
    Method,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use tracing::warn;

use crate::{
    config::UpstreamConfig,
    error::{ChatError, Step},
    run::RunStatus,
    transport::{HttpTransport, Request, Response},
};

const API_KEY_HEADER: &str = "api-key";

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantObject {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadObject {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunObject {
    pub id: String,
    pub status: RunStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageList {
    #[serde(default)]
    pub data: Vec<ThreadMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageContent {
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub value: String,
}

impl MessageList {
    /// Text of the first content block of the newest message.
    pub fn first_text(&self) -> Option<&str> {
        let text = self.data.first()?.content.first()?.text.as_ref()?;
        Some(text.value.as_str()).filter(|value| !value.is_empty())
    }
}

pub struct AssistantsClient<'a, T: ?Sized> {
    transport: &'a T,
    upstream: &'a UpstreamConfig,
    api_key: HeaderValue,
}

impl<'a, T: HttpTransport + ?Sized> AssistantsClient<'a, T> {
    /// Fails with [`ChatError::MissingCredential`] when the key cannot be
    /// sent as a header value.
    pub fn new(
        transport: &'a T,
        upstream: &'a UpstreamConfig,
        api_key: &str,
    ) -> Result<Self, ChatError> {
        let api_key = HeaderValue::from_str(api_key).map_err(|_| ChatError::MissingCredential)?;
        Ok(Self {
            transport,
            upstream,
            api_key,
        })
    }

    pub async fn create_assistant(&self) -> Result<AssistantObject, ChatError> {
        let body = json!({
            "model": self.upstream.model,
            "name": self.upstream.assistant_name,
            "instructions": self.upstream.instructions,
            "tools": [{ "type": "file_search" }],
            "tool_resources": {
                "file_search": { "vector_store_ids": [self.upstream.vector_store_id] }
            },
            "temperature": self.upstream.temperature,
        });
        let req = self.request(Method::POST, "assistants").with_json(body);
        self.send(Step::CreateAssistant, req).await
    }

    pub async fn create_thread(&self) -> Result<ThreadObject, ChatError> {
        let req = self.request(Method::POST, "threads").with_json(json!({}));
        self.send(Step::CreateThread, req).await
    }

    pub async fn post_message(&self, thread_id: &str, content: &str) -> Result<(), ChatError> {
        let path = format!("threads/{thread_id}/messages");
        let body = json!({ "role": "user", "content": content });
        let req = self.request(Method::POST, &path).with_json(body);
        self.execute(Step::PostMessage, req).await.map(|_| ())
    }

    pub async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<RunObject, ChatError> {
        let path = format!("threads/{thread_id}/runs");
        let body = json!({ "assistant_id": assistant_id });
        let req = self.request(Method::POST, &path).with_json(body);
        self.send(Step::CreateRun, req).await
    }

    /// `Ok(None)` when the service answers with a non-success status, which
    /// the poll loop skips. Network and decode failures are errors.
    pub async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Option<RunObject>, ChatError> {
        let step = Step::GetRun;
        let path = format!("threads/{thread_id}/runs/{run_id}");
        let response = self
            .transport
            .execute(self.request(Method::GET, &path))
            .await
            .map_err(|err| ChatError::upstream_transport(step, err))?;

        if !response.is_success() {
            warn!("Run status check returned {}", response.status);
            return Ok(None);
        }

        response
            .json()
            .map(Some)
            .map_err(|err| ChatError::upstream_decode(step, err))
    }

    pub async fn list_messages(&self, thread_id: &str) -> Result<MessageList, ChatError> {
        let path = format!("threads/{thread_id}/messages");
        let req = self.request(Method::GET, &path);
        self.send(Step::ListMessages, req).await
    }

    fn request(&self, method: Method, path: &str) -> Request {
        let mut req = Request::new(method, self.upstream.url(path));
        req.headers.insert(API_KEY_HEADER, self.api_key.clone());
        req.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        req
    }

    async fn send<R: DeserializeOwned>(&self, step: Step, req: Request) -> Result<R, ChatError> {
        self.execute(step, req)
            .await?
            .json()
            .map_err(|err| ChatError::upstream_decode(step, err))
    }

    async fn execute(&self, step: Step, req: Request) -> Result<Response, ChatError> {
        let response = self
            .transport
            .execute(req)
            .await
            .map_err(|err| ChatError::upstream_transport(step, err))?;

        if !response.is_success() {
            return Err(ChatError::upstream_status(
                step,
                response.status,
                response.text(),
            ));
        }

        Ok(response)
    }
}
