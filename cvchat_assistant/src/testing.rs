//! In-memory stand-ins for the hosted assistants API.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::transport::{HttpTransport, Request, Response, TransportError};

pub const FAKE_ASSISTANT_ID: &str = "asst_fake";
pub const FAKE_THREAD_ID: &str = "thread_fake";
pub const FAKE_RUN_ID: &str = "run_fake";

type Handler = dyn Fn(&Request) -> Result<Response, TransportError> + Send + Sync;

/// Answers every request through a handler and records what it was sent.
pub struct ScriptedTransport {
    handler: Box<Handler>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new(
        handler: impl Fn(&Request) -> Result<Response, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.requests().iter().map(Call::classify).collect()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().into_iter().filter(|x| *x == call).count()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, req: Request) -> Result<Response, TransportError> {
        let response = (self.handler)(&req);
        self.requests.lock().unwrap().push(req);
        response
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    CreateAssistant,
    CreateThread,
    PostMessage,
    CreateRun,
    GetRun,
    ListMessages,
    Unknown,
}

impl Call {
    pub fn classify(req: &Request) -> Self {
        let segments: Vec<&str> = req
            .path()
            .trim_start_matches('/')
            .trim_start_matches("openai/")
            .split('/')
            .collect();

        match (req.method.as_str(), segments.as_slice()) {
            ("POST", ["assistants"]) => Call::CreateAssistant,
            ("POST", ["threads"]) => Call::CreateThread,
            ("POST", ["threads", _, "messages"]) => Call::PostMessage,
            ("POST", ["threads", _, "runs"]) => Call::CreateRun,
            ("GET", ["threads", _, "runs", _]) => Call::GetRun,
            ("GET", ["threads", _, "messages"]) => Call::ListMessages,
            _ => Call::Unknown,
        }
    }
}

pub fn json_response(status: StatusCode, body: Value) -> Response {
    Response {
        status,
        body: body.to_string().into_bytes(),
    }
}

/// Scripted happy path of the assistants API with optional faults.
#[derive(Debug, Clone)]
pub struct FakeAssistantsService {
    pub initial_status: String,
    /// Returned by successive status checks; the last entry repeats.
    pub run_statuses: Vec<String>,
    pub reply: Option<String>,
    pub fail_on: Option<Call>,
}

impl Default for FakeAssistantsService {
    fn default() -> Self {
        Self {
            initial_status: "queued".to_string(),
            run_statuses: vec!["in_progress".to_string(), "completed".to_string()],
            reply: Some("Hello from the fake assistant".to_string()),
            fail_on: None,
        }
    }
}

impl FakeAssistantsService {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Default::default()
        }
    }

    pub fn with_run_statuses(mut self, statuses: &[&str]) -> Self {
        self.run_statuses = statuses.iter().map(|x| x.to_string()).collect();
        self
    }

    pub fn failing_on(mut self, call: Call) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn into_transport(self) -> Arc<ScriptedTransport> {
        let status_checks = AtomicUsize::new(0);
        Arc::new(ScriptedTransport::new(move |req| {
            let call = Call::classify(req);
            if Some(call) == self.fail_on {
                return Ok(json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": { "message": "scripted failure" } }),
                ));
            }

            let response = match call {
                Call::CreateAssistant => json_response(StatusCode::OK, json!({ "id": FAKE_ASSISTANT_ID })),
                Call::CreateThread => json_response(StatusCode::OK, json!({ "id": FAKE_THREAD_ID })),
                Call::PostMessage => json_response(StatusCode::OK, json!({ "id": "msg_user", "role": "user" })),
                Call::CreateRun => json_response(
                    StatusCode::OK,
                    json!({ "id": FAKE_RUN_ID, "status": self.initial_status }),
                ),
                Call::GetRun => {
                    let idx = status_checks.fetch_add(1, Ordering::SeqCst);
                    let status = self
                        .run_statuses
                        .get(idx)
                        .or(self.run_statuses.last())
                        .cloned()
                        .unwrap_or_else(|| self.initial_status.clone());
                    json_response(StatusCode::OK, json!({ "id": FAKE_RUN_ID, "status": status }))
                }
                Call::ListMessages => {
                    let data = match &self.reply {
                        Some(reply) => json!([{
                            "role": "assistant",
                            "content": [{ "type": "text", "text": { "value": reply, "annotations": [] } }]
                        }]),
                        None => json!([]),
                    };
                    json_response(StatusCode::OK, json!({ "object": "list", "data": data }))
                }
                Call::Unknown => json_response(StatusCode::NOT_FOUND, json!({ "error": "not found" })),
            };
            Ok(response)
        }))
    }
}
