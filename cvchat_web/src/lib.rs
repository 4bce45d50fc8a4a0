use std::sync::Arc;

use assistant::{
    transport::HttpTransport, AssistantConfig, ChatError, ChatRequest, ErrorBody,
    Orchestrator, ReqwestTransport,
};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::tower_ext::ApiRouterExt;

pub mod logging;
mod tower_ext;

pub use tower_ext::{ALLOW_HEADERS, ALLOW_ORIGIN};

pub mod env {
    pub const API_PORT: &str = "CVCHAT_API_PORT";
}

pub struct AppState {
    pub orchestrator: Orchestrator<Arc<dyn HttpTransport>>,
}

impl AppState {
    pub fn new(transport: Arc<dyn HttpTransport>, config: AssistantConfig) -> Self {
        Self {
            orchestrator: Orchestrator::new(transport, config),
        }
    }

    pub fn from_env() -> Self {
        let config = AssistantConfig::from_env();
        if config.api_key().is_none() {
            tracing::warn!(
                "{} is not set, chat requests will fail until it is configured",
                assistant::config::env::API_KEY
            );
        }
        Self::new(Arc::new(ReqwestTransport::default()), config)
    }
}

pub fn app(app_state: Arc<AppState>) -> Router<()> {
    Router::new()
        .route("/chat", post(chat).options(preflight))
        .route("/healthz", get(healthz))
        .with_cors_headers()
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn chat(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    info!("Received chat request");
    let result = match serde_json::from_slice::<ChatRequest>(&body) {
        Ok(request) => state.orchestrator.handle(request).await,
        Err(e) => Err(ChatError::InvalidBody(e.to_string())),
    };

    match result {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn healthz() -> &'static str {
    "ok"
}

fn error_response(err: &ChatError) -> Response {
    (err.status_code(), Json(ErrorBody::from(err))).into_response()
}
