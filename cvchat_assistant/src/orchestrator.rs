use tracing::{error, info, warn};

use crate::{
    api::AssistantsClient,
    config::AssistantConfig,
    error::ChatError,
    run::{PollPolicy, RunStatus},
    transport::HttpTransport,
    ChatReply, ChatRequest,
};

/// Turns one user message into one assistant reply.
///
/// Holds no per-request state: every call to [`Orchestrator::handle`] opens
/// its own thread and run, and independent calls may proceed concurrently.
pub struct Orchestrator<T> {
    transport: T,
    config: AssistantConfig,
    poll: PollPolicy,
}

impl<T: HttpTransport> Orchestrator<T> {
    pub fn new(transport: T, config: AssistantConfig) -> Self {
        Self {
            transport,
            config,
            poll: PollPolicy::DEFAULT,
        }
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub async fn handle(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let result = self.run_pipeline(request).await;
        match &result {
            Err(e) if e.is_client_error() => warn!("Rejected chat request: {e}"),
            Err(ChatError::Upstream {
                step,
                status,
                detail,
            }) => error!("Upstream call failed ({step}): status = {status:?}, detail = {detail}"),
            Err(e) => error!("Chat request failed: {e}"),
            Ok(_) => {}
        }
        result
    }

    async fn run_pipeline(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let message = request
            .message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
            .ok_or(ChatError::MissingMessage)?;

        let api_key = self.config.api_key().ok_or(ChatError::MissingCredential)?;
        let client = AssistantsClient::new(&self.transport, &self.config.upstream, api_key)?;

        let assistant_id = match request.assistant_id.filter(|id| !id.trim().is_empty()) {
            Some(assistant_id) => assistant_id,
            None => {
                info!("Creating new assistant...");
                let assistant = client.create_assistant().await?;
                info!("Assistant created with id = {}", assistant.id);
                assistant.id
            }
        };

        let thread = client.create_thread().await?;
        info!("Created thread id = {}", thread.id);

        client.post_message(&thread.id, message).await?;

        let run = client.create_run(&thread.id, &assistant_id).await?;
        info!("Started run id = {} (status = {})", run.id, run.status);

        let status = self.poll_run(&client, &thread.id, &run.id, run.status).await?;
        if !status.is_completed() {
            return Err(ChatError::RunNotCompleted(status));
        }

        let messages = client.list_messages(&thread.id).await?;
        let reply = messages.first_text().ok_or(ChatError::EmptyReply)?;

        info!("Completed chat request on thread id = {}", thread.id);
        Ok(ChatReply {
            reply: reply.to_string(),
        })
    }

    async fn poll_run(
        &self,
        client: &AssistantsClient<'_, T>,
        thread_id: &str,
        run_id: &str,
        initial: RunStatus,
    ) -> Result<RunStatus, ChatError> {
        let mut status = initial;
        let mut attempts = 0;

        while status.is_pending() && attempts < self.poll.max_attempts {
            tokio::time::sleep(self.poll.interval).await;
            attempts += 1;

            match client.get_run(thread_id, run_id).await? {
                Some(run) => status = run.status,
                None => warn!("Skipped run status check {attempts}, keeping status = {status}"),
            }
        }

        if status.is_pending() {
            warn!("Run id = {run_id} still {status} after {attempts} status checks");
        }
        Ok(status)
    }
}
