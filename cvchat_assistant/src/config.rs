pub mod env {
    pub const API_KEY: &str = "AZURE_OPENAI_API_KEY";
}

pub const DEFAULT_ENDPOINT: &str = "https://round2letsgo.openai.azure.com/";
pub const DEFAULT_API_VERSION: &str = "2024-05-01-preview";
pub const DEFAULT_MODEL: &str = "gpt-4.1round2letsgo";
pub const DEFAULT_VECTOR_STORE_ID: &str = "vs_pX2hJzVdruY2vW0rte3nFiNr";
pub const DEFAULT_ASSISTANT_NAME: &str = "CV Assistant";
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful assistant that answers questions about the uploaded CV. \
Be professional, concise, and accurate. If asked about information not in the CV, \
politely say you can only discuss what's in the uploaded CV.";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Fixed description of the hosted service and of the assistant persona
/// created on demand.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL, including the trailing slash.
    pub endpoint: String,
    pub api_version: String,
    pub model: String,
    pub assistant_name: String,
    pub instructions: String,
    pub temperature: f32,
    pub vector_store_id: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            vector_store_id: DEFAULT_VECTOR_STORE_ID.to_string(),
        }
    }
}

impl UpstreamConfig {
    pub fn url(&self, path: &str) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!(
            "{endpoint}/openai/{path}?api-version={version}",
            version = self.api_version
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssistantConfig {
    /// Service credential. A missing key is reported per request, not at startup.
    pub api_key: Option<String>,
    pub upstream: UpstreamConfig,
}

impl AssistantConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            upstream: UpstreamConfig::default(),
        }
    }

    pub fn from_env() -> Self {
        let api_key = std::env::var(env::API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self {
            api_key,
            upstream: UpstreamConfig::default(),
        }
    }

    pub fn with_upstream(mut self, upstream: UpstreamConfig) -> Self {
        self.upstream = upstream;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}
