use std::time::Duration;

use clap::Parser;

pub mod env {
    pub const ENDPOINT: &str = "CVCHAT_ENDPOINT";
    pub const ASSISTANT_ID: &str = "CVCHAT_ASSISTANT_ID";
}

#[derive(Parser, Debug, Clone)]
#[command(name = "cvchat", author, version, about = "Chat with the CV Assistant", long_about = None)]
pub struct Cli {
    #[arg(short = 'e', long, env = env::ENDPOINT, default_value = "http://localhost:3000/chat")]
    pub endpoint: String,

    /// Reuse an existing assistant instead of creating one per message.
    #[arg(short = 'a', long, env = env::ASSISTANT_ID, default_value = None)]
    pub assistant_id: Option<String>,

    #[arg(short = 't', long, default_value_t = 60)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
