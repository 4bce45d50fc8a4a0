pub mod backend;
pub mod config;
pub mod logging;
pub mod session;
pub mod transcript;
pub mod upload;

pub use backend::{BackendError, HttpChatBackend};
pub use session::{ChatBackend, ChatSession, SubmitOutcome};
pub use transcript::{Message, Role, Transcript};
