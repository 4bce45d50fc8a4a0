use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const GREETING: &str = "Hello! I'm your CV Assistant. I can answer questions about the uploaded CVs in my knowledge base. What would you like to know?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("You"),
            Role::Assistant => f.write_str("CV Assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            timestamp,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.role,
            self.content
        )
    }
}

/// Append-only conversation history of one session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting() -> Self {
        let mut transcript = Self::new();
        transcript.push(Role::Assistant, GREETING);
        transcript
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) -> &Message {
        let mut timestamp = Utc::now();
        // timestamps are strictly increasing within a transcript
        if let Some(last) = self.messages.last() {
            if timestamp <= last.timestamp {
                timestamp = last.timestamp + Duration::microseconds(1);
            }
        }

        self.messages.push(Message::new(role, content.into(), timestamp));
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_transcript_starts_with_assistant_message() {
        let transcript = Transcript::with_greeting();

        assert_eq!(1, transcript.len());
        assert_eq!(Role::Assistant, transcript.messages()[0].role);
        assert_eq!(GREETING, transcript.messages()[0].content);
    }

    #[test]
    fn keeps_insertion_order_with_increasing_timestamps() {
        let mut transcript = Transcript::new();
        for i in 0..50 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            transcript.push(role, format!("message {i}"));
        }

        let messages = transcript.messages();
        assert_eq!("message 0", messages[0].content);
        assert_eq!("message 49", messages[49].content);
        assert!(messages
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp));
    }

    #[test]
    fn assigns_distinct_ids() {
        let mut transcript = Transcript::new();
        let first = transcript.push(Role::User, "a").id;
        let second = transcript.push(Role::User, "a").id;

        assert_ne!(first, second);
    }

    #[test]
    fn serializes_role_in_lowercase() {
        let mut transcript = Transcript::new();
        transcript.push(Role::User, "hi");

        let json = serde_json::to_value(&transcript.messages()[0]).unwrap();

        assert_eq!("user", json["role"]);
        assert_eq!("hi", json["content"]);
    }
}
