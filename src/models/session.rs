//! Per-session conversation state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One recorded turn of the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: String,
    pub name: Option<String>,
    pub message_count: u32,
    pub last_intent: Option<String>,
    pub last_order: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            message_count: 0,
            last_intent: None,
            last_order: None,
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a message, dropping the oldest entries beyond `max_history`.
    pub fn record(&mut self, role: Role, message: impl Into<String>, max_history: usize) {
        self.messages.push(ChatMessage {
            role,
            message: message.into(),
            timestamp: Utc::now(),
        });
        if self.messages.len() > max_history {
            let excess = self.messages.len() - max_history;
            self.messages.drain(..excess);
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            name: self.name.clone(),
            message_count: self.message_count,
            created_at: self.created_at,
        }
    }
}

/// Session metadata returned alongside history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    pub name: Option<String>,
    pub message_count: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_caps_history() {
        let mut session = Session::new("abc");
        for i in 0..5 {
            session.record(Role::User, format!("msg {i}"), 3);
        }
        let kept: Vec<&str> = session.messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(kept, vec!["msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Bot).unwrap(), "bot");
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut session = Session::new("abc");
        session.name = Some("Ada".to_string());
        session.record(Role::User, "hello", 10);
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
