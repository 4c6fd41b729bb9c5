//! Chat API request and response DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::session::{ChatMessage, SessionSummary};

/// Coarse polarity of a user message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 1000, message = "must be 1 to 1000 characters"))]
    pub message: String,
    #[validate(length(min = 1, max = 128, message = "must be 1 to 128 characters"))]
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Strip surrounding whitespace from the message. Length limits apply to
    /// the trimmed text.
    pub fn trimmed(self) -> Self {
        let message = match self.message.trim() {
            t if t.len() == self.message.len() => self.message,
            t => t.to_string(),
        };
        Self { message, ..self }
    }
}

/// Bot reply for one user message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub response: String,
    pub intent: Option<String>,
    pub sentiment: Sentiment,
    pub quick_replies: Vec<String>,
    pub name: Option<String>,
    pub session_id: String,
    pub escalated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryResponse {
    pub history: Vec<ChatMessage>,
    pub session_data: Option<SessionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClearResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_rejects_long_message() {
        let req = ChatRequest {
            message: "x".repeat(1001),
            session_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn padding_does_not_count_toward_length() {
        let req = ChatRequest {
            message: format!("  {}\n", "x".repeat(1000)),
            session_id: None,
        }
        .trimmed();
        assert_eq!(req.message.len(), 1000);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_message_is_empty_after_trim() {
        let req = ChatRequest {
            message: " \t ".to_string(),
            session_id: None,
        }
        .trimmed();
        assert!(req.validate().is_err());
    }

    #[test]
    fn chat_request_rejects_empty_session_id() {
        let req = ChatRequest {
            message: "hello".to_string(),
            session_id: Some(String::new()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn chat_request_accepts_missing_session_id() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi", "sentiment": "neutral"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.session_id.is_none());
    }

    #[test]
    fn sentiment_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Sentiment::Negative).unwrap(), "negative");
    }
}
