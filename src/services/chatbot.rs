//! Conversation flow: session bookkeeping, sentiment escalation, intent and reply.

use crate::errors::AppError;
use crate::models::chat::{ChatReply, HistoryResponse, Sentiment};
use crate::models::session::{Role, Session};
use crate::services::intent::IntentMatcher;
use crate::services::quick_replies;
use crate::services::responder::Responder;
use crate::services::sentiment;
use crate::services::session_store::SessionStore;

/// Offer made when a customer keeps writing negatively.
pub const ESCALATION_MESSAGE: &str =
    "I notice you seem frustrated. Would you like me to connect you with a human agent? 🤝";

/// Tunables for the conversation flow.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub escalation_after_messages: u32,
    pub max_history: usize,
    pub support_phone: String,
}

pub struct Chatbot {
    matcher: IntentMatcher,
    responder: Responder,
    sessions: SessionStore,
    settings: ChatSettings,
}

impl Chatbot {
    pub fn new(
        matcher: IntentMatcher,
        responder: Responder,
        sessions: SessionStore,
        settings: ChatSettings,
    ) -> Self {
        Self {
            matcher,
            responder,
            sessions,
            settings,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn intent_count(&self) -> usize {
        self.responder.catalog().len()
    }

    /// Handle one user message within a session.
    pub async fn handle(&self, session_id: &str, message: &str) -> Result<ChatReply, AppError> {
        let mut session = self
            .sessions
            .load(session_id)
            .await?
            .unwrap_or_else(|| Session::new(session_id));

        session.message_count += 1;
        session.record(Role::User, message, self.settings.max_history);

        let sentiment = sentiment::analyze(message);

        if sentiment == Sentiment::Negative
            && session.message_count > self.settings.escalation_after_messages
        {
            tracing::info!(
                session_id = %session.id,
                message_count = session.message_count,
                "Negative sentiment, offering human agent"
            );
            self.sessions.save(&session).await?;
            return Ok(ChatReply {
                response: ESCALATION_MESSAGE.to_string(),
                intent: None,
                sentiment,
                quick_replies: quick_replies::escalation(),
                name: session.name,
                session_id: session.id,
                escalated: true,
            });
        }

        let intent = self.matcher.match_intent(message);
        tracing::debug!(
            session_id = %session.id,
            intent = %intent,
            sentiment = ?sentiment,
            "Matched intent"
        );

        let response = self.responder.respond(&intent, &mut session, message);
        session.last_intent = Some(intent.clone());
        session.record(Role::Bot, response.clone(), self.settings.max_history);
        self.sessions.save(&session).await?;

        Ok(ChatReply {
            response,
            quick_replies: quick_replies::for_intent(&intent, &self.settings.support_phone),
            intent: Some(intent),
            sentiment,
            name: session.name,
            session_id: session.id,
            escalated: false,
        })
    }

    /// Conversation history for a session. Unknown sessions yield an empty history.
    pub async fn history(&self, session_id: &str) -> Result<HistoryResponse, AppError> {
        Ok(match self.sessions.load(session_id).await? {
            Some(session) => HistoryResponse {
                session_data: Some(session.summary()),
                history: session.messages,
            },
            None => HistoryResponse {
                history: Vec::new(),
                session_data: None,
            },
        })
    }

    /// Forget a session.
    pub async fn clear(&self, session_id: &str) -> Result<bool, AppError> {
        let removed = self.sessions.remove(session_id).await?;
        tracing::debug!(session_id = %session_id, removed, "Cleared session");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Branding;
    use crate::services::catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn chatbot() -> Chatbot {
        let catalog = catalog::normalize(catalog::sample_catalog()).unwrap();
        let matcher = IntentMatcher::new(&catalog).unwrap();
        let responder =
            Responder::with_rng(catalog, Branding::default(), 0.0, StdRng::seed_from_u64(1));
        Chatbot::new(
            matcher,
            responder,
            SessionStore::memory(Duration::from_secs(3600)),
            ChatSettings {
                escalation_after_messages: 3,
                max_history: 50,
                support_phone: "1-800-123-4567".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn name_is_remembered_across_messages() {
        let bot = chatbot();
        let first = bot.handle("s1", "Hi, my name is Priya").await.unwrap();
        assert_eq!(first.intent.as_deref(), Some("name_intro"));
        assert_eq!(first.name.as_deref(), Some("Priya"));

        let second = bot.handle("s1", "what are your hours").await.unwrap();
        assert_eq!(second.intent.as_deref(), Some("hours"));
        assert_eq!(second.name.as_deref(), Some("Priya"));
        assert_eq!(second.quick_replies[0], "Weekend hours");
    }

    #[tokio::test]
    async fn history_records_both_sides() {
        let bot = chatbot();
        bot.handle("s1", "hello").await.unwrap();
        let history = bot.history("s1").await.unwrap();
        assert_eq!(history.history.len(), 2);
        assert_eq!(history.history[0].role, Role::User);
        assert_eq!(history.history[1].role, Role::Bot);
        assert_eq!(history.session_data.unwrap().message_count, 1);
    }

    #[tokio::test]
    async fn early_negative_message_is_not_escalated() {
        let bot = chatbot();
        let reply = bot.handle("s1", "this is terrible").await.unwrap();
        assert_eq!(reply.sentiment, Sentiment::Negative);
        assert!(!reply.escalated);
    }

    #[tokio::test]
    async fn negative_after_threshold_escalates_without_bot_history() {
        let bot = chatbot();
        for msg in ["hello", "shipping?", "payment options"] {
            bot.handle("s1", msg).await.unwrap();
        }
        let reply = bot.handle("s1", "this is awful and useless").await.unwrap();
        assert!(reply.escalated);
        assert_eq!(reply.response, ESCALATION_MESSAGE);
        assert_eq!(reply.quick_replies, vec!["Yes please", "No thanks", "Continue chat"]);
        assert!(reply.intent.is_none());

        let history = bot.history("s1").await.unwrap();
        // 3 exchanges plus the unanswered user message
        assert_eq!(history.history.len(), 7);
        assert_eq!(history.history.last().unwrap().role, Role::User);
    }

    #[tokio::test]
    async fn order_number_is_tracked() {
        let bot = chatbot();
        let reply = bot.handle("s1", "Where is ORD-555123?").await.unwrap();
        assert_eq!(reply.intent.as_deref(), Some("order_tracking"));
        let session = bot.sessions().load("s1").await.unwrap().unwrap();
        assert_eq!(session.last_order.as_deref(), Some("555123"));
        assert_eq!(session.last_intent.as_deref(), Some("order_tracking"));
    }

    #[tokio::test]
    async fn clear_forgets_session() {
        let bot = chatbot();
        bot.handle("s1", "hello").await.unwrap();
        assert!(bot.clear("s1").await.unwrap());
        let history = bot.history("s1").await.unwrap();
        assert!(history.history.is_empty());
        assert!(history.session_data.is_none());
        assert!(!bot.clear("s1").await.unwrap());
    }
}
