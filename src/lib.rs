pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use services::chatbot::{ChatSettings, Chatbot};
use services::intent::IntentMatcher;
use services::responder::Responder;
use services::session_store::SessionStore;

/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<Chatbot>,
    pub config: config::AppConfig,
}

impl AppState {
    /// Assemble the chatbot from config, a loaded catalog, and a session store.
    pub fn build(
        config: config::AppConfig,
        catalog: models::intent::IntentCatalog,
        sessions: SessionStore,
        responder_rng: Option<rand::rngs::StdRng>,
    ) -> Result<Self, errors::CatalogError> {
        let matcher = IntentMatcher::new(&catalog)?;
        let branding = config.branding.clone();
        let responder = match responder_rng {
            Some(rng) => {
                Responder::with_rng(catalog, branding, config.personalize_probability, rng)
            }
            None => Responder::new(catalog, branding, config.personalize_probability),
        };
        let settings = ChatSettings {
            escalation_after_messages: config.escalation_after_messages,
            max_history: config.max_history,
            support_phone: config.branding.support_phone.clone(),
        };

        Ok(Self {
            bot: Arc::new(Chatbot::new(matcher, responder, sessions, settings)),
            config,
        })
    }
}
