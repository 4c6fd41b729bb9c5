//! Reply selection and personalization.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::Branding;
use crate::models::intent::{IntentCatalog, DEFAULT, NAME_INTRO, ORDER_TRACKING};
use crate::models::session::Session;
use crate::services::catalog::{self, FALLBACK_RESPONSE};
use crate::services::extraction;

pub struct Responder {
    catalog: IntentCatalog,
    branding: Branding,
    personalize_probability: f64,
    rng: Mutex<StdRng>,
}

impl Responder {
    pub fn new(catalog: IntentCatalog, branding: Branding, personalize_probability: f64) -> Self {
        Self::with_rng(
            catalog,
            branding,
            personalize_probability,
            StdRng::from_entropy(),
        )
    }

    /// Build with a caller-supplied RNG, for reproducible replies.
    pub fn with_rng(
        catalog: IntentCatalog,
        branding: Branding,
        personalize_probability: f64,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog,
            branding,
            personalize_probability: if personalize_probability.is_finite() {
                personalize_probability.clamp(0.0, 1.0)
            } else {
                0.0
            },
            rng: Mutex::new(rng),
        }
    }

    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    /// Produce the reply for a classified message, updating session facts.
    pub fn respond(&self, intent: &str, session: &mut Session, message: &str) -> String {
        match intent {
            NAME_INTRO => {
                if let Some(name) = extraction::extract_name(message) {
                    let reply = format!("Nice to meet you, {name}! 🎉 How can I help you today?");
                    session.name = Some(name);
                    return reply;
                }
            }
            ORDER_TRACKING => {
                if let Some(order) = extraction::extract_order_number(message) {
                    let reply = format!(
                        "Let me check order #{order} for you... 📦 It's currently being processed and will ship within 2 business days."
                    );
                    session.last_order = Some(order);
                    return reply;
                }
            }
            _ => {}
        }

        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let responses = self
            .catalog
            .get(intent)
            .filter(|_| intent != DEFAULT)
            .or_else(|| self.catalog.get(DEFAULT))
            .map(|d| d.responses.as_slice())
            .unwrap_or_default();
        let template = responses
            .choose(&mut *rng)
            .map(String::as_str)
            .unwrap_or(FALLBACK_RESPONSE);
        let reply = catalog::render(template, &self.branding);

        match &session.name {
            Some(name) if rng.gen_bool(self.personalize_probability) => personalize(name, &reply),
            _ => reply,
        }
    }
}

/// Prefix a reply with the customer's name, lowercasing its first character.
fn personalize(name: &str, reply: &str) -> String {
    let mut chars = reply.chars();
    match chars.next() {
        Some(first) => format!("{name}, {}{}", first.to_lowercase(), chars.as_str()),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::intent::IntentDefinition;

    fn catalog() -> IntentCatalog {
        let mut catalog = IntentCatalog::new();
        catalog.insert(
            "hours",
            IntentDefinition {
                patterns: vec!["hours".to_string()],
                responses: vec!["We open at 9. Call {phone}.".to_string()],
            },
        );
        catalog.insert(
            DEFAULT,
            IntentDefinition {
                patterns: vec![],
                responses: vec!["Sorry, say again?".to_string()],
            },
        );
        catalog
    }

    fn responder(probability: f64) -> Responder {
        Responder::with_rng(
            catalog(),
            Branding::default(),
            probability,
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn name_intro_stores_name() {
        let mut session = Session::new("s1");
        let reply = responder(0.0).respond(NAME_INTRO, &mut session, "my name is dana");
        assert_eq!(reply, "Nice to meet you, Dana! 🎉 How can I help you today?");
        assert_eq!(session.name.as_deref(), Some("Dana"));
    }

    #[test]
    fn order_tracking_stores_order() {
        let mut session = Session::new("s1");
        let reply = responder(0.0).respond(ORDER_TRACKING, &mut session, "order #123456");
        assert!(reply.starts_with("Let me check order #123456 for you"));
        assert_eq!(session.last_order.as_deref(), Some("123456"));
    }

    #[test]
    fn known_intent_renders_template() {
        let mut session = Session::new("s1");
        let reply = responder(0.0).respond("hours", &mut session, "hours?");
        assert_eq!(reply, "We open at 9. Call 1-800-123-4567.");
    }

    #[test]
    fn unknown_intent_uses_default() {
        let mut session = Session::new("s1");
        assert_eq!(
            responder(0.0).respond("greeting", &mut session, "yo"),
            "Sorry, say again?"
        );
    }

    #[test]
    fn known_name_personalizes_when_certain() {
        let mut session = Session::new("s1");
        session.name = Some("Dana".to_string());
        let reply = responder(1.0).respond("hours", &mut session, "hours?");
        assert_eq!(reply, "Dana, we open at 9. Call 1-800-123-4567.");
    }

    #[test]
    fn non_finite_probability_never_personalizes() {
        for probability in [f64::NAN, f64::INFINITY] {
            let mut session = Session::new("s1");
            session.name = Some("Dana".to_string());
            let reply = responder(probability).respond("hours", &mut session, "hours?");
            assert_eq!(reply, "We open at 9. Call 1-800-123-4567.");
        }
    }

    #[test]
    fn name_intro_is_not_prefixed() {
        let mut session = Session::new("s1");
        session.name = Some("Old".to_string());
        let reply = responder(1.0).respond(NAME_INTRO, &mut session, "call me Sam");
        assert!(reply.starts_with("Nice to meet you, Sam!"));
    }

    #[test]
    fn personalize_handles_empty_reply() {
        assert_eq!(personalize("Dana", ""), "Dana");
    }
}
