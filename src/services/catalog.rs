//! Intent catalog loading, normalization, and response templating.

use std::io::ErrorKind;
use std::path::Path;

use crate::config::Branding;
use crate::errors::CatalogError;
use crate::models::intent::{IntentCatalog, IntentDefinition, DEFAULT, GREETING};

/// Reply used when the catalog has no usable default intent.
pub const FALLBACK_RESPONSE: &str = "I'm not sure about that. Can you rephrase?";

/// Load the catalog from a JSON file.
///
/// A missing file yields [`builtin_catalog`] so the bot still answers basic
/// questions. Any other I/O or parse failure is returned.
pub fn load(path: impl AsRef<Path>) -> Result<IntentCatalog, CatalogError> {
    let path = path.as_ref();
    let catalog = match std::fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str::<IntentCatalog>(&raw)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Response catalog not found, using built-in defaults");
            builtin_catalog()
        }
        Err(e) => return Err(e.into()),
    };

    let catalog = normalize(catalog)?;
    tracing::info!(
        path = %path.display(),
        intents = ?catalog.names(),
        "Loaded response catalog"
    );
    Ok(catalog)
}

/// Clean up a parsed catalog: lowercase and trim patterns, drop blanks, ensure a default.
pub fn normalize(mut catalog: IntentCatalog) -> Result<IntentCatalog, CatalogError> {
    catalog.for_each_mut(|_, definition| {
        definition.patterns = definition
            .patterns
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        definition.responses.retain(|r| !r.trim().is_empty());
    });

    if let Some((name, _)) = catalog.iter().find(|(n, d)| *n != DEFAULT && d.responses.is_empty()) {
        return Err(CatalogError::Invalid(format!(
            "intent '{name}' has no responses"
        )));
    }

    let has_default = catalog
        .get(DEFAULT)
        .is_some_and(|d| !d.responses.is_empty());
    if !has_default {
        tracing::warn!("Catalog has no default responses, inserting fallback");
        catalog.insert(
            DEFAULT,
            IntentDefinition {
                patterns: Vec::new(),
                responses: vec![FALLBACK_RESPONSE.to_string()],
            },
        );
    }

    Ok(catalog)
}

/// Minimal catalog used when no catalog file exists.
pub fn builtin_catalog() -> IntentCatalog {
    let mut catalog = IntentCatalog::new();
    catalog.insert(
        GREETING,
        definition(
            &["hello", "hi", "hey", "good morning", "good afternoon", "good evening"],
            &["Hello! 👋 How can I help you today?"],
        ),
    );
    catalog.insert(
        "return",
        definition(
            &["return", "refund", "exchange", "send back"],
            &["You can return items within 30 days of purchase."],
        ),
    );
    catalog.insert(DEFAULT, definition(&[], &[FALLBACK_RESPONSE]));
    catalog
}

/// Full sample catalog written by the `seed` binary.
pub fn sample_catalog() -> IntentCatalog {
    let mut catalog = IntentCatalog::new();
    catalog.insert(
        GREETING,
        definition(
            &["hello", "hi", "hey", "good morning", "good afternoon", "good evening", "greetings"],
            &[
                "Hello! 👋 How can I help you today?",
                "Hi there! Welcome to {company}. What can I do for you?",
                "Hey! I'm {bot}, your support assistant. How can I help?",
            ],
        ),
    );
    catalog.insert(
        "hours",
        definition(
            &["hours", "open", "opening", "close", "closing", "store hours", "when are you open"],
            &[
                "We're open Monday to Friday 9am-8pm and weekends 10am-6pm.",
                "Our store hours are 9am-8pm on weekdays and 10am-6pm on weekends.",
            ],
        ),
    );
    catalog.insert(
        "return",
        definition(
            &["return", "exchange", "send back", "return policy"],
            &[
                "You can return items within 30 days of purchase with the original receipt.",
                "Returns are accepted within 30 days. Start one from your order page or reply 'start a return'.",
            ],
        ),
    );
    catalog.insert(
        "refund",
        definition(
            &["refund", "money back", "refund status"],
            &["Refunds are issued to the original payment method within 5-7 business days after we receive the item."],
        ),
    );
    catalog.insert(
        "shipping",
        definition(
            &["shipping", "delivery", "ship", "deliver", "shipping info", "shipping cost"],
            &[
                "Standard shipping takes 3-5 business days. Orders over $50 ship free!",
                "We offer standard (3-5 days) and express (1-2 days) shipping.",
            ],
        ),
    );
    catalog.insert(
        "payment",
        definition(
            &["payment", "pay", "credit card", "paypal", "installments", "gift card"],
            &["We accept all major credit cards, PayPal, gift cards, and installment plans."],
        ),
    );
    catalog.insert(
        "contact",
        definition(
            &["contact", "phone", "email", "call", "human", "agent", "contact us"],
            &["You can reach us at {phone} or {email}. We're happy to help!"],
        ),
    );
    catalog.insert(
        "thanks",
        definition(
            &["thanks", "thank you", "thx", "appreciate it"],
            &["You're welcome! 😊 Anything else I can help with?", "Happy to help!"],
        ),
    );
    catalog.insert(
        "goodbye",
        definition(
            &["bye", "goodbye", "see you", "that's all"],
            &["Goodbye! Thanks for contacting {company}. 👋", "Take care! Come back anytime."],
        ),
    );
    catalog.insert(
        DEFAULT,
        definition(
            &[],
            &[
                FALLBACK_RESPONSE,
                "Sorry, I didn't catch that. You can ask about hours, returns, shipping, or payments.",
            ],
        ),
    );
    catalog
}

/// Substitute `{company}`, `{bot}`, `{email}`, and `{phone}` placeholders.
pub fn render(template: &str, branding: &Branding) -> String {
    template
        .replace("{company}", &branding.company_name)
        .replace("{bot}", &branding.bot_name)
        .replace("{email}", &branding.support_email)
        .replace("{phone}", &branding.support_phone)
}

fn definition(patterns: &[&str], responses: &[&str]) -> IntentDefinition {
    IntentDefinition {
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        responses: responses.iter().map(|r| r.to_string()).collect(),
    }
}
