//! Suggested follow-up buttons per intent.

const DEFAULT_REPLIES: [&str; 4] = ["Store hours", "Return policy", "Shipping info", "Contact us"];

/// Suggestions offered when the bot proposes a human agent.
pub const ESCALATION_REPLIES: [&str; 3] = ["Yes please", "No thanks", "Continue chat"];

/// Quick replies for an intent. Unknown intents get the default set.
pub fn for_intent(intent: &str, support_phone: &str) -> Vec<String> {
    let replies: &[&str] = match intent {
        "greeting" => &DEFAULT_REPLIES,
        "hours" => &["Weekend hours", "Holiday hours", "Location hours"],
        "return" => &["Start a return", "Return policy", "Exchange item", "Refund status"],
        "shipping" => &["Track my order", "Shipping cost", "Delivery time", "Free shipping"],
        "payment" => &["Credit card", "PayPal", "Installments", "Gift card"],
        "contact" => {
            return [support_phone, "Email support", "Live chat", "Call me"]
                .iter()
                .map(|s| s.to_string())
                .collect();
        }
        "thanks" => &["You're welcome!", "Any other questions?", "Have a great day!"],
        "goodbye" => &["Thanks for chatting!", "Come back soon!", "Rate your experience"],
        _ => &DEFAULT_REPLIES,
    };
    replies.iter().map(|s| s.to_string()).collect()
}

pub fn escalation() -> Vec<String> {
    ESCALATION_REPLIES.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_leads_with_support_phone() {
        let replies = for_intent("contact", "555-0100");
        assert_eq!(replies[0], "555-0100");
        assert_eq!(replies.len(), 4);
    }

    #[test]
    fn unknown_intent_gets_defaults() {
        assert_eq!(for_intent("order_tracking", "x"), for_intent("default", "x"));
        assert_eq!(for_intent("default", "x")[0], "Store hours");
    }

    #[test]
    fn escalation_offers_agent_choices() {
        assert_eq!(escalation(), vec!["Yes please", "No thanks", "Continue chat"]);
    }
}
