//! Rule-based intent classification.
//!
//! Rules run in a fixed order and the first hit wins:
//! 1. self-introduction (a name can be extracted)
//! 2. order number present
//! 3. priority intents, all words of a pattern present in the message
//! 4. remaining catalog intents in catalog order, whole-word pattern match
//! 5. greeting keyword anywhere in the message
//! 6. `default`

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::CatalogError;
use crate::models::intent::{
    IntentCatalog, DEFAULT, GREETING, NAME_INTRO, ORDER_TRACKING, PRIORITY_INTENTS,
};
use crate::services::extraction;

static GREETING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:hello|hi|hey|greetings)\b").unwrap());

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w']+").unwrap());

/// A priority intent with each pattern pre-split into words.
#[derive(Debug)]
struct WordRule {
    intent: String,
    patterns: Vec<Vec<String>>,
}

/// A catalog intent with each pattern compiled to a word-boundary regex.
#[derive(Debug)]
struct BoundaryRule {
    intent: String,
    patterns: Vec<Regex>,
}

/// Precompiled matcher over an intent catalog.
#[derive(Debug)]
pub struct IntentMatcher {
    priority: Vec<WordRule>,
    ordered: Vec<BoundaryRule>,
}

impl IntentMatcher {
    pub fn new(catalog: &IntentCatalog) -> Result<Self, CatalogError> {
        let priority = PRIORITY_INTENTS
            .iter()
            .filter_map(|name| catalog.get(name).map(|d| (name, d)))
            .map(|(name, definition)| WordRule {
                intent: name.to_string(),
                patterns: definition
                    .patterns
                    .iter()
                    .map(|p| tokenize(p))
                    .filter(|words| !words.is_empty())
                    .collect(),
            })
            .collect();

        let mut ordered = Vec::new();
        for (name, definition) in catalog.iter() {
            if name == DEFAULT || PRIORITY_INTENTS.contains(&name) {
                continue;
            }
            let patterns = definition
                .patterns
                .iter()
                .map(|p| Regex::new(&format!(r"\b{}\b", regex::escape(p))))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| CatalogError::Invalid(format!("intent '{name}': {e}")))?;
            ordered.push(BoundaryRule {
                intent: name.to_string(),
                patterns,
            });
        }

        Ok(Self { priority, ordered })
    }

    /// Classify a message into an intent name.
    pub fn match_intent(&self, message: &str) -> String {
        let message = message.trim().to_lowercase();

        if extraction::extract_name(&message).is_some() {
            return NAME_INTRO.to_string();
        }

        if extraction::extract_order_number(&message).is_some() {
            return ORDER_TRACKING.to_string();
        }

        let words: HashSet<String> = tokenize(&message).into_iter().collect();
        for rule in &self.priority {
            if rule
                .patterns
                .iter()
                .any(|pattern| pattern.iter().all(|w| words.contains(w)))
            {
                return rule.intent.clone();
            }
        }

        for rule in &self.ordered {
            if rule.patterns.iter().any(|re| re.is_match(&message)) {
                return rule.intent.clone();
            }
        }

        if GREETING_RE.is_match(&message) {
            return GREETING.to_string();
        }

        DEFAULT.to_string()
    }
}

/// Lowercased word tokens with surrounding punctuation removed.
fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().trim_matches('\'').to_string())
        .filter(|w| !w.is_empty())
        .collect()
}
