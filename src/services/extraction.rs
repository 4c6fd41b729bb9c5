//! Regex-based extraction of customer names and order numbers.
//!
//! Patterns are tried in order. The first usable capture wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::services::sentiment;

static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"my name is (\w+)",
        r"i am (\w+)",
        r"i'm (\w+)",
        r"call me (\w+)",
        r"this is (\w+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static ORDER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)order\s*#?\s*(\d{5,})",
        r"(?i)#(\d{5,})",
        r"(?i)ORD-?(\d{5,})",
        r"(?i)tracking\s*#?\s*(\d{5,})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Words that follow "i am" / "this is" in ordinary sentences and are never names.
const NOT_NAMES: &[&str] = &[
    "a", "about", "afraid", "after", "all", "almost", "already", "also", "an", "around",
    "as", "at", "available", "away", "back", "busy", "calling", "checking", "concerned",
    "confused", "contacting", "currently", "done", "drunk", "fine", "finished", "for",
    "from", "going", "gone", "having", "here", "home", "hoping", "in", "interested", "it",
    "just", "late", "looking", "lost", "me", "my", "need", "new", "no", "not", "now", "ok",
    "okay", "on", "only", "out", "over", "ready", "really", "sorry", "still", "stuck",
    "sure", "that", "the", "there", "this", "trying", "unsure", "urgent", "waiting",
    "wondering", "writing", "your",
];

/// Suffixes of adjectives and gerunds ("unable", "ordering") seen after "i am".
const NOT_NAME_SUFFIXES: &[&str] = &["able", "ible", "ing"];

/// Extract a self-introduced name, capitalized.
pub fn extract_name(message: &str) -> Option<String> {
    let lowered = message.to_lowercase();

    NAME_PATTERNS.iter().find_map(|re| {
        let candidate = re.captures(&lowered)?.get(1)?.as_str();
        is_plausible_name(candidate).then(|| capitalize(candidate))
    })
}

/// Extract an order number (digits only) from a message.
pub fn extract_order_number(message: &str) -> Option<String> {
    ORDER_PATTERNS
        .iter()
        .find_map(|re| re.captures(message)?.get(1).map(|m| m.as_str().to_string()))
}

fn is_plausible_name(word: &str) -> bool {
    !word.is_empty()
        && word.chars().any(|c| c.is_alphabetic())
        && !word.chars().all(|c| c.is_ascii_digit() || c == '_')
        && !NOT_NAMES.contains(&word)
        && !NOT_NAME_SUFFIXES
            .iter()
            .any(|suffix| word.len() >= suffix.len() + 2 && word.ends_with(suffix))
        && !sentiment::is_sentiment_word(word)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}
