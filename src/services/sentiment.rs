//! Lexicon-based sentiment scoring.
//!
//! Each known word carries a polarity in [-1, 1]. An intensifier before a
//! polar word scales it, a negation flips and halves it. Modifiers only reach
//! a polar word within the same sentence and a few words of it. The message
//! polarity is the mean of the scored words.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::chat::Sentiment;

/// Polarity above which a message counts as positive.
const POSITIVE_THRESHOLD: f32 = 0.3;

/// Polarity below which a message counts as negative.
const NEGATIVE_THRESHOLD: f32 = -0.3;

/// Multiplier applied to a polar word preceded by a negation.
const NEGATION_FACTOR: f32 = -0.5;

/// Neutral words allowed between a modifier and the polar word it applies to.
const MODIFIER_WINDOW: usize = 2;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?|[.!?;]").unwrap());

const LEXICON: &[(&str, f32)] = &[
    // positive
    ("amazing", 0.6),
    ("appreciate", 0.5),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("brilliant", 0.9),
    ("cool", 0.35),
    ("delighted", 0.7),
    ("easy", 0.43),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.6),
    ("love", 0.5),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleased", 0.5),
    ("quick", 0.33),
    ("satisfied", 0.5),
    ("super", 0.33),
    ("thank", 0.2),
    ("thanks", 0.2),
    ("wonderful", 1.0),
    // negative
    ("angry", -0.5),
    ("annoyed", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("broken", -0.4),
    ("damaged", -0.5),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("disgusting", -1.0),
    ("dissatisfied", -0.5),
    ("frustrated", -0.7),
    ("frustrating", -0.6),
    ("furious", -0.9),
    ("garbage", -0.8),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("late", -0.3),
    ("mad", -0.6),
    ("missing", -0.2),
    ("pathetic", -1.0),
    ("poor", -0.4),
    ("ridiculous", -0.33),
    ("rude", -0.6),
    ("sad", -0.5),
    ("scam", -0.8),
    ("slow", -0.3),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("unacceptable", -0.7),
    ("unhappy", -0.6),
    ("upset", -0.5),
    ("useless", -0.5),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f32)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("really", 1.2),
    ("so", 1.3),
    ("totally", 1.3),
    ("very", 1.3),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't", "won't",
    "can't", "cannot", "hardly",
];

/// Polarity of a single word, if it is in the lexicon.
pub fn word_polarity(word: &str) -> Option<f32> {
    LEXICON
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, p)| *p)
}

/// Whether the word carries or modifies sentiment (polar word, intensifier, negation).
pub fn is_sentiment_word(word: &str) -> bool {
    let word = word.to_lowercase();
    word_polarity(&word).is_some()
        || intensifier(&word).is_some()
        || NEGATIONS.contains(&word.as_str())
}

/// Compute message polarity in [-1, 1]. Returns 0.0 when no polar word is present.
pub fn polarity(message: &str) -> f32 {
    let lowered = message.to_lowercase();
    let mut scores: Vec<f32> = Vec::new();
    let mut negated = false;
    let mut intensity = 1.0_f32;
    let mut gap = 0_usize;

    for token in TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()) {
        if NEGATIONS.contains(&token) {
            negated = true;
            gap = 0;
            continue;
        }

        if let Some(factor) = intensifier(token) {
            intensity *= factor;
            gap = 0;
            continue;
        }

        if let Some(p) = word_polarity(token) {
            let mut score = p * intensity;
            if negated {
                score *= NEGATION_FACTOR;
            }
            scores.push(score.clamp(-1.0, 1.0));
            negated = false;
            intensity = 1.0;
            continue;
        }

        // sentence end, or too far from the modifier
        gap += 1;
        if matches!(token, "." | "!" | "?" | ";") || gap > MODIFIER_WINDOW {
            negated = false;
            intensity = 1.0;
        }
    }

    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f32>() / scores.len() as f32
}

fn intensifier(word: &str) -> Option<f32> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, f)| *f)
}

/// Classify a message as positive, neutral, or negative.
pub fn analyze(message: &str) -> Sentiment {
    let score = polarity(message);
    if score > POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if score < NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
