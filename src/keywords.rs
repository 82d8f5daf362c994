//! Word-boundary phrase matching
//!
//! Conversation text is lowercased, stripped of punctuation and collapsed to
//! single spaces before matching, so `"sue"` never matches `"issue"` and
//! `"Thank you!"` matches `"thank you"`.

/// Words that signal the customer's problem was resolved.
pub const RESOLUTION: &[&str] = &[
    "resolved",
    "solved",
    "fixed",
    "settled",
    "sorted",
    "thank you",
    "thanks",
    "satisfied",
];

/// Words that signal a scheduled callback or follow-up.
pub const CALLBACK: &[&str] = &[
    "call back",
    "callback",
    "call you back",
    "follow up",
    "get back to you",
];

/// Words that signal a hand-off to another agent or team.
pub const TRANSFER: &[&str] = &[
    "transfer",
    "transferring",
    "transferred",
    "escalate",
    "supervisor",
    "manager",
    "another department",
];

/// Words that signal the call ended without closure.
pub const DROP: &[&str] = &[
    "disconnect",
    "disconnected",
    "hung up",
    "hang up",
    "dropped",
    "call dropped",
    "ended abruptly",
    "line went dead",
];

/// Words that signal the customer intends legal action.
pub const LEGAL: &[&str] = &[
    "legal",
    "legal action",
    "lawyer",
    "attorney",
    "court",
    "sue",
    "lawsuit",
    "consumer forum",
];

pub const SATISFACTION: &[&str] = &[
    "satisfied",
    "happy",
    "great",
    "perfect",
    "excellent",
    "appreciate it",
];

pub const DISSATISFACTION: &[&str] = &[
    "dissatisfied",
    "unhappy",
    "not satisfied",
    "not happy",
    "disappointed",
];

/// Phrases that mark professional, customer-oriented agent language.
pub const PROFESSIONAL: &[&str] = &[
    "understand",
    "assist",
    "help",
    "appreciate",
    "apologies",
    "sorry",
];

/// Text prepared for word-boundary matching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    // Padded with a leading and trailing space.
    padded: String,
}

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        let words = normalize_words(text);
        Self {
            padded: format!(" {words} "),
        }
    }

    /// Join several fragments into one matchable text.
    pub fn from_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        let joined: Vec<String> = parts
            .into_iter()
            .map(normalize_words)
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            padded: format!(" {} ", joined.join(" ")),
        }
    }

    /// Whether `phrase` occurs on word boundaries.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let needle = normalize_words(phrase);
        if needle.is_empty() {
            return false;
        }
        self.padded.contains(&format!(" {needle} "))
    }

    /// Whether any phrase of `group` occurs.
    pub fn contains_any(&self, group: &[&str]) -> bool {
        group.iter().any(|phrase| self.contains_phrase(phrase))
    }

    pub fn as_str(&self) -> &str {
        self.padded.trim()
    }
}

/// Lowercase, drop apostrophes, turn other punctuation into spaces and
/// collapse whitespace.
pub fn normalize_words(text: &str) -> String {
    let mapped: String = text
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}
