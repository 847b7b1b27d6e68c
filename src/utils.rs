//! Text normalization helpers shared by the normalizer, basket builder, and genre inferencer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::stop_words::DEFAULT_STOP_WORDS;
use crate::types::Term;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Lower-case and whitespace-normalize a term.
pub fn normalize_term<T: AsRef<str>>(text: T) -> Term {
    normalize_inline_whitespace(text.as_ref().to_lowercase())
}

/// Lower-cased stop-word set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOP_WORDS.iter().copied())
    }
}

impl StopWords {
    /// Build a set from arbitrary words (lower-cased, blanks dropped).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| normalize_term(word))
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    /// An empty set (nothing filtered).
    pub fn none() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    /// Whether `word` is a stop word (exact, lowercase).
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Lower-case `text` and drop stop-word tokens, keeping token order.
    pub fn filter(&self, text: &str) -> Term {
        normalize_term(text)
            .split(' ')
            .filter(|token| !token.is_empty() && !self.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
