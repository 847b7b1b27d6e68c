//! Basket (transaction) construction for frequent-itemset mining.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::SourceRecord;
use crate::errors::InsightError;
use crate::types::Term;
use crate::utils::{StopWords, normalize_term};

/// A non-empty set of distinct terms observed together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    items: Vec<Term>,
}

impl Basket {
    /// Build from one window; duplicate terms collapse, first occurrence order kept.
    fn from_window(window: &[Term]) -> Self {
        let mut items: Vec<Term> = Vec::with_capacity(window.len());
        for term in window {
            if !items.contains(term) {
                items.push(term.clone());
            }
        }
        Self { items }
    }

    /// Terms in window order.
    pub fn items(&self) -> &[Term] {
        &self.items
    }

    /// Whether `term` occurs in this basket.
    pub fn contains(&self, term: &str) -> bool {
        self.items.iter().any(|item| item == term)
    }

    /// Number of terms in the basket.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Terms contributed by one source's records.
///
/// Text is lower-cased and whitespace-normalized. When `filter_stop_words` is
/// set, stop-word tokens are removed; terms that end up empty are dropped.
pub fn basket_terms(
    records: &[SourceRecord],
    stop_words: &StopWords,
    filter_stop_words: bool,
) -> Vec<Term> {
    records
        .iter()
        .map(|record| {
            if filter_stop_words {
                stop_words.filter(&record.text)
            } else {
                normalize_term(&record.text)
            }
        })
        .filter(|term| !term.is_empty())
        .collect()
}

/// Concatenate `term_lists` in order and cut them into non-overlapping windows
/// of `group_size` terms. A trailing window shorter than `group_size` is
/// dropped, so the basket count is `floor(total_terms / group_size)`.
pub fn build_baskets(
    term_lists: &[Vec<Term>],
    group_size: usize,
) -> Result<Vec<Basket>, InsightError> {
    if group_size == 0 {
        return Err(InsightError::Configuration(
            "basket group size must be at least 1".to_string(),
        ));
    }
    let terms: Vec<Term> = term_lists
        .iter()
        .flatten()
        .map(normalize_term)
        .filter(|term| !term.is_empty())
        .collect();
    let baskets: Vec<Basket> = terms
        .chunks_exact(group_size)
        .map(Basket::from_window)
        .collect();
    debug!(
        "[trendmine:baskets] {} terms from {} lists -> {} baskets (group size {})",
        terms.len(),
        term_lists.len(),
        baskets.len(),
        group_size
    );
    Ok(baskets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SourceId;

    fn terms(raw: &[&str]) -> Vec<Term> {
        raw.iter().map(|term| term.to_string()).collect()
    }

    fn record(source: SourceId, idx: usize, text: &str) -> SourceRecord {
        SourceRecord {
            id: format!("{source}::{idx}"),
            source,
            text: text.to_string(),
            creator: None,
            popularity: 1.0,
            likes: None,
        }
    }

    #[test]
    fn windows_walk_concatenated_lists() {
        let baskets = build_baskets(
            &[
                terms(&["musica", "festival", "show", "musica"]),
                terms(&["show", "turne", "musica", "evento"]),
            ],
            2,
        )
        .unwrap();
        let items: Vec<Vec<&str>> = baskets
            .iter()
            .map(|basket| basket.items().iter().map(String::as_str).collect())
            .collect();
        assert_eq!(
            items,
            vec![
                vec!["musica", "festival"],
                vec!["show", "musica"],
                vec!["show", "turne"],
                vec!["musica", "evento"],
            ]
        );
    }

    #[test]
    fn trailing_remainder_is_dropped() {
        let baskets = build_baskets(&[terms(&["a", "b", "c"]), terms(&["d", "e"])], 2).unwrap();
        assert_eq!(baskets.len(), 2);
        let baskets = build_baskets(&[terms(&["a", "b", "c", "d", "e"])], 3).unwrap();
        assert_eq!(baskets.len(), 1);
    }

    #[test]
    fn fewer_terms_than_group_yield_nothing() {
        assert!(build_baskets(&[terms(&["solo"])], 2).unwrap().is_empty());
        assert!(build_baskets(&[], 2).unwrap().is_empty());
    }

    #[test]
    fn zero_group_size_is_rejected() {
        let err = build_baskets(&[terms(&["a", "b"])], 0).unwrap_err();
        assert!(matches!(err, InsightError::Configuration(_)));
    }

    #[test]
    fn duplicate_terms_in_a_window_collapse() {
        let baskets = build_baskets(&[terms(&["Show", "show "])], 2).unwrap();
        assert_eq!(baskets.len(), 1);
        assert_eq!(baskets[0].items(), &["show".to_string()]);
        assert!(!baskets[0].is_empty());
    }

    #[test]
    fn basket_terms_filter_stop_words_on_request() {
        let records = vec![
            record(SourceId::SocialTopics, 0, "O Show da Virada"),
            record(SourceId::SocialTopics, 1, "de"),
        ];
        let stop = StopWords::default();
        assert_eq!(basket_terms(&records, &stop, true), vec!["show virada"]);
        assert_eq!(
            basket_terms(&records, &stop, false),
            vec!["o show da virada", "de"]
        );
    }
}
