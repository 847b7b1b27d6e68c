use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::types::CategoryLabel;

/// Maps category labels to integer codes `0..C` in first-appearance order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryEncoder {
    labels: IndexSet<CategoryLabel>,
}

impl CategoryEncoder {
    /// An encoder with no categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode every label of a batch in order.
    pub fn fit<'a, I>(labels: I) -> (Self, Vec<usize>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut encoder = Self::new();
        let codes = labels.into_iter().map(|label| encoder.encode(label)).collect();
        (encoder, codes)
    }

    /// Code for `label`, assigning the next free code on first sight.
    pub fn encode(&mut self, label: &str) -> usize {
        if let Some(code) = self.labels.get_index_of(label) {
            return code;
        }
        self.labels.insert_full(label.to_string()).0
    }

    /// Code previously assigned to `label`.
    pub fn code(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    /// Category carrying `code`.
    pub fn label(&self, code: usize) -> Option<&CategoryLabel> {
        self.labels.get_index(code)
    }

    /// Categories in code order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryLabel> {
        self.labels.iter()
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no category has been seen.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
