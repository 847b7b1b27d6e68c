//! Record filtering applied before insight mining.

use serde::{Deserialize, Serialize};

use crate::data::{ContentItem, SourceId, SourceRecord};

/// Narrow a run to selected sources, a keyword, or a category.
///
/// Every field is optional; the default filter keeps everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    /// Allow-list of sources.
    pub sources: Option<Vec<SourceId>>,
    /// Case-insensitive substring required in the record text.
    pub keyword: Option<String>,
    /// Exact inferred category required on clustered items.
    pub category: Option<String>,
}

impl RecordFilter {
    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.sources.is_none() && self.keyword.is_none() && self.category.is_none()
    }

    /// Whether records from `source` pass the source allow-list.
    pub fn allows_source(&self, source: SourceId) -> bool {
        self.sources
            .as_ref()
            .is_none_or(|sources| sources.contains(&source))
    }

    fn keyword_matches(&self, text: &str) -> bool {
        match self.keyword.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(keyword) => text.to_lowercase().contains(&keyword.to_lowercase()),
        }
    }

    /// Records passing the source and keyword checks, in input order.
    pub fn apply_records(&self, records: &[SourceRecord]) -> Vec<SourceRecord> {
        records
            .iter()
            .filter(|record| self.allows_source(record.source) && self.keyword_matches(&record.text))
            .cloned()
            .collect()
    }

    /// Items whose inferred category matches, in input order.
    pub fn apply_items(&self, items: Vec<ContentItem>) -> Vec<ContentItem> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => items,
            Some(category) => {
                let category = category.to_lowercase();
                items
                    .into_iter()
                    .filter(|item| item.category == category)
                    .collect()
            }
        }
    }
}
