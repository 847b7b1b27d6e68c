use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engagement::EngagementLabel;

pub use crate::types::{CategoryLabel, ItemId, Term};

/// Origin tag for a trend table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    /// Music charts (streaming popularity).
    Music,
    /// Video charts (view counts).
    Video,
    /// Search-trend terms (rank only).
    SearchTrends,
    /// Social-media topics (impression volume).
    SocialTopics,
}

impl SourceId {
    /// Every source, in canonical order.
    pub const ALL: [SourceId; 4] = [
        SourceId::Music,
        SourceId::Video,
        SourceId::SearchTrends,
        SourceId::SocialTopics,
    ];

    /// Stable lower-case tag used in item ids and logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SourceId::Music => "music",
            SourceId::Video => "video",
            SourceId::SearchTrends => "search_trends",
            SourceId::SocialTopics => "social_topics",
        }
    }

    /// Sources whose text is free-form language (stop words are filtered).
    pub const fn is_natural_language(&self) -> bool {
        matches!(self, SourceId::SearchTrends | SourceId::SocialTopics)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needle = raw.trim().to_lowercase();
        SourceId::ALL
            .into_iter()
            .find(|source| source.as_str() == needle)
            .ok_or_else(|| format!("unknown source '{raw}'"))
    }
}

/// Canonical record produced by normalizing one row of a source table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// `"{source}::{row_index}"`.
    pub id: ItemId,
    /// Source the record came from.
    pub source: SourceId,
    /// Title, term, or subject with inline whitespace collapsed.
    pub text: String,
    /// Artist or channel, when the source has one.
    pub creator: Option<String>,
    /// Non-negative popularity in the source's own scale.
    pub popularity: f64,
    /// Like count, when the source reports one.
    pub likes: Option<f64>,
}

/// One item entering the clusterer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Id of the record the item came from.
    pub id: ItemId,
    /// Source the item came from.
    pub source: SourceId,
    /// Display text (title or term).
    pub text: String,
    /// Raw popularity before batch scaling.
    pub popularity: f64,
    /// Inferred category, or `other`.
    pub category: CategoryLabel,
    /// Likes-based label, when the source reports likes.
    pub engagement: Option<EngagementLabel>,
}
