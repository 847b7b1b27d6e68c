use serde::{Deserialize, Serialize};

use crate::constants::normalize::{
    MUSIC_CREATOR_COLUMNS, MUSIC_POPULARITY_COLUMNS, MUSIC_TEXT_COLUMNS, SEARCH_TEXT_COLUMNS,
    SOCIAL_POPULARITY_COLUMNS, SOCIAL_TEXT_COLUMNS, VIDEO_CREATOR_COLUMNS, VIDEO_LIKES_COLUMNS,
    VIDEO_POPULARITY_COLUMNS, VIDEO_TEXT_COLUMNS,
};
use crate::data::SourceId;
use crate::types::ColumnName;

/// Where a record's popularity comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularityField {
    /// First present column among the candidates.
    Columns(Vec<ColumnName>),
    /// Derived from row position: `row_count - row_index` (first row is highest).
    Rank,
}

/// Column names a source table is read through. Candidates are tried in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Text column candidates, first present wins.
    pub text: Vec<ColumnName>,
    /// Artist or channel column candidates.
    #[serde(default)]
    pub creator: Vec<ColumnName>,
    /// Where popularity comes from.
    pub popularity: PopularityField,
    /// Like-count column candidates.
    #[serde(default)]
    pub likes: Vec<ColumnName>,
}

fn names(columns: &[&str]) -> Vec<ColumnName> {
    columns.iter().map(|name| name.to_string()).collect()
}

impl ColumnMapping {
    /// Default mapping for `source`, accepting both English and Portuguese headers.
    pub fn for_source(source: SourceId) -> Self {
        match source {
            SourceId::Music => Self {
                text: names(MUSIC_TEXT_COLUMNS),
                creator: names(MUSIC_CREATOR_COLUMNS),
                popularity: PopularityField::Columns(names(MUSIC_POPULARITY_COLUMNS)),
                likes: Vec::new(),
            },
            SourceId::Video => Self {
                text: names(VIDEO_TEXT_COLUMNS),
                creator: names(VIDEO_CREATOR_COLUMNS),
                popularity: PopularityField::Columns(names(VIDEO_POPULARITY_COLUMNS)),
                likes: names(VIDEO_LIKES_COLUMNS),
            },
            SourceId::SearchTrends => Self {
                text: names(SEARCH_TEXT_COLUMNS),
                creator: Vec::new(),
                popularity: PopularityField::Rank,
                likes: Vec::new(),
            },
            SourceId::SocialTopics => Self {
                text: names(SOCIAL_TEXT_COLUMNS),
                creator: Vec::new(),
                popularity: PopularityField::Columns(names(SOCIAL_POPULARITY_COLUMNS)),
                likes: Vec::new(),
            },
        }
    }

    /// Replace the text column candidates.
    pub fn with_text_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnName>,
    {
        self.text = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the popularity source.
    pub fn with_popularity(mut self, popularity: PopularityField) -> Self {
        self.popularity = popularity;
        self
    }

    /// Name reported when no text column is present.
    pub fn primary_text_column(&self) -> &str {
        self.text.first().map(String::as_str).unwrap_or("text")
    }
}
