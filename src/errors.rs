use std::io;

use thiserror::Error;

use crate::data::SourceId;

/// Error type for configuration, mining, clustering, and input-shape failures.
///
/// Empty inputs and thresholds that filter everything out are *not* errors;
/// those surface as explicit "no insight" outcomes instead.
#[derive(Debug, Error)]
pub enum InsightError {
    /// A parameter is outside its valid range.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A non-empty table has no row carrying any text column.
    #[error("source '{source_id}' table has no '{column}' column")]
    MissingColumn {
        /// Source of the table.
        source_id: SourceId,
        /// Preferred text column.
        column: String,
    },
    /// A vocabulary keyword could not be compiled.
    #[error("genre keyword '{keyword}' for source '{source_id}' is invalid: {reason}")]
    InvalidKeyword {
        /// Source the keyword belongs to.
        source_id: SourceId,
        /// Keyword as configured.
        keyword: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The itemset search exceeded its candidate budget.
    #[error("association mining failed: {0}")]
    Mining(String),
    /// Clustering features were unusable.
    #[error("clustering failed: {0}")]
    Clustering(String),
    /// Reading a configuration or table file failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// JSON input could not be parsed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
