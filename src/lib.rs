#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Basket (transaction) construction from source terms.
pub mod baskets;
/// Caller-owned report cache keyed by input content.
pub mod cache;
/// Feature scaling, category encoding, and k-means clustering.
pub mod cluster;
/// Run configuration types.
pub mod config;
/// Centralized constants used across normalization, mining, and clustering.
pub mod constants;
/// Source ids, normalized records, and content items.
pub mod data;
/// Likes-based engagement labels.
pub mod engagement;
/// Reusable demo runner shared by the bundled demos.
pub mod example_apps;
/// Source, keyword, and category filters.
pub mod filters;
/// Keyword-driven genre inference.
pub mod genre;
mod hash;
/// Display-ready insight sets and the run report.
pub mod insights;
/// Source-mix statistics.
pub mod metrics;
/// Apriori frequent itemsets and association rules.
pub mod mining;
/// Raw table to `SourceRecord` normalization.
pub mod normalize;
/// End-to-end insight engine.
pub mod pipeline;
/// Raw source tables and column mappings.
pub mod source;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;

mod errors;

pub use baskets::{Basket, basket_terms, build_baskets};
pub use cache::{CachedReport, InsightCache};
pub use cluster::{
    CategoryEncoder, ClusterAssignment, ClusterOutcome, ClusterSummary, Clusterer, ItemFeatures,
    min_max_scale,
};
pub use config::{BasketConfig, ClusterConfig, InsightConfig, KSelection, MiningConfig};
pub use data::{ContentItem, SourceId, SourceRecord};
pub use engagement::{EngagementLabel, label_by_likes};
pub use errors::InsightError;
pub use filters::RecordFilter;
pub use genre::{GenreInferencer, GenreVocabulary};
pub use insights::{
    ClusterInsight, InsightReport, InsightStatus, RuleInsight, SourceTopItems, cluster_insights,
    rule_insights, top_items,
};
pub use mining::{
    AssociationMiner, AssociationRule, FrequentItemset, MiningOutcome, MiningReport,
    NoInsightReason,
};
pub use normalize::normalize_table;
pub use pipeline::InsightEngine;
pub use source::{ColumnMapping, PopularityField, RawRow, RawTable};
pub use types::{CategoryLabel, ClusterLabel, ItemId, Term};
pub use utils::StopWords;
