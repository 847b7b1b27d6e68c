use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::baskets::DEFAULT_GROUP_SIZE;
use crate::constants::cluster::{DEFAULT_K, ITEMS_PER_CLUSTER, MAX_AUTO_K, MAX_ITERATIONS};
use crate::constants::engagement::DEFAULT_LIKES_THRESHOLD;
use crate::constants::insights::{
    DEFAULT_MEMBERS_LIMIT, DEFAULT_RULE_LIMIT, DEFAULT_TOP_ITEMS_LIMIT,
};
use crate::constants::mining::{
    DEFAULT_MAX_CANDIDATES, DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_LIFT, DEFAULT_MIN_SUPPORT,
    DEFAULT_TOP_RULES, MAX_ITEMSET_LEN, MAX_TOP_RULES, SUPPORT_FLOOR,
};
use crate::data::SourceId;
use crate::errors::InsightError;
use crate::filters::RecordFilter;
use crate::genre::GenreVocabulary;
use crate::source::ColumnMapping;
use crate::utils::StopWords;

/// Controls how baskets are assembled from source terms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasketConfig {
    /// Terms per basket window.
    pub group_size: usize,
    /// Sources whose terms are concatenated, in this order.
    pub sources: Vec<SourceId>,
    /// Remove stop words from natural-language sources before windowing.
    pub filter_stop_words: bool,
}

impl Default for BasketConfig {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
            sources: vec![SourceId::SearchTrends, SourceId::SocialTopics],
            filter_stop_words: true,
        }
    }
}

/// Frequent-itemset and rule thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Minimum support as a fraction of baskets; must be in `(0, 1]`.
    pub min_support: f64,
    /// Lower the support threshold toward `1 / distinct_terms` for wide vocabularies.
    pub auto_scale_support: bool,
    /// Floor applied when auto-scaling support.
    pub support_floor: f64,
    /// Rules with lift below this are dropped.
    pub min_lift: f64,
    /// Rules with confidence below this are dropped.
    pub min_confidence: f64,
    /// Number of rules kept after ranking by lift; at most 10.
    pub top_n: usize,
    /// Longest itemset searched; `None` means the largest basket size.
    /// Either way the search stops at 16 items.
    pub max_itemset_len: Option<usize>,
    /// Per-level candidate cap; exceeding it is a mining error.
    pub max_candidates: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            auto_scale_support: true,
            support_floor: SUPPORT_FLOOR,
            min_lift: DEFAULT_MIN_LIFT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            top_n: DEFAULT_TOP_RULES,
            max_itemset_len: None,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl MiningConfig {
    /// Reject thresholds outside their documented ranges.
    pub fn validate(&self) -> Result<(), InsightError> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(InsightError::Configuration(format!(
                "min_support must be in (0, 1], got {}",
                self.min_support
            )));
        }
        if !(self.support_floor > 0.0 && self.support_floor <= 1.0) {
            return Err(InsightError::Configuration(format!(
                "support_floor must be in (0, 1], got {}",
                self.support_floor
            )));
        }
        if !self.min_lift.is_finite() || self.min_lift < 0.0 {
            return Err(InsightError::Configuration(format!(
                "min_lift must be a non-negative number, got {}",
                self.min_lift
            )));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(InsightError::Configuration(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        if self.top_n == 0 || self.top_n > MAX_TOP_RULES {
            return Err(InsightError::Configuration(format!(
                "top_n must be in 1..={MAX_TOP_RULES}, got {}",
                self.top_n
            )));
        }
        let too_long = |len: &usize| *len == 0 || *len > MAX_ITEMSET_LEN;
        if let Some(len) = self.max_itemset_len.filter(too_long) {
            return Err(InsightError::Configuration(format!(
                "max_itemset_len must be in 1..={MAX_ITEMSET_LEN}, got {len}"
            )));
        }
        if self.max_candidates == 0 {
            return Err(InsightError::Configuration(
                "max_candidates must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the number of clusters is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KSelection {
    /// Use exactly this many clusters (reduced when there are fewer items).
    Fixed(usize),
    /// Pick the best silhouette score over the candidate range.
    Auto,
}

/// Feature-scaling and k-means settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Fixed or automatic cluster count.
    pub k: KSelection,
    /// Fallback when automatic selection has no candidates.
    pub default_k: usize,
    /// Largest k evaluated by automatic selection.
    pub max_k: usize,
    /// Items required per candidate cluster (`k <= n / items_per_k`).
    pub items_per_k: usize,
    /// Lloyd iteration cap per k-means run.
    pub max_iterations: usize,
    /// Sources whose records are clustered.
    pub sources: Vec<SourceId>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k: KSelection::Auto,
            default_k: DEFAULT_K,
            max_k: MAX_AUTO_K,
            items_per_k: ITEMS_PER_CLUSTER,
            max_iterations: MAX_ITERATIONS,
            sources: vec![SourceId::Music, SourceId::Video],
        }
    }
}

impl ClusterConfig {
    /// Reject zero counts and a fixed k of zero.
    pub fn validate(&self) -> Result<(), InsightError> {
        if self.k == KSelection::Fixed(0) {
            return Err(InsightError::Configuration(
                "fixed cluster count must be greater than zero".to_string(),
            ));
        }
        if self.default_k == 0 || self.items_per_k == 0 || self.max_iterations == 0 {
            return Err(InsightError::Configuration(
                "default_k, items_per_k and max_iterations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Basket assembly.
    pub baskets: BasketConfig,
    /// Itemset and rule thresholds.
    pub mining: MiningConfig,
    /// Feature scaling and k-means.
    pub clustering: ClusterConfig,
    /// Category keywords per source.
    pub vocabulary: GenreVocabulary,
    /// Stop words shared by basket terms and genre inference.
    pub stop_words: StopWords,
    /// Source, keyword, and category filters applied to records and items.
    pub filter: RecordFilter,
    /// Per-source overrides of the default column mappings.
    pub column_mappings: IndexMap<SourceId, ColumnMapping>,
    /// Likes above this mark an item as positively received.
    pub engagement_threshold: f64,
    /// Rules kept in the report; at most 10.
    pub rule_limit: usize,
    /// Members listed per cluster.
    pub members_limit: usize,
    /// Items listed per source.
    pub top_items_limit: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            baskets: BasketConfig::default(),
            mining: MiningConfig::default(),
            clustering: ClusterConfig::default(),
            vocabulary: GenreVocabulary::default(),
            stop_words: StopWords::default(),
            filter: RecordFilter::default(),
            column_mappings: IndexMap::new(),
            engagement_threshold: DEFAULT_LIKES_THRESHOLD,
            rule_limit: DEFAULT_RULE_LIMIT,
            members_limit: DEFAULT_MEMBERS_LIMIT,
            top_items_limit: DEFAULT_TOP_ITEMS_LIMIT,
        }
    }
}

impl InsightConfig {
    /// Parse JSON; omitted fields keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, InsightError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InsightError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Column mapping for `source`: the override if present, else the default.
    pub fn mapping_for(&self, source: SourceId) -> ColumnMapping {
        self.column_mappings
            .get(&source)
            .cloned()
            .unwrap_or_else(|| ColumnMapping::for_source(source))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), InsightError> {
        if self.baskets.group_size == 0 {
            return Err(InsightError::Configuration(
                "basket group size must be at least 1".to_string(),
            ));
        }
        self.mining.validate()?;
        self.clustering.validate()?;
        if !self.engagement_threshold.is_finite() {
            return Err(InsightError::Configuration(
                "engagement_threshold must be finite".to_string(),
            ));
        }
        if self.rule_limit == 0 || self.rule_limit > MAX_TOP_RULES {
            return Err(InsightError::Configuration(format!(
                "rule_limit must be in 1..={MAX_TOP_RULES}, got {}",
                self.rule_limit
            )));
        }
        if self.top_items_limit == 0 {
            return Err(InsightError::Configuration(
                "top_items_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
