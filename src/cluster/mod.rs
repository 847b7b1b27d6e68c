//! Feature scaling and k-means clustering of content items.
//!
//! Each item becomes a two-dimensional point: popularity min-max scaled over
//! the batch, and its category code (first-appearance order). Points are
//! partitioned with deterministic k-means; the cluster count is fixed or
//! picked by mean silhouette score.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ClusterConfig, KSelection};
use crate::data::ContentItem;
use crate::errors::InsightError;
use crate::metrics::{SourceMix, source_counts, source_mix};
use crate::types::{CategoryLabel, ClusterLabel, ItemId};

mod encode;
mod kmeans;
mod scale;
mod silhouette;

pub use encode::CategoryEncoder;
pub use scale::min_max_scale;

use kmeans::{KMeansFit, Point, kmeans};
use silhouette::silhouette_score;

/// One item's cluster label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    /// Clustered item.
    pub item_id: ItemId,
    /// Compact cluster label in `0..k`.
    pub label: ClusterLabel,
}

/// The point an item was clustered on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemFeatures {
    /// Item the features belong to.
    pub item_id: ItemId,
    /// Popularity min-max scaled over the batch.
    pub scaled_popularity: f64,
    /// First-appearance code of the item's category.
    pub category_code: usize,
}

/// Per-cluster statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Compact cluster label.
    pub label: ClusterLabel,
    /// Number of member items.
    pub size: usize,
    /// `[scaled popularity, category code]`.
    pub centroid: [f64; 2],
    /// Mean of the members' scaled popularity.
    pub mean_scaled_popularity: f64,
    /// Lowest raw popularity among members.
    pub popularity_min: f64,
    /// Mean raw popularity among members.
    pub popularity_mean: f64,
    /// Highest raw popularity among members.
    pub popularity_max: f64,
    /// Most frequent category; earliest member wins ties.
    pub dominant_category: CategoryLabel,
    /// Member counts per source.
    pub source_mix: Option<SourceMix>,
}

/// Clustering result for one batch of items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterOutcome {
    /// Clusters actually populated (`0..k`).
    pub k: usize,
    /// Mean silhouette; `None` with fewer than two clusters.
    pub silhouette: Option<f64>,
    /// In item order.
    pub assignments: Vec<ClusterAssignment>,
    /// In label order.
    pub summaries: Vec<ClusterSummary>,
    /// In item order.
    pub features: Vec<ItemFeatures>,
    /// Category codes, indexed by code.
    pub categories: Vec<CategoryLabel>,
}

impl ClusterOutcome {
    /// Whether no item was clustered.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Cluster label of `item_id`.
    pub fn label_of(&self, item_id: &str) -> Option<ClusterLabel> {
        self.assignments
            .iter()
            .find(|assignment| assignment.item_id == item_id)
            .map(|assignment| assignment.label)
    }

    /// Item ids assigned to `label`, in item order.
    pub fn members(&self, label: ClusterLabel) -> Vec<&ItemId> {
        self.assignments
            .iter()
            .filter(|assignment| assignment.label == label)
            .map(|assignment| &assignment.item_id)
            .collect()
    }
}

/// k-means clusterer over popularity and category.
#[derive(Clone, Debug)]
pub struct Clusterer {
    config: ClusterConfig,
}

impl Clusterer {
    /// Validate `config` and build a clusterer.
    pub fn new(config: ClusterConfig) -> Result<Self, InsightError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Settings this clusterer runs with.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Candidate k values for automatic selection: `2..=min(max_k, n / items_per_k)`.
    pub fn auto_k_candidates(&self, item_count: usize) -> Vec<usize> {
        let upper = self
            .config
            .max_k
            .min(item_count / self.config.items_per_k);
        (2..=upper).collect()
    }

    /// Cluster `items`. An empty batch yields an empty outcome.
    pub fn cluster(&self, items: &[ContentItem]) -> Result<ClusterOutcome, InsightError> {
        if items.is_empty() {
            info!("[trendmine:cluster] no items; nothing to cluster");
            return Ok(ClusterOutcome::default());
        }
        if let Some(item) = items.iter().find(|item| !item.popularity.is_finite()) {
            return Err(InsightError::Clustering(format!(
                "item '{}' has non-finite popularity {}",
                item.id, item.popularity
            )));
        }

        let popularity: Vec<f64> = items.iter().map(|item| item.popularity).collect();
        let scaled = min_max_scale(&popularity);
        let (encoder, codes) =
            CategoryEncoder::fit(items.iter().map(|item| item.category.as_str()));
        let points: Vec<Point> = scaled
            .iter()
            .zip(&codes)
            .map(|(popularity, code)| [*popularity, *code as f64])
            .collect();

        let (fit, silhouette) = self.fit(&points);
        let k = fit.centroids.len();
        info!(
            "[trendmine:cluster] items={} categories={} k={} silhouette={} iterations={}",
            items.len(),
            encoder.len(),
            k,
            silhouette.map_or_else(|| "n/a".to_string(), |s| format!("{s:.4}")),
            fit.iterations
        );

        let summaries = summarize(items, &scaled, &fit);
        Ok(ClusterOutcome {
            k,
            silhouette,
            assignments: items
                .iter()
                .zip(&fit.labels)
                .map(|(item, label)| ClusterAssignment {
                    item_id: item.id.clone(),
                    label: *label,
                })
                .collect(),
            summaries,
            features: items
                .iter()
                .zip(scaled.iter().zip(&codes))
                .map(|(item, (scaled, code))| ItemFeatures {
                    item_id: item.id.clone(),
                    scaled_popularity: *scaled,
                    category_code: *code,
                })
                .collect(),
            categories: encoder.categories().cloned().collect(),
        })
    }

    fn fit(&self, points: &[Point]) -> (KMeansFit, Option<f64>) {
        let n = points.len();
        let requested = match self.config.k {
            KSelection::Fixed(k) => k,
            KSelection::Auto => {
                let candidates = self.auto_k_candidates(n);
                if candidates.is_empty() {
                    debug!(
                        "[trendmine:cluster] {} items too few for automatic k; using {}",
                        n, self.config.default_k
                    );
                    self.config.default_k
                } else {
                    return self.select_by_silhouette(points, &candidates);
                }
            }
        };
        let k = if n < requested { n.max(1) } else { requested };
        let fit = kmeans(points, k, self.config.max_iterations);
        let score = silhouette_score(points, &fit.labels);
        (fit, score)
    }

    /// Best mean silhouette over `candidates`; the smaller k wins ties.
    fn select_by_silhouette(
        &self,
        points: &[Point],
        candidates: &[usize],
    ) -> (KMeansFit, Option<f64>) {
        let mut best: Option<(KMeansFit, Option<f64>)> = None;
        for &k in candidates {
            let fit = kmeans(points, k, self.config.max_iterations);
            let score = silhouette_score(points, &fit.labels);
            debug!(
                "[trendmine:cluster] k={} populated={} silhouette={:?}",
                k,
                fit.centroids.len(),
                score
            );
            let better = match &best {
                None => true,
                Some((_, best_score)) => {
                    score.unwrap_or(f64::NEG_INFINITY) > best_score.unwrap_or(f64::NEG_INFINITY)
                }
            };
            if better {
                best = Some((fit, score));
            }
        }
        best.unwrap_or_else(|| {
            let k = self.config.default_k.min(points.len());
            let fit = kmeans(points, k, self.config.max_iterations);
            let score = silhouette_score(points, &fit.labels);
            (fit, score)
        })
    }
}

fn summarize(items: &[ContentItem], scaled: &[f64], fit: &KMeansFit) -> Vec<ClusterSummary> {
    fit.centroids
        .iter()
        .enumerate()
        .map(|(label, centroid)| {
            let members: Vec<usize> = fit
                .labels
                .iter()
                .enumerate()
                .filter(|(_, assigned)| **assigned == label)
                .map(|(idx, _)| idx)
                .collect();
            let size = members.len();
            let raw: Vec<f64> = members.iter().map(|idx| items[*idx].popularity).collect();
            let mean = |values: &[f64]| {
                if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            };
            let member_scaled: Vec<f64> = members.iter().map(|idx| scaled[*idx]).collect();
            let counts: BTreeMap<_, _> =
                source_counts(members.iter().map(|idx| items[*idx].source));
            ClusterSummary {
                label,
                size,
                centroid: *centroid,
                mean_scaled_popularity: mean(&member_scaled),
                popularity_min: raw.iter().copied().fold(f64::INFINITY, f64::min),
                popularity_mean: mean(&raw),
                popularity_max: raw.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                dominant_category: dominant_category(
                    members.iter().map(|idx| &items[*idx].category),
                ),
                source_mix: source_mix(&counts),
            }
        })
        .collect()
}

fn dominant_category<'a, I>(categories: I) -> CategoryLabel
where
    I: IntoIterator<Item = &'a CategoryLabel>,
{
    let mut counts: IndexMap<&CategoryLabel, usize> = IndexMap::new();
    for category in categories {
        *counts.entry(category).or_insert(0) += 1;
    }
    let mut best: Option<(&CategoryLabel, usize)> = None;
    for (category, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category.clone()).unwrap_or_default()
}
