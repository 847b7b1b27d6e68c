//! Ranked, bounded, display-ready views over mining and clustering results.
//!
//! Everything here borrows its inputs and allocates fresh output; nothing
//! recomputes statistics beyond ordering, truncation, and rounding.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterOutcome;
use crate::constants::insights::{METRIC_DECIMALS, RULE_ARROW};
use crate::data::{ContentItem, SourceId, SourceRecord};
use crate::engagement::EngagementLabel;
use crate::metrics::SourceMix;
use crate::mining::{AssociationRule, MiningOutcome};
use crate::types::{CategoryLabel, ClusterLabel, ItemId, Term};

/// Round a metric for display.
pub fn round_metric(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(METRIC_DECIMALS);
    (value * factor).round() / factor
}

/// One rule prepared for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleInsight {
    /// 1-based position after ranking by lift.
    pub rank: usize,
    /// `"show → musica"`.
    pub headline: String,
    /// Terms on the left-hand side.
    pub antecedent: Vec<Term>,
    /// Terms on the right-hand side.
    pub consequent: Vec<Term>,
    /// Fraction of baskets containing both sides.
    pub support: f64,
    /// Support of both sides over support of the antecedent.
    pub confidence: f64,
    /// Confidence over support of the consequent.
    pub lift: f64,
}

/// Rules in their given (already ranked) order, at most `limit`.
pub fn rule_insights(rules: &[AssociationRule], limit: usize) -> Vec<RuleInsight> {
    rules
        .iter()
        .take(limit)
        .enumerate()
        .map(|(idx, rule)| RuleInsight {
            rank: idx + 1,
            headline: format!(
                "{}{}{}",
                rule.antecedent.join(", "),
                RULE_ARROW,
                rule.consequent.join(", ")
            ),
            antecedent: rule.antecedent.clone(),
            consequent: rule.consequent.clone(),
            support: round_metric(rule.support),
            confidence: round_metric(rule.confidence),
            lift: round_metric(rule.lift),
        })
        .collect()
}

/// A cluster member as shown in listings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterMember {
    /// Id of the clustered item.
    pub item_id: ItemId,
    /// Source the item came from.
    pub source: SourceId,
    /// Display text.
    pub text: String,
    /// Raw popularity.
    pub popularity: f64,
    /// Inferred category.
    pub category: CategoryLabel,
    /// Likes-based label, when known.
    pub engagement: Option<EngagementLabel>,
}

/// One cluster prepared for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterInsight {
    /// Compact cluster label.
    pub label: ClusterLabel,
    /// `"cluster 0: funk, 12 items"`.
    pub headline: String,
    /// Number of member items.
    pub size: usize,
    /// Most common category among members.
    pub dominant_category: CategoryLabel,
    /// Mean of the members' scaled popularity.
    pub mean_scaled_popularity: f64,
    /// Mean raw popularity.
    pub popularity_mean: f64,
    /// Lowest raw popularity.
    pub popularity_min: f64,
    /// Highest raw popularity.
    pub popularity_max: f64,
    /// Member counts per source.
    pub source_mix: Option<SourceMix>,
    /// Highest raw popularity first, at most `members_limit`.
    pub members: Vec<ClusterMember>,
}

/// One insight per cluster, in label order.
pub fn cluster_insights(
    outcome: &ClusterOutcome,
    items: &[ContentItem],
    members_limit: usize,
) -> Vec<ClusterInsight> {
    let by_id: BTreeMap<&str, &ContentItem> =
        items.iter().map(|item| (item.id.as_str(), item)).collect();
    outcome
        .summaries
        .iter()
        .map(|summary| {
            let mut members: Vec<&ContentItem> = outcome
                .members(summary.label)
                .into_iter()
                .filter_map(|id| by_id.get(id.as_str()).copied())
                .collect();
            members.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
            members.truncate(members_limit);
            ClusterInsight {
                label: summary.label,
                headline: format!(
                    "cluster {}: {}, {} item{}",
                    summary.label,
                    summary.dominant_category,
                    summary.size,
                    if summary.size == 1 { "" } else { "s" }
                ),
                size: summary.size,
                dominant_category: summary.dominant_category.clone(),
                mean_scaled_popularity: round_metric(summary.mean_scaled_popularity),
                popularity_mean: round_metric(summary.popularity_mean),
                popularity_min: summary.popularity_min,
                popularity_max: summary.popularity_max,
                source_mix: summary.source_mix.clone(),
                members: members
                    .into_iter()
                    .map(|item| ClusterMember {
                        item_id: item.id.clone(),
                        source: item.source,
                        text: item.text.clone(),
                        popularity: item.popularity,
                        category: item.category.clone(),
                        engagement: item.engagement,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// One entry of a per-source top list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    /// 1-based position by popularity.
    pub rank: usize,
    /// Id of the record.
    pub item_id: ItemId,
    /// Display text.
    pub text: String,
    /// Artist or channel, when the source has one.
    pub creator: Option<String>,
    /// Raw popularity.
    pub popularity: f64,
}

/// The most popular items of one source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceTopItems {
    /// Source of the listed items.
    pub source: SourceId,
    /// Items by descending popularity.
    pub items: Vec<TopItem>,
}

/// Per-source top `limit` records by popularity (ties keep input order),
/// sources in canonical order.
pub fn top_items(records: &[SourceRecord], limit: usize) -> Vec<SourceTopItems> {
    let mut grouped: BTreeMap<SourceId, Vec<&SourceRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.source).or_default().push(record);
    }
    grouped
        .into_iter()
        .map(|(source, mut records)| {
            records.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
            SourceTopItems {
                source,
                items: records
                    .into_iter()
                    .take(limit)
                    .enumerate()
                    .map(|(idx, record)| TopItem {
                        rank: idx + 1,
                        item_id: record.id.clone(),
                        text: record.text.clone(),
                        creator: record.creator.clone(),
                        popularity: record.popularity,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// State of one insight branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum InsightStatus {
    /// Insights are available.
    Ready,
    /// Ran cleanly but found nothing worth showing.
    NoSignal(String),
    /// Errored; the message is the cause.
    Failed(String),
}

impl InsightStatus {
    /// Status of the association branch.
    pub fn from_mining(outcome: &MiningOutcome) -> Self {
        match outcome.no_insight_reason() {
            None => InsightStatus::Ready,
            Some(reason) => InsightStatus::NoSignal(reason.to_string()),
        }
    }

    /// Status of the clustering branch.
    pub fn from_clustering(outcome: &ClusterOutcome) -> Self {
        if outcome.is_empty() {
            InsightStatus::NoSignal("no items to cluster".to_string())
        } else {
            InsightStatus::Ready
        }
    }

    /// Whether the branch produced insights.
    pub fn is_ready(&self) -> bool {
        matches!(self, InsightStatus::Ready)
    }

    /// Whether the branch hit an error.
    pub fn is_failed(&self) -> bool {
        matches!(self, InsightStatus::Failed(_))
    }
}

impl fmt::Display for InsightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightStatus::Ready => f.write_str("ready"),
            InsightStatus::NoSignal(reason) => write!(f, "no signal ({reason})"),
            InsightStatus::Failed(cause) => write!(f, "failed ({cause})"),
        }
    }
}

/// Everything one run produced, ready for display or export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Status of the association branch.
    pub rules_status: InsightStatus,
    /// Ranked rules.
    pub rules: Vec<RuleInsight>,
    /// Status of the clustering branch.
    pub clusters_status: InsightStatus,
    /// Per-cluster summaries in label order.
    pub clusters: Vec<ClusterInsight>,
    /// Chosen k, when clustering ran.
    pub cluster_k: Option<usize>,
    /// Mean silhouette of the chosen clustering.
    pub silhouette: Option<f64>,
    /// Top items per source.
    pub top_items: Vec<SourceTopItems>,
    /// Records per source after filtering.
    pub record_mix: Option<SourceMix>,
}

impl InsightReport {
    /// Plain-text rendering, one line per entry.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("association rules: {}", self.rules_status)];
        for rule in &self.rules {
            lines.push(format!(
                "  {:>2}. {}  support={:.4} confidence={:.4} lift={:.4}",
                rule.rank, rule.headline, rule.support, rule.confidence, rule.lift
            ));
        }
        let mut cluster_line = format!("clusters: {}", self.clusters_status);
        if let Some(k) = self.cluster_k {
            cluster_line.push_str(&format!(" k={k}"));
        }
        if let Some(silhouette) = self.silhouette {
            cluster_line.push_str(&format!(" silhouette={silhouette:.4}"));
        }
        lines.push(cluster_line);
        for cluster in &self.clusters {
            lines.push(format!("  {}", cluster.headline));
            for member in &cluster.members {
                lines.push(format!(
                    "    - [{}] {} ({})",
                    member.source, member.text, member.popularity
                ));
            }
        }
        for group in &self.top_items {
            lines.push(format!("top {}:", group.source));
            for item in &group.items {
                lines.push(format!("  {:>2}. {} ({})", item.rank, item.text, item.popularity));
            }
        }
        lines
    }
}
