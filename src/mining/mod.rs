//! Frequent-itemset mining and association-rule derivation over baskets.
//!
//! Baskets become a binary presence matrix (`ItemMatrix`), a levelwise
//! Apriori search keeps itemsets above the effective support threshold, and
//! rules derived from those itemsets are ranked by lift.
//!
//! Empty input and thresholds that leave nothing behind are reported as
//! `MiningOutcome::NoInsight`; only invalid parameters or an exhausted
//! candidate budget surface as `Err`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::baskets::Basket;
use crate::config::MiningConfig;
use crate::constants::mining::MAX_ITEMSET_LEN;
use crate::errors::InsightError;

mod apriori;
mod matrix;
mod rules;

pub use apriori::FrequentItemset;
pub use matrix::ItemMatrix;
pub use rules::AssociationRule;

use apriori::{CountedItemset, levelwise, support_of};
use rules::{derive_rules, rank_rules};

/// Why mining produced no rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoInsightReason {
    /// There were no baskets to mine.
    NoBaskets,
    /// No itemset reached the support threshold.
    NoFrequentItemsets,
    /// Itemsets survived but no rule cleared the lift/confidence thresholds.
    NoRulesAboveThreshold,
}

impl NoInsightReason {
    /// Human-readable reason.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NoInsightReason::NoBaskets => "no baskets to mine",
            NoInsightReason::NoFrequentItemsets => "no itemset reached minimum support",
            NoInsightReason::NoRulesAboveThreshold => "no rule reached minimum lift",
        }
    }
}

impl fmt::Display for NoInsightReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful mining run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MiningReport {
    /// Baskets mined.
    pub basket_count: usize,
    /// Distinct terms across all baskets.
    pub distinct_terms: usize,
    /// Support threshold actually applied after auto-scaling.
    pub effective_min_support: f64,
    /// Every frequent itemset found.
    pub itemsets: Vec<FrequentItemset>,
    /// Ranked by lift (descending) and truncated to `top_n`.
    pub rules: Vec<AssociationRule>,
    /// Rules that passed the thresholds before truncation.
    pub rules_considered: usize,
}

/// Result of a mining run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiningOutcome {
    /// At least one rule survived the thresholds.
    Rules(MiningReport),
    /// Nothing worth reporting, and why.
    NoInsight(NoInsightReason),
}

impl MiningOutcome {
    /// Ranked rules; empty when there is no insight.
    pub fn rules(&self) -> &[AssociationRule] {
        match self {
            MiningOutcome::Rules(report) => &report.rules,
            MiningOutcome::NoInsight(_) => &[],
        }
    }

    /// Whether mining produced no rules.
    pub fn is_no_insight(&self) -> bool {
        matches!(self, MiningOutcome::NoInsight(_))
    }

    /// Why mining produced no rules, if it did not.
    pub fn no_insight_reason(&self) -> Option<NoInsightReason> {
        match self {
            MiningOutcome::Rules(_) => None,
            MiningOutcome::NoInsight(reason) => Some(*reason),
        }
    }
}

/// Apriori miner configured with support, lift, and ranking thresholds.
#[derive(Clone, Debug)]
pub struct AssociationMiner {
    config: MiningConfig,
}

impl AssociationMiner {
    /// Validate `config` and build a miner.
    pub fn new(config: MiningConfig) -> Result<Self, InsightError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Thresholds this miner runs with.
    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Support threshold for a vocabulary of `distinct_terms`.
    ///
    /// With auto-scaling on, wide vocabularies lower the threshold to
    /// `max(support_floor, 1 / distinct_terms)` but never raise it above the
    /// configured `min_support`.
    pub fn effective_min_support(&self, distinct_terms: usize) -> f64 {
        if !self.config.auto_scale_support || distinct_terms == 0 {
            return self.config.min_support;
        }
        let scaled = (1.0 / distinct_terms as f64).max(self.config.support_floor);
        self.config.min_support.min(scaled)
    }

    /// Itemsets reaching the effective support, with exact supports.
    pub fn frequent_itemsets(
        &self,
        baskets: &[Basket],
    ) -> Result<Vec<FrequentItemset>, InsightError> {
        let matrix = ItemMatrix::from_baskets(baskets);
        let (frequent, _) = self.search(&matrix)?;
        Ok(to_itemsets(&matrix, &frequent))
    }

    /// Mine baskets into ranked association rules.
    pub fn mine(&self, baskets: &[Basket]) -> Result<MiningOutcome, InsightError> {
        if baskets.is_empty() {
            info!("[trendmine:mining] no baskets; nothing to mine");
            return Ok(MiningOutcome::NoInsight(NoInsightReason::NoBaskets));
        }
        let matrix = ItemMatrix::from_baskets(baskets);
        let (frequent, effective_min_support) = self.search(&matrix)?;
        if frequent.is_empty() {
            info!(
                "[trendmine:mining] no itemset reached support {:.4} over {} baskets",
                effective_min_support,
                matrix.rows()
            );
            return Ok(MiningOutcome::NoInsight(NoInsightReason::NoFrequentItemsets));
        }

        let derived = derive_rules(
            &matrix,
            &frequent,
            self.config.min_lift,
            self.config.min_confidence,
        );
        let rules_considered = derived.len();
        if derived.is_empty() {
            info!(
                "[trendmine:mining] {} frequent itemsets but no rule reached lift {:.3}",
                frequent.len(),
                self.config.min_lift
            );
            return Ok(MiningOutcome::NoInsight(
                NoInsightReason::NoRulesAboveThreshold,
            ));
        }
        let rules = rank_rules(derived, self.config.top_n);
        info!(
            "[trendmine:mining] baskets={} terms={} support>={:.4} itemsets={} rules={}/{}",
            matrix.rows(),
            matrix.columns(),
            effective_min_support,
            frequent.len(),
            rules.len(),
            rules_considered
        );
        Ok(MiningOutcome::Rules(MiningReport {
            basket_count: matrix.rows(),
            distinct_terms: matrix.columns(),
            effective_min_support,
            itemsets: to_itemsets(&matrix, &frequent),
            rules,
            rules_considered,
        }))
    }

    fn search(&self, matrix: &ItemMatrix) -> Result<(Vec<CountedItemset>, f64), InsightError> {
        let effective = self.effective_min_support(matrix.columns());
        let max_len = self
            .config
            .max_itemset_len
            .map_or(matrix.widest_row(), |cap| cap.min(matrix.widest_row()))
            .min(MAX_ITEMSET_LEN);
        debug!(
            "[trendmine:mining] search support>={:.4} max_len={} candidates<={}",
            effective, max_len, self.config.max_candidates
        );
        let frequent = levelwise(matrix, effective, max_len, self.config.max_candidates)?;
        Ok((frequent, effective))
    }
}

fn to_itemsets(matrix: &ItemMatrix, frequent: &[CountedItemset]) -> Vec<FrequentItemset> {
    frequent
        .iter()
        .map(|(columns, count)| FrequentItemset {
            items: columns
                .iter()
                .filter_map(|column| matrix.term(*column).cloned())
                .collect(),
            count: *count,
            support: support_of(*count, matrix.rows()),
        })
        .collect()
}
