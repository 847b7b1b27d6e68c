//! One-shot insight run over a snapshot of source tables.

use indexmap::IndexMap;
use tracing::{error, info, warn};

use crate::baskets::{basket_terms, build_baskets};
use crate::cache::InsightCache;
use crate::cluster::{ClusterOutcome, Clusterer};
use crate::config::InsightConfig;
use crate::data::{ContentItem, SourceId, SourceRecord};
use crate::engagement::label_by_likes;
use crate::errors::InsightError;
use crate::genre::GenreInferencer;
use crate::insights::{
    InsightReport, InsightStatus, cluster_insights, rule_insights, top_items,
};
use crate::metrics::{source_counts, source_mix};
use crate::mining::{AssociationMiner, MiningOutcome};
use crate::normalize::normalize_table;
use crate::source::RawTable;
use crate::types::Term;

/// Runs the association and clustering branches over source tables.
///
/// The two branches are independent: an error in one is logged and reported
/// as [`InsightStatus::Failed`] while the other still completes.
#[derive(Clone, Debug)]
pub struct InsightEngine {
    config: InsightConfig,
    miner: AssociationMiner,
    clusterer: Clusterer,
    inferencer: GenreInferencer,
}

impl InsightEngine {
    /// Validate `config` and compile its vocabulary.
    pub fn new(config: InsightConfig) -> Result<Self, InsightError> {
        config.validate()?;
        let miner = AssociationMiner::new(config.mining.clone())?;
        let clusterer = Clusterer::new(config.clustering.clone())?;
        let inferencer = GenreInferencer::new(&config.vocabulary, config.stop_words.clone())?;
        Ok(Self {
            config,
            miner,
            clusterer,
            inferencer,
        })
    }

    /// Validated run configuration.
    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Compiled genre inferencer.
    pub fn inferencer(&self) -> &GenreInferencer {
        &self.inferencer
    }

    /// Normalize and filter every table. A table that fails to normalize is
    /// logged and contributes nothing.
    ///
    /// Repeated tables for one source are appended to the first, so item ids
    /// stay unique within a run.
    pub fn records(&self, tables: &[RawTable]) -> Vec<SourceRecord> {
        let mut records = Vec::new();
        for table in merge_by_source(tables) {
            if !self.config.filter.allows_source(table.source) {
                continue;
            }
            match normalize_table(&table, &self.config.mapping_for(table.source)) {
                Ok(normalized) => records.extend(normalized),
                Err(err) => error!(
                    "[trendmine:pipeline] skipping '{}' table: {}",
                    table.source, err
                ),
            }
        }
        self.config.filter.apply_records(&records)
    }

    /// Basket term lists, one per configured basket source, in configured order.
    pub fn term_lists(&self, records: &[SourceRecord]) -> Vec<Vec<Term>> {
        let by_source = group_by_source(records);
        self.config
            .baskets
            .sources
            .iter()
            .filter_map(|source| by_source.get(source).map(|records| (source, records)))
            .map(|(source, records)| {
                basket_terms(
                    records,
                    &self.config.stop_words,
                    self.config.baskets.filter_stop_words && source.is_natural_language(),
                )
            })
            .collect()
    }

    /// Association branch over already-normalized records.
    pub fn mine(&self, records: &[SourceRecord]) -> Result<MiningOutcome, InsightError> {
        let baskets = build_baskets(&self.term_lists(records), self.config.baskets.group_size)?;
        self.miner.mine(&baskets)
    }

    /// Content items for the configured cluster sources, with inferred
    /// category and engagement, after the category filter.
    pub fn content_items(&self, records: &[SourceRecord]) -> Vec<ContentItem> {
        let items = records
            .iter()
            .filter(|record| self.config.clustering.sources.contains(&record.source))
            .map(|record| ContentItem {
                id: record.id.clone(),
                source: record.source,
                text: record.text.clone(),
                popularity: record.popularity,
                category: self.inferencer.infer(record.source, &record.text),
                engagement: label_by_likes(record.likes, self.config.engagement_threshold),
            })
            .collect();
        self.config.filter.apply_items(items)
    }

    /// Clustering branch over content items.
    pub fn cluster(&self, items: &[ContentItem]) -> Result<ClusterOutcome, InsightError> {
        self.clusterer.cluster(items)
    }

    /// Run both branches and assemble a report.
    pub fn run(&self, tables: &[RawTable]) -> InsightReport {
        let records = self.records(tables);
        info!(
            "[trendmine:pipeline] {} tables -> {} records",
            tables.len(),
            records.len()
        );

        let (rules_status, rules) = match self.mine(&records) {
            Ok(outcome) => (
                InsightStatus::from_mining(&outcome),
                rule_insights(outcome.rules(), self.config.rule_limit),
            ),
            Err(err) => {
                error!("[trendmine:pipeline] association branch failed: {}", err);
                (InsightStatus::Failed(err.to_string()), Vec::new())
            }
        };

        let items = self.content_items(&records);
        let (clusters_status, clusters, cluster_k, silhouette) = match self.cluster(&items) {
            Ok(outcome) => (
                InsightStatus::from_clustering(&outcome),
                cluster_insights(&outcome, &items, self.config.members_limit),
                (!outcome.is_empty()).then_some(outcome.k),
                outcome.silhouette,
            ),
            Err(err) => {
                error!("[trendmine:pipeline] clustering branch failed: {}", err);
                (InsightStatus::Failed(err.to_string()), Vec::new(), None, None)
            }
        };

        InsightReport {
            rules_status,
            rules,
            clusters_status,
            clusters,
            cluster_k,
            silhouette,
            top_items: top_items(&records, self.config.top_items_limit),
            record_mix: source_mix(&source_counts(records.iter().map(|r| r.source))),
        }
    }

    /// Like [`InsightEngine::run`], answering from `cache` when the same
    /// tables were already processed under the same configuration.
    pub fn run_cached(&self, cache: &mut InsightCache, tables: &[RawTable]) -> InsightReport {
        let key = match InsightCache::key_for(tables, &self.config) {
            Ok(key) => key,
            Err(err) => {
                warn!("[trendmine:pipeline] cache key unavailable ({}); running uncached", err);
                return self.run(tables);
            }
        };
        if let Some(hit) = cache.get(key) {
            info!(
                "[trendmine:pipeline] cache hit {:016x} (stored {})",
                key, hit.inserted_at
            );
            return hit.report.clone();
        }
        let report = self.run(tables);
        cache.insert(key, report.clone());
        report
    }
}

fn merge_by_source(tables: &[RawTable]) -> Vec<RawTable> {
    let mut merged: IndexMap<SourceId, RawTable> = IndexMap::new();
    for table in tables {
        match merged.get_mut(&table.source) {
            Some(first) => {
                warn!(
                    "[trendmine:pipeline] appending repeated '{}' table ({} rows) to the first",
                    table.source,
                    table.len()
                );
                first.rows.extend(table.rows.iter().cloned());
            }
            None => {
                merged.insert(table.source, table.clone());
            }
        }
    }
    merged.into_values().collect()
}

fn group_by_source(records: &[SourceRecord]) -> IndexMap<SourceId, Vec<SourceRecord>> {
    let mut grouped: IndexMap<SourceId, Vec<SourceRecord>> = IndexMap::new();
    for record in records {
        grouped.entry(record.source).or_default().push(record.clone());
    }
    grouped
}
