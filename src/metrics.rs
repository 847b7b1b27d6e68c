use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::SourceId;

/// How a group of items (a cluster or a whole run) splits across sources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceMix {
    /// Records across all sources.
    pub total: usize,
    /// Number of sources with records.
    pub sources: usize,
    /// Smallest per-source count.
    pub min: usize,
    /// Largest per-source count.
    pub max: usize,
    /// Mean per-source count.
    pub mean: f64,
    /// Largest source's share of `total`.
    pub max_share: f64,
    /// Smallest source's share of `total`.
    pub min_share: f64,
    /// `max / min`; infinite when some listed source has zero items.
    pub ratio: f64,
    /// Largest share first; ties in canonical source order.
    pub per_source: Vec<SourceShare>,
}

/// One source's share of a group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceShare {
    /// Source counted.
    pub source: SourceId,
    /// Records from the source.
    pub count: usize,
    /// Fraction of the total.
    pub share: f64,
}

impl SourceMix {
    /// Source with the most items, if any.
    pub fn dominant(&self) -> Option<SourceId> {
        self.per_source.first().map(|entry| entry.source)
    }
}

/// Tally item sources.
pub fn source_counts<I>(sources: I) -> BTreeMap<SourceId, usize>
where
    I: IntoIterator<Item = SourceId>,
{
    let mut counts = BTreeMap::new();
    for source in sources {
        *counts.entry(source).or_insert(0) += 1;
    }
    counts
}

/// Mix statistics from per-source counts; `None` when there are no sources.
pub fn source_mix(counts: &BTreeMap<SourceId, usize>) -> Option<SourceMix> {
    let (min, max) = counts
        .values()
        .fold(None, |acc: Option<(usize, usize)>, &count| match acc {
            None => Some((count, count)),
            Some((lo, hi)) => Some((lo.min(count), hi.max(count))),
        })?;
    let total: usize = counts.values().sum();
    let sources = counts.len();
    let share = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    };
    let ratio = if min == 0 {
        f64::INFINITY
    } else {
        max as f64 / min as f64
    };
    let mut per_source: Vec<SourceShare> = counts
        .iter()
        .map(|(source, count)| SourceShare {
            source: *source,
            count: *count,
            share: share(*count),
        })
        .collect();
    per_source.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.source.cmp(&b.source)));
    Some(SourceMix {
        total,
        sources,
        min,
        max,
        mean: total as f64 / sources as f64,
        max_share: share(max),
        min_share: share(min),
        ratio,
        per_source,
    })
}
