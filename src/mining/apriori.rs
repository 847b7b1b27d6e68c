use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::matrix::ItemMatrix;
use crate::errors::InsightError;
use crate::types::Term;

/// An itemset that cleared the support threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemset {
    /// Terms in column (first-appearance) order.
    pub items: Vec<Term>,
    /// Baskets containing every term.
    pub count: usize,
    /// `count / total baskets`.
    pub support: f64,
}

/// Column-index itemset with its basket count.
pub(crate) type CountedItemset = (Vec<usize>, usize);

pub(crate) fn support_of(count: usize, rows: usize) -> f64 {
    count as f64 / rows as f64
}

/// Levelwise Apriori search. Returns every frequent itemset (sorted column
/// indices) in generation order: all 1-itemsets, then all 2-itemsets, and so on.
pub(crate) fn levelwise(
    matrix: &ItemMatrix,
    min_support: f64,
    max_len: usize,
    max_candidates: usize,
) -> Result<Vec<CountedItemset>, InsightError> {
    let rows = matrix.rows();
    if rows == 0 || max_len == 0 {
        return Ok(Vec::new());
    }
    let is_frequent = |count: usize| support_of(count, rows) >= min_support;

    let mut level: Vec<CountedItemset> = (0..matrix.columns())
        .map(|column| (vec![column], matrix.count(&[column])))
        .filter(|(_, count)| is_frequent(*count))
        .collect();
    debug!(
        "[trendmine:mining] level 1: {} of {} terms frequent",
        level.len(),
        matrix.columns()
    );

    let mut frequent = Vec::new();
    let mut size = 1;
    while !level.is_empty() {
        frequent.extend(level.iter().cloned());
        if size >= max_len {
            break;
        }
        let candidates = join_and_prune(&level, max_candidates)?;
        let examined = candidates.len();
        level = candidates
            .into_iter()
            .map(|itemset| {
                let count = matrix.count(&itemset);
                (itemset, count)
            })
            .filter(|(_, count)| is_frequent(*count))
            .collect();
        size += 1;
        debug!(
            "[trendmine:mining] level {}: {} of {} candidates frequent",
            size,
            level.len(),
            examined
        );
    }
    Ok(frequent)
}

/// Build size k+1 candidates from frequent size-k itemsets sharing a k-1 prefix,
/// then drop candidates with an infrequent k-subset.
fn join_and_prune(
    level: &[CountedItemset],
    max_candidates: usize,
) -> Result<Vec<Vec<usize>>, InsightError> {
    let known: HashSet<&[usize]> = level.iter().map(|(items, _)| items.as_slice()).collect();
    let mut candidates = Vec::new();
    for (i, (left, _)) in level.iter().enumerate() {
        let prefix = &left[..left.len() - 1];
        for (right, _) in &level[i + 1..] {
            if &right[..right.len() - 1] != prefix {
                continue;
            }
            let (a, b) = (left[left.len() - 1], right[right.len() - 1]);
            let mut candidate = prefix.to_vec();
            candidate.push(a.min(b));
            candidate.push(a.max(b));
            if all_subsets_known(&candidate, &known) {
                candidates.push(candidate);
                if candidates.len() > max_candidates {
                    return Err(InsightError::Mining(format!(
                        "more than {max_candidates} candidate itemsets of size {}; raise min_support",
                        left.len() + 1
                    )));
                }
            }
        }
    }
    Ok(candidates)
}

fn all_subsets_known(candidate: &[usize], known: &HashSet<&[usize]>) -> bool {
    (0..candidate.len()).all(|skip| {
        let subset: Vec<usize> = candidate
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != skip)
            .map(|(_, column)| *column)
            .collect();
        known.contains(subset.as_slice())
    })
}
