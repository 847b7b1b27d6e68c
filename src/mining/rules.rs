use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::apriori::{CountedItemset, support_of};
use super::matrix::ItemMatrix;
use crate::constants::mining::THRESHOLD_TOLERANCE;
use crate::types::Term;

/// `antecedent → consequent` with its strength measures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    /// Terms on the left-hand side.
    pub antecedent: Vec<Term>,
    /// Terms on the right-hand side.
    pub consequent: Vec<Term>,
    /// Support of antecedent ∪ consequent.
    pub support: f64,
    /// `support / support(antecedent)`.
    pub confidence: f64,
    /// `confidence / support(consequent)`.
    pub lift: f64,
    /// `support - support(antecedent) * support(consequent)`.
    pub leverage: f64,
    /// `(1 - support(consequent)) / (1 - confidence)`; infinite when confidence is 1.
    pub conviction: f64,
}

/// Derive every rule from itemsets of size two or more, in itemset order and,
/// within an itemset, in antecedent bitmask order. Filters by lift and confidence.
pub(crate) fn derive_rules(
    matrix: &ItemMatrix,
    frequent: &[CountedItemset],
    min_lift: f64,
    min_confidence: f64,
) -> Vec<AssociationRule> {
    let rows = matrix.rows();
    let counts: HashMap<&[usize], usize> = frequent
        .iter()
        .map(|(items, count)| (items.as_slice(), *count))
        .collect();
    // Every subset of a frequent itemset was recorded at a lower level.
    let count_of = |items: &[usize]| {
        counts
            .get(items)
            .copied()
            .unwrap_or_else(|| matrix.count(items))
    };

    let mut rules = Vec::new();
    for (items, union_count) in frequent.iter().filter(|(items, _)| items.len() >= 2) {
        let support = support_of(*union_count, rows);
        let full: u64 = (1u64 << items.len()) - 1;
        for mask in 1..full {
            let (antecedent, consequent) = split_by_mask(items, mask);
            let antecedent_support = support_of(count_of(&antecedent), rows);
            let consequent_support = support_of(count_of(&consequent), rows);
            let confidence = support / antecedent_support;
            let lift = confidence / consequent_support;
            if lift + THRESHOLD_TOLERANCE < min_lift
                || confidence + THRESHOLD_TOLERANCE < min_confidence
            {
                continue;
            }
            let conviction = if confidence >= 1.0 {
                f64::INFINITY
            } else {
                (1.0 - consequent_support) / (1.0 - confidence)
            };
            rules.push(AssociationRule {
                antecedent: terms_of(matrix, &antecedent),
                consequent: terms_of(matrix, &consequent),
                support,
                confidence,
                lift,
                leverage: support - antecedent_support * consequent_support,
                conviction,
            });
        }
    }
    rules
}

/// Stable sort by lift, highest first, then keep `top_n`.
pub(crate) fn rank_rules(mut rules: Vec<AssociationRule>, top_n: usize) -> Vec<AssociationRule> {
    rules.sort_by(|a, b| b.lift.total_cmp(&a.lift));
    rules.truncate(top_n);
    rules
}

fn split_by_mask(items: &[usize], mask: u64) -> (Vec<usize>, Vec<usize>) {
    let mut antecedent = Vec::new();
    let mut consequent = Vec::new();
    for (bit, column) in items.iter().enumerate() {
        if mask & (1u64 << bit) != 0 {
            antecedent.push(*column);
        } else {
            consequent.push(*column);
        }
    }
    (antecedent, consequent)
}

fn terms_of(matrix: &ItemMatrix, columns: &[usize]) -> Vec<Term> {
    columns
        .iter()
        .filter_map(|column| matrix.term(*column).cloned())
        .collect()
}
