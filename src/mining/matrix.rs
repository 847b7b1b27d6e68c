use indexmap::IndexSet;

use crate::baskets::Basket;
use crate::types::Term;

/// Fixed-width bitset over basket rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RowSet {
    words: Vec<u64>,
}

impl RowSet {
    fn empty(rows: usize) -> Self {
        Self {
            words: vec![0; rows.div_ceil(64)],
        }
    }

    fn insert(&mut self, row: usize) {
        self.words[row / 64] |= 1u64 << (row % 64);
    }

    pub(crate) fn count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub(crate) fn intersect(&self, other: &RowSet) -> RowSet {
        RowSet {
            words: self
                .words
                .iter()
                .zip(other.words.iter())
                .map(|(a, b)| a & b)
                .collect(),
        }
    }
}

/// Binary item-presence matrix: one row per basket, one column per distinct
/// term. Columns are numbered by first appearance and stored as row bitsets.
#[derive(Clone, Debug)]
pub struct ItemMatrix {
    terms: IndexSet<Term>,
    columns: Vec<RowSet>,
    rows: usize,
    widest_row: usize,
}

impl ItemMatrix {
    /// Build the presence matrix; columns follow first appearance.
    pub fn from_baskets(baskets: &[Basket]) -> Self {
        let rows = baskets.len();
        let mut terms = IndexSet::new();
        let mut columns: Vec<RowSet> = Vec::new();
        let mut widest_row = 0;
        for (row, basket) in baskets.iter().enumerate() {
            widest_row = widest_row.max(basket.len());
            for term in basket.items() {
                let (column, inserted) = terms.insert_full(term.clone());
                if inserted {
                    columns.push(RowSet::empty(rows));
                }
                columns[column].insert(row);
            }
        }
        Self {
            terms,
            columns,
            rows,
            widest_row,
        }
    }

    /// Number of baskets (rows).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of distinct terms (columns).
    pub fn columns(&self) -> usize {
        self.terms.len()
    }

    /// Largest number of terms in a single basket.
    pub fn widest_row(&self) -> usize {
        self.widest_row
    }

    /// Term for `column`.
    pub fn term(&self, column: usize) -> Option<&Term> {
        self.terms.get_index(column)
    }

    /// Column holding `term`.
    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Cell value: does basket `row` contain term `column`?
    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.columns
            .get(column)
            .is_some_and(|set| set.words[row / 64] & (1u64 << (row % 64)) != 0)
    }

    /// Rows containing every column in `itemset` (sorted, non-empty).
    pub(crate) fn rows_with(&self, itemset: &[usize]) -> RowSet {
        let mut iter = itemset.iter();
        let Some(&first) = iter.next() else {
            return RowSet::empty(self.rows);
        };
        iter.fold(self.columns[first].clone(), |acc, &column| {
            acc.intersect(&self.columns[column])
        })
    }

    /// Number of baskets containing every column in `itemset`.
    pub fn count(&self, itemset: &[usize]) -> usize {
        self.rows_with(itemset).count()
    }
}
