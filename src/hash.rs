use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::source::RawTable;

pub fn stable_hash_with(f: impl FnOnce(&mut DefaultHasher)) -> u64 {
    let mut hasher = DefaultHasher::new();
    f(&mut hasher);
    hasher.finish()
}

pub fn stable_hash_str(seed: u64, value: &str) -> u64 {
    stable_hash_with(|hasher| {
        seed.hash(hasher);
        value.hash(hasher);
    })
}

/// Content hash of a table snapshot: source tag, row order, column names, and
/// canonical JSON cell text all participate.
pub fn table_content_hash(seed: u64, tables: &[RawTable]) -> u64 {
    stable_hash_with(|hasher| {
        seed.hash(hasher);
        tables.len().hash(hasher);
        for table in tables {
            table.source.as_str().hash(hasher);
            table.rows.len().hash(hasher);
            for row in &table.rows {
                row.len().hash(hasher);
                for (column, value) in row.iter() {
                    column.hash(hasher);
                    value.to_string().hash(hasher);
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SourceId;
    use crate::source::RawRow;
    use serde_json::json;

    fn table(term: &str) -> RawTable {
        RawTable::new(SourceId::SearchTrends, vec![RawRow::from_pairs([("term", json!(term))])])
    }

    #[test]
    fn table_hash_is_stable_for_identical_content() {
        let a = table_content_hash(7, &[table("show")]);
        let b = table_content_hash(7, &[table("show")]);
        assert_eq!(a, b);
    }

    #[test]
    fn table_hash_changes_with_content_and_seed() {
        let base = table_content_hash(7, &[table("show")]);
        assert_ne!(base, table_content_hash(7, &[table("festival")]));
        assert_ne!(base, table_content_hash(8, &[table("show")]));
        assert_ne!(stable_hash_str(1, "a"), stable_hash_str(1, "b"));
    }
}
