//! Record normalization: raw source tables into canonical `SourceRecord`s.

use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::normalize::ITEM_ID_DELIMITER;
use crate::data::{SourceId, SourceRecord};
use crate::errors::InsightError;
use crate::source::{ColumnMapping, PopularityField, RawRow, RawTable};
use crate::types::LogMessage;
use crate::utils::normalize_inline_whitespace;

/// Normalize one table through `mapping`.
///
/// Never fails on an empty table. Rows without usable text are skipped, and
/// missing or malformed popularity coerces to 0; both cases log a warning.
/// A non-empty table in which no row carries any text column is reported as
/// `InsightError::MissingColumn`.
pub fn normalize_table(
    table: &RawTable,
    mapping: &ColumnMapping,
) -> Result<Vec<SourceRecord>, InsightError> {
    if table.is_empty() {
        debug!(
            "[trendmine:normalize] source '{}' table is empty",
            table.source
        );
        return Ok(Vec::new());
    }
    if !table.rows.iter().any(|row| row.first_of(&mapping.text).is_some()) {
        return Err(InsightError::MissingColumn {
            source_id: table.source,
            column: mapping.primary_text_column().to_string(),
        });
    }

    let total = table.rows.len();
    let mut records = Vec::with_capacity(total);
    for (idx, row) in table.rows.iter().enumerate() {
        match normalize_row(table.source, mapping, row, idx, total) {
            Ok(record) => records.push(record),
            Err(message) => warn!("{message}"),
        }
    }
    debug!(
        "[trendmine:normalize] source '{}' normalized {}/{} rows",
        table.source,
        records.len(),
        total
    );
    Ok(records)
}

/// Normalize a single row; `Err` carries the warning explaining the skip.
fn normalize_row(
    source: SourceId,
    mapping: &ColumnMapping,
    row: &RawRow,
    idx: usize,
    total: usize,
) -> Result<SourceRecord, LogMessage> {
    let text = row
        .first_of(&mapping.text)
        .and_then(|(_, value)| cell_text(value))
        .ok_or_else(|| {
            format!("[trendmine:normalize] source '{source}' row {idx} has no text; skipping")
        })?;

    let popularity = match &mapping.popularity {
        PopularityField::Rank => (total - idx) as f64,
        PopularityField::Columns(columns) => match row.first_of(columns) {
            Some((column, value)) => coerce_popularity(value).unwrap_or_else(|reason| {
                warn!(
                    "[trendmine:normalize] source '{source}' row {idx} column '{column}' {reason}; using 0"
                );
                0.0
            }),
            None => {
                warn!(
                    "[trendmine:normalize] source '{source}' row {idx} has no popularity column; using 0"
                );
                0.0
            }
        },
    };

    let creator = row
        .first_of(&mapping.creator)
        .and_then(|(_, value)| cell_text(value));
    let likes = row
        .first_of(&mapping.likes)
        .and_then(|(_, value)| coerce_popularity(value).ok());

    Ok(SourceRecord {
        id: format!("{}{}{}", source.as_str(), ITEM_ID_DELIMITER, idx),
        source,
        text,
        creator,
        popularity,
        likes,
    })
}

/// Cell value as display text; `None` for null, blank, arrays, and objects.
fn cell_text(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    let normalized = normalize_inline_whitespace(raw);
    (!normalized.is_empty()).then_some(normalized)
}

/// Parse a popularity cell into a finite, non-negative number.
fn coerce_popularity(value: &Value) -> Result<f64, String> {
    let parsed = match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| format!("value '{number}' is not representable"))?,
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("value '{text}' is not numeric"))?,
        Value::Null => return Err("value is null".to_string()),
        other => return Err(format!("value '{other}' is not numeric")),
    };
    if !parsed.is_finite() {
        return Err(format!("value '{parsed}' is not finite"));
    }
    if parsed < 0.0 {
        return Err(format!("value '{parsed}' is negative"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video_row(title: Value, views: Value) -> RawRow {
        RawRow::from_pairs([
            ("title", title),
            ("channel", json!("Canal Oficial")),
            ("view_count", views),
        ])
    }

    #[test]
    fn empty_table_yields_no_records() {
        let table = RawTable::empty(SourceId::Music);
        let records =
            normalize_table(&table, &ColumnMapping::for_source(SourceId::Music)).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn numeric_strings_and_numbers_are_accepted() {
        let table = RawTable::new(
            SourceId::Video,
            vec![
                video_row(json!("Clipe  Novo"), json!("1200")),
                video_row(json!("Outro"), json!(35)),
            ],
        );
        let records =
            normalize_table(&table, &ColumnMapping::for_source(SourceId::Video)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "video::0");
        assert_eq!(records[0].text, "Clipe Novo");
        assert_eq!(records[0].creator.as_deref(), Some("Canal Oficial"));
        assert_eq!(records[0].popularity, 1200.0);
        assert_eq!(records[1].popularity, 35.0);
    }

    #[test]
    fn malformed_popularity_coerces_to_zero() {
        let table = RawTable::new(
            SourceId::Video,
            vec![
                video_row(json!("a"), json!("12k")),
                video_row(json!("b"), Value::Null),
                video_row(json!("c"), json!(-4)),
                RawRow::from_pairs([("title", json!("d"))]),
            ],
        );
        let records =
            normalize_table(&table, &ColumnMapping::for_source(SourceId::Video)).unwrap();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|record| record.popularity == 0.0));
    }

    #[test]
    fn rows_without_text_are_skipped() {
        let table = RawTable::new(
            SourceId::Video,
            vec![
                video_row(json!("   "), json!(1)),
                video_row(Value::Null, json!(2)),
                video_row(json!("kept"), json!(3)),
            ],
        );
        let records =
            normalize_table(&table, &ColumnMapping::for_source(SourceId::Video)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "video::2");
    }

    #[test]
    fn search_trends_popularity_is_rank_derived() {
        let table = RawTable::new(
            SourceId::SearchTrends,
            vec![
                RawRow::from_pairs([("termo", json!("Festival"))]),
                RawRow::from_pairs([("termo", json!("Show"))]),
                RawRow::from_pairs([("termo", json!("Turnê"))]),
            ],
        );
        let records =
            normalize_table(&table, &ColumnMapping::for_source(SourceId::SearchTrends)).unwrap();
        let ranks: Vec<f64> = records.iter().map(|record| record.popularity).collect();
        assert_eq!(ranks, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn missing_text_column_is_reported() {
        let table = RawTable::new(
            SourceId::SocialTopics,
            vec![RawRow::from_pairs([("volume", json!(10))])],
        );
        let err = normalize_table(&table, &ColumnMapping::for_source(SourceId::SocialTopics))
            .unwrap_err();
        assert!(matches!(
            err,
            InsightError::MissingColumn { source_id: SourceId::SocialTopics, ref column }
                if column == "subject"
        ));
    }

    #[test]
    fn likes_are_captured_for_video() {
        let table = RawTable::new(
            SourceId::Video,
            vec![video_row(json!("a"), json!(10)).with("likes", json!("2500"))],
        );
        let records =
            normalize_table(&table, &ColumnMapping::for_source(SourceId::Video)).unwrap();
        assert_eq!(records[0].likes, Some(2500.0));
    }
}
