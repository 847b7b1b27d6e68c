/// Unique content-item identifier (stable within one run).
/// Example: `video::12`
pub type ItemId = String;
/// Normalized, lower-cased term used as a basket item.
/// Examples: `musica`, `festival de verao`
pub type Term = String;
/// Inferred category (genre) label.
/// Examples: `sertanejo`, `gaming`, `other`
pub type CategoryLabel = String;
/// Column name in a raw source table.
/// Examples: `title`, `view_count`, `assunto`
pub type ColumnName = String;
/// Vocabulary keyword matched as a whole word.
/// Examples: `funk`, `hip hop`, `podcast`
pub type Keyword = String;
/// Warning/log message text.
/// Example: `[trendmine:normalize] source 'video' row 3 popularity '12k' is not numeric; using 0`
pub type LogMessage = String;
/// Key for cached insight reports (content hash of tables plus configuration).
pub type CacheKey = u64;
/// Integer cluster label in `0..k`.
pub type ClusterLabel = usize;
