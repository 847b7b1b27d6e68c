/// Constants used by record normalization and default column mappings.
pub mod normalize {
    /// Text column candidates for music chart tables.
    pub const MUSIC_TEXT_COLUMNS: &[&str] = &["title", "name", "nome"];
    /// Creator column candidates for music chart tables.
    pub const MUSIC_CREATOR_COLUMNS: &[&str] = &["artist", "artista"];
    /// Popularity column candidates for music chart tables.
    pub const MUSIC_POPULARITY_COLUMNS: &[&str] = &["popularity", "popularidade"];

    /// Text column candidates for video chart tables.
    pub const VIDEO_TEXT_COLUMNS: &[&str] = &["title", "titulo"];
    /// Creator column candidates for video chart tables.
    pub const VIDEO_CREATOR_COLUMNS: &[&str] = &["channel", "canal"];
    /// Popularity column candidates for video chart tables.
    pub const VIDEO_POPULARITY_COLUMNS: &[&str] = &["view_count", "views", "visualizacoes"];
    /// Like-count column candidates for video chart tables.
    pub const VIDEO_LIKES_COLUMNS: &[&str] = &["likes", "like_count"];

    /// Text column candidates for search-trend tables.
    pub const SEARCH_TEXT_COLUMNS: &[&str] = &["term", "termo"];

    /// Text column candidates for social-topic tables.
    pub const SOCIAL_TEXT_COLUMNS: &[&str] = &["subject", "assunto", "name"];
    /// Popularity column candidates for social-topic tables.
    pub const SOCIAL_POPULARITY_COLUMNS: &[&str] =
        &["impression_volume", "volume", "tweet_volume"];

    /// Separator between source tag and row index in item ids.
    pub const ITEM_ID_DELIMITER: &str = "::";
}

/// Constants used by basket construction.
pub mod baskets {
    /// Default number of terms per basket window.
    pub const DEFAULT_GROUP_SIZE: usize = 2;
}

/// Constants used by frequent-itemset mining and rule derivation.
pub mod mining {
    /// Default minimum support (fraction of baskets).
    pub const DEFAULT_MIN_SUPPORT: f64 = 0.1;
    /// Lowest effective support reachable through auto-scaling.
    pub const SUPPORT_FLOOR: f64 = 0.01;
    /// Default minimum lift; rules below chance are dropped.
    pub const DEFAULT_MIN_LIFT: f64 = 1.0;
    /// Default minimum confidence (disabled).
    pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.0;
    /// Default number of rules kept after ranking by lift.
    pub const DEFAULT_TOP_RULES: usize = 10;
    /// Most rules a run may keep or show.
    pub const MAX_TOP_RULES: usize = 10;
    /// Longest itemset searched, whatever the basket size.
    pub const MAX_ITEMSET_LEN: usize = 16;
    /// Slack for lift/confidence threshold comparisons (ratios of ratios).
    pub const THRESHOLD_TOLERANCE: f64 = 1e-9;
    /// Default per-level cap on candidate itemsets.
    pub const DEFAULT_MAX_CANDIDATES: usize = 100_000;
}

/// Constants used by the clusterer.
pub mod cluster {
    /// Fallback cluster count when no automatic choice is possible.
    pub const DEFAULT_K: usize = 3;
    /// Largest k evaluated by automatic selection.
    pub const MAX_AUTO_K: usize = 10;
    /// Items required per candidate cluster during automatic selection.
    pub const ITEMS_PER_CLUSTER: usize = 10;
    /// Maximum Lloyd iterations per k-means run.
    pub const MAX_ITERATIONS: usize = 100;
}

/// Constants used by genre inference.
pub mod genre {
    /// Sentinel category when no vocabulary keyword matches.
    pub const OTHER_CATEGORY: &str = "other";

    /// Default music genre vocabulary, in match-priority order.
    pub const MUSIC_GENRES: &[&str] = &[
        "sertanejo",
        "funk",
        "pagode",
        "samba",
        "forró",
        "forro",
        "piseiro",
        "arrocha",
        "axé",
        "mpb",
        "gospel",
        "trap",
        "rap",
        "hip hop",
        "reggaeton",
        "reggae",
        "rock",
        "k-pop",
        "pop",
        "eletrônica",
        "electronic",
        "jazz",
        "blues",
    ];

    /// Default content genre vocabulary for video, search, and social sources.
    pub const CONTENT_GENRES: &[&str] = &[
        "música",
        "musica",
        "clipe",
        "music",
        "gameplay",
        "gaming",
        "jogo",
        "futebol",
        "esporte",
        "podcast",
        "entrevista",
        "humor",
        "comédia",
        "comedy",
        "vlog",
        "tutorial",
        "receita",
        "notícias",
        "news",
        "trailer",
        "review",
        "novela",
        "série",
        "reality",
    ];
}

/// Constants used by engagement labeling.
pub mod engagement {
    /// Likes above this count mark an item as positively received.
    pub const DEFAULT_LIKES_THRESHOLD: f64 = 1000.0;
}

/// Constants used by the insight formatter.
pub mod insights {
    /// Default number of rules shown.
    pub const DEFAULT_RULE_LIMIT: usize = 10;
    /// Default number of members listed per cluster.
    pub const DEFAULT_MEMBERS_LIMIT: usize = 10;
    /// Default number of top items listed per source.
    pub const DEFAULT_TOP_ITEMS_LIMIT: usize = 10;
    /// Decimal places kept on displayed metrics.
    pub const METRIC_DECIMALS: i32 = 4;
    /// Separator between antecedent and consequent in rule headlines.
    pub const RULE_ARROW: &str = " → ";
}

/// Constants used by the caller-owned insight cache.
pub mod cache {
    /// Default number of cached reports kept before FIFO eviction.
    pub const DEFAULT_MAX_ENTRIES: usize = 32;
}

/// Stop words removed from natural-language text (Portuguese and English).
pub mod stop_words {
    /// Default stop-word list.
    pub const DEFAULT_STOP_WORDS: &[&str] = &[
        // Portuguese
        "a", "à", "ao", "aos", "as", "às", "com", "como", "da", "das", "de", "do", "dos", "e",
        "é", "em", "entre", "essa", "esse", "esta", "este", "eu", "ele", "ela", "for", "mais",
        "mas", "me", "meu", "minha", "na", "nas", "no", "nos", "não", "o", "os", "ou", "para",
        "pela", "pelo", "por", "pra", "que", "se", "sem", "seu", "sua", "um", "uma", "vai",
        "você",
        // English
        "an", "and", "are", "at", "be", "by", "from", "in", "is", "it", "of", "on", "or",
        "the", "this", "to", "vs", "with",
    ];
}
