use chrono::Duration;
use serde_json::{Value, json};

use trendmine::config::{InsightConfig, KSelection};
use trendmine::data::SourceId;
use trendmine::engagement::EngagementLabel;
use trendmine::insights::InsightStatus;
use trendmine::source::{RawRow, RawTable};
use trendmine::{InsightCache, InsightEngine};

fn table(source: SourceId, rows: Vec<Value>) -> RawTable {
    RawTable::new(
        source,
        rows.into_iter()
            .filter_map(|row| match row {
                Value::Object(cells) => Some(RawRow::from_pairs(cells)),
                _ => None,
            })
            .collect(),
    )
}

fn snapshot() -> Vec<RawTable> {
    vec![
        table(
            SourceId::Music,
            vec![
                json!({"title": "Sertanejo Raiz", "artist": "Violeiros", "popularity": 80}),
                json!({"title": "Funk do Verão", "artist": "MC Praia", "popularity": 78}),
                json!({"title": "Pagode de Domingo", "artist": "Grupo Roda", "popularity": "n/a"}),
            ],
        ),
        table(
            SourceId::Video,
            vec![
                json!({"title": "Gameplay Completo", "channel": "Joga", "view_count": "920000", "likes": 18000}),
                json!({"title": "Vlog de Viagem", "channel": "Mochila", "view_count": "45000", "likes": 300}),
                json!({"channel": "Sem Titulo", "view_count": "1"}),
            ],
        ),
        table(
            SourceId::SearchTrends,
            vec![
                json!({"term": "musica"}),
                json!({"term": "festival"}),
                json!({"term": "show"}),
                json!({"term": "musica"}),
            ],
        ),
        table(
            SourceId::SocialTopics,
            vec![
                json!({"subject": "show", "impression_volume": 120000}),
                json!({"subject": "turne", "impression_volume": 80000}),
                json!({"subject": "musica", "impression_volume": 64000}),
                json!({"subject": "evento", "impression_volume": 51000}),
            ],
        ),
    ]
}

fn fixed_k(k: usize) -> InsightConfig {
    let mut config = InsightConfig::default();
    config.clustering.k = KSelection::Fixed(k);
    config
}

#[test]
fn full_run_produces_both_insight_sets() {
    let engine = InsightEngine::new(fixed_k(2)).unwrap();
    let report = engine.run(&snapshot());

    assert_eq!(report.rules_status, InsightStatus::Ready);
    assert_eq!(report.rules.len(), 6);
    assert_eq!(report.rules[0].headline, "show → turne");

    assert_eq!(report.clusters_status, InsightStatus::Ready);
    assert_eq!(report.cluster_k, Some(2));
    let clustered: usize = report.clusters.iter().map(|c| c.size).sum();
    // the untitled video row is skipped
    assert_eq!(clustered, 5);

    let gameplay = report
        .clusters
        .iter()
        .flat_map(|c| c.members.iter())
        .find(|m| m.text == "Gameplay Completo")
        .expect("gameplay member");
    assert_eq!(gameplay.category, "gameplay");
    assert_eq!(gameplay.engagement, Some(EngagementLabel::Positive));
    assert_eq!(gameplay.popularity, 920000.0);

    let pagode = report
        .clusters
        .iter()
        .flat_map(|c| c.members.iter())
        .find(|m| m.text == "Pagode de Domingo")
        .expect("pagode member");
    assert_eq!(pagode.popularity, 0.0);
    assert_eq!(pagode.engagement, None);

    let search = report
        .top_items
        .iter()
        .find(|group| group.source == SourceId::SearchTrends)
        .expect("search top items");
    assert_eq!(search.items[0].text, "musica");
    assert_eq!(search.items[0].popularity, 4.0);

    let mix = report.record_mix.expect("record mix");
    assert_eq!(mix.total, 13);
}

#[test]
fn mining_failure_does_not_block_clustering() {
    let mut config = fixed_k(2);
    config.baskets.group_size = 4;
    config.mining.max_candidates = 1;
    let report = InsightEngine::new(config).unwrap().run(&snapshot());

    assert!(report.rules_status.is_failed());
    assert!(report.rules.is_empty());
    assert_eq!(report.clusters_status, InsightStatus::Ready);
    assert!(!report.clusters.is_empty());
}

#[test]
fn missing_sources_are_no_signal_not_errors() {
    let engine = InsightEngine::new(InsightConfig::default()).unwrap();
    let report = engine.run(&[]);
    assert_eq!(
        report.rules_status,
        InsightStatus::NoSignal("no baskets to mine".to_string())
    );
    assert!(matches!(report.clusters_status, InsightStatus::NoSignal(_)));
    assert!(report.top_items.is_empty());
    assert!(report.record_mix.is_none());
}

#[test]
fn filters_narrow_both_branches() {
    let mut config = fixed_k(2);
    config.filter.sources = Some(vec![SourceId::Music, SourceId::SearchTrends]);
    config.filter.category = Some("funk".to_string());
    let report = InsightEngine::new(config).unwrap().run(&snapshot());

    assert_eq!(report.clusters.len(), 1);
    assert_eq!(report.clusters[0].members[0].text, "Funk do Verão");
    assert!(
        report
            .top_items
            .iter()
            .all(|group| matches!(group.source, SourceId::Music | SourceId::SearchTrends))
    );
}

#[test]
fn repeated_source_tables_cluster_every_item_once() {
    let music = |title: &str, popularity: u64| {
        table(
            SourceId::Music,
            vec![json!({"title": title, "artist": "Banda", "popularity": popularity})],
        )
    };
    let engine = InsightEngine::new(fixed_k(2)).unwrap();
    let report = engine.run(&[music("Funk A", 1), music("Rock B", 99)]);

    let mut members: Vec<(String, String)> = report
        .clusters
        .iter()
        .flat_map(|c| c.members.iter())
        .map(|m| (m.item_id.clone(), m.text.clone()))
        .collect();
    members.sort();
    assert_eq!(
        members,
        vec![
            ("music::0".to_string(), "Funk A".to_string()),
            ("music::1".to_string(), "Rock B".to_string()),
        ]
    );
    assert_eq!(report.cluster_k, Some(2));
}

#[test]
fn custom_vocabulary_entries_take_effect() {
    let mut config = fixed_k(1);
    config.vocabulary = config
        .vocabulary
        .replace_keywords(SourceId::Video, ["viagem"]);
    let report = InsightEngine::new(config).unwrap().run(&snapshot());
    let vlog = report
        .clusters
        .iter()
        .flat_map(|c| c.members.iter())
        .find(|m| m.text == "Vlog de Viagem")
        .expect("vlog");
    assert_eq!(vlog.category, "viagem");
}

#[test]
fn cache_answers_repeat_runs_and_tracks_config() {
    let tables = snapshot();
    let mut cache = InsightCache::new(2);
    let engine = InsightEngine::new(fixed_k(2)).unwrap();

    let first = engine.run_cached(&mut cache, &tables);
    let again = engine.run_cached(&mut cache, &tables);
    assert_eq!(first, again);
    assert_eq!(cache.len(), 1);

    let other = InsightEngine::new(fixed_k(1)).unwrap();
    let changed = other.run_cached(&mut cache, &tables);
    assert_eq!(changed.cluster_k, Some(1));
    assert_eq!(cache.len(), 2);

    assert_eq!(cache.evict_older_than(Duration::hours(1)), 0);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn config_files_drive_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("insights.json");
    std::fs::write(
        &path,
        r#"{"clustering":{"k":{"fixed":2}},"mining":{"top_n":2},"rule_limit":1}"#,
    )
    .unwrap();
    let config = InsightConfig::from_json_file(&path).unwrap();
    let report = InsightEngine::new(config).unwrap().run(&snapshot());
    assert_eq!(report.rules.len(), 1);
    assert_eq!(report.cluster_k, Some(2));
}
