use std::collections::BTreeSet;

use trendmine::config::{ClusterConfig, KSelection, MiningConfig};
use trendmine::data::{ContentItem, SourceId};
use trendmine::insights::{cluster_insights, rule_insights};
use trendmine::mining::{AssociationMiner, MiningOutcome};
use trendmine::{Clusterer, Term, build_baskets, min_max_scale};

fn terms(raw: &[&str]) -> Vec<Term> {
    raw.iter().map(|term| term.to_string()).collect()
}

fn pair(rule: &trendmine::AssociationRule) -> (String, String) {
    (rule.antecedent.join(","), rule.consequent.join(","))
}

#[test]
fn two_source_baskets_yield_hand_computed_rules() {
    let baskets = build_baskets(
        &[
            terms(&["musica", "festival", "show", "musica"]),
            terms(&["show", "turne", "musica", "evento"]),
        ],
        2,
    )
    .unwrap();
    let windows: Vec<Vec<&str>> = baskets
        .iter()
        .map(|basket| basket.items().iter().map(String::as_str).collect())
        .collect();
    assert_eq!(
        windows,
        vec![
            vec!["musica", "festival"],
            vec!["show", "musica"],
            vec!["show", "turne"],
            vec!["musica", "evento"],
        ]
    );

    let miner = AssociationMiner::new(MiningConfig::default()).unwrap();
    // 5 distinct terms: min(0.1, max(0.01, 1/5))
    assert!((miner.effective_min_support(5) - 0.1).abs() < 1e-12);

    let itemsets = miner.frequent_itemsets(&baskets).unwrap();
    let support = |items: &[&str]| {
        itemsets
            .iter()
            .find(|set| set.items.len() == items.len() && items.iter().all(|i| set.items.contains(&i.to_string())))
            .map(|set| set.support)
    };
    assert_eq!(support(&["musica"]), Some(0.75));
    assert_eq!(support(&["show"]), Some(0.5));
    assert_eq!(support(&["festival"]), Some(0.25));
    assert_eq!(support(&["musica", "show"]), Some(0.25));
    assert_eq!(support(&["show", "turne"]), Some(0.25));
    assert_eq!(support(&["festival", "show"]), None);

    let outcome = miner.mine(&baskets).unwrap();
    let MiningOutcome::Rules(report) = &outcome else {
        panic!("expected rules, got {outcome:?}");
    };
    assert_eq!(report.basket_count, 4);
    assert_eq!(report.distinct_terms, 5);

    let rules = outcome.rules();
    assert_eq!(rules.len(), 6);
    // lift 2.0 for show <-> turne leads, generation order kept on the tie
    assert_eq!(pair(&rules[0]), ("show".to_string(), "turne".to_string()));
    assert_eq!(pair(&rules[1]), ("turne".to_string(), "show".to_string()));
    assert!((rules[0].confidence - 0.5).abs() < 1e-9);
    assert!((rules[0].lift - 2.0).abs() < 1e-9);
    assert!((rules[1].confidence - 1.0).abs() < 1e-9);
    assert!((rules[1].lift - 2.0).abs() < 1e-9);

    let rest: BTreeSet<(String, String)> = rules[2..].iter().map(pair).collect();
    let expected: BTreeSet<(String, String)> = [
        ("musica", "festival"),
        ("festival", "musica"),
        ("musica", "evento"),
        ("evento", "musica"),
    ]
    .iter()
    .map(|(a, c)| (a.to_string(), c.to_string()))
    .collect();
    assert_eq!(rest, expected);
    for rule in &rules[2..] {
        assert!((rule.lift - 4.0 / 3.0).abs() < 1e-9);
        assert!((rule.support - 0.25).abs() < 1e-9);
    }
    // musica <-> show has lift 2/3 and is filtered out
    assert!(!rules.iter().any(|rule| pair(rule) == ("show".to_string(), "musica".to_string())));

    let insights = rule_insights(rules, 10);
    assert_eq!(insights[0].headline, "show → turne");
    assert_eq!(insights[2].lift, 1.3333);
}

#[test]
fn popularity_outlier_gets_its_own_cluster() {
    let mut popularity = vec![10.0; 11];
    popularity.push(90.0);
    let scaled = min_max_scale(&popularity);
    assert_eq!(scaled.iter().filter(|value| **value == 0.0).count(), 11);
    assert_eq!(scaled[11], 1.0);

    let items: Vec<ContentItem> = popularity
        .iter()
        .enumerate()
        .map(|(idx, popularity)| ContentItem {
            id: format!("music::{idx}"),
            source: SourceId::Music,
            text: format!("faixa {idx}"),
            popularity: *popularity,
            category: "pop".to_string(),
            engagement: None,
        })
        .collect();
    let clusterer = Clusterer::new(ClusterConfig {
        k: KSelection::Fixed(2),
        ..ClusterConfig::default()
    })
    .unwrap();
    let outcome = clusterer.cluster(&items).unwrap();
    assert_eq!(outcome.k, 2);

    let outlier_label = outcome.label_of("music::11").unwrap();
    for idx in 0..11 {
        assert_ne!(outcome.label_of(&format!("music::{idx}")), Some(outlier_label));
    }
    assert_eq!(outcome.members(outlier_label).len(), 1);
    assert!(outcome.silhouette.is_some_and(|score| score > 0.9));

    let insights = cluster_insights(&outcome, &items, 10);
    let outlier = &insights[outlier_label];
    assert_eq!(outlier.size, 1);
    assert_eq!(outlier.members[0].item_id, "music::11");
    assert_eq!(outlier.popularity_max, 90.0);
}
