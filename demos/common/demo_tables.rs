use serde_json::{Value, json};
use trendmine::data::SourceId;
use trendmine::source::{RawRow, RawTable};

fn table(source: SourceId, rows: Vec<Value>) -> RawTable {
    let rows = rows
        .into_iter()
        .filter_map(|row| match row {
            Value::Object(cells) => Some(RawRow::from_pairs(cells)),
            _ => None,
        })
        .collect();
    RawTable::new(source, rows)
}

/// A small weekend snapshot across all four sources.
pub fn build_demo_tables() -> Vec<RawTable> {
    vec![
        table(
            SourceId::Music,
            vec![
                json!({"title": "Modão de Viola (Sertanejo Ao Vivo)", "artist": "Dupla Serrana", "popularity": 91}),
                json!({"title": "Baile da Favela Funk Remix", "artist": "MC Norte", "popularity": 88}),
                json!({"title": "Pagode de Domingo", "artist": "Grupo Roda", "popularity": 74}),
                json!({"title": "Noite de Forró", "artist": "Trio Sanfona", "popularity": 69}),
                json!({"title": "Sertanejo Raiz", "artist": "Violeiros", "popularity": 65}),
                json!({"title": "Trap do Morro", "artist": "Lil Beco", "popularity": 62}),
                json!({"title": "Funk do Verão", "artist": "MC Praia", "popularity": 60}),
                json!({"title": "Balada Pop", "artist": "Luna", "popularity": 41}),
                json!({"title": "Samba Enredo 2025", "artist": "Escola Azul", "popularity": 37}),
                json!({"title": "Gospel Acústico", "artist": "Coral Vida", "popularity": 22}),
            ],
        ),
        table(
            SourceId::Video,
            vec![
                json!({"title": "Final do Campeonato - Futebol Melhores Momentos", "channel": "Esporte Já", "view_count": "1850000", "likes": 42000}),
                json!({"title": "Gameplay Completo do Lançamento", "channel": "Joga Muito", "view_count": "920000", "likes": 18000}),
                json!({"title": "Clipe Oficial - Baile da Favela", "channel": "MC Norte", "view_count": "780000", "likes": 35000}),
                json!({"title": "Podcast com Convidado Especial", "channel": "Papo Reto", "view_count": "310000", "likes": 900}),
                json!({"title": "Receita de Bolo de Fubá", "channel": "Cozinha Simples", "view_count": "150000", "likes": 4000}),
                json!({"title": "Trailer da Nova Série", "channel": "Cine Mais", "view_count": "98000", "likes": 700}),
                json!({"title": "Vlog de Viagem", "channel": "Mochila", "view_count": "45000", "likes": 300}),
            ],
        ),
        table(
            SourceId::SearchTrends,
            vec![
                json!({"term": "Final do campeonato"}),
                json!({"term": "show"}),
                json!({"term": "festival"}),
                json!({"term": "show"}),
                json!({"term": "ingressos"}),
                json!({"term": "festival"}),
                json!({"term": "show"}),
                json!({"term": "festival"}),
            ],
        ),
        table(
            SourceId::SocialTopics,
            vec![
                json!({"subject": "show", "impression_volume": 120000}),
                json!({"subject": "turnê", "impression_volume": 80000}),
                json!({"subject": "festival", "impression_volume": 64000}),
                json!({"subject": "show", "impression_volume": 51000}),
                json!({"subject": "ingressos", "impression_volume": 47000}),
                json!({"subject": "festival", "impression_volume": null}),
            ],
        ),
    ]
}
