//! Genre/category inference by whole-word keyword matching.
//!
//! Vocabularies are explicit configuration (`GenreVocabulary`) keyed by source.
//! Keywords are tried in list order and the first whole-word hit wins, so the
//! order of a vocabulary is part of its meaning.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::genre::{CONTENT_GENRES, MUSIC_GENRES, OTHER_CATEGORY};
use crate::data::SourceId;
use crate::errors::InsightError;
use crate::types::{CategoryLabel, Keyword};
use crate::utils::{StopWords, normalize_term};

/// Ordered keyword lists per source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreVocabulary {
    entries: IndexMap<SourceId, Vec<Keyword>>,
}

impl Default for GenreVocabulary {
    fn default() -> Self {
        let mut vocabulary = Self::empty();
        for source in SourceId::ALL {
            let defaults = match source {
                SourceId::Music => MUSIC_GENRES,
                SourceId::Video | SourceId::SearchTrends | SourceId::SocialTopics => {
                    CONTENT_GENRES
                }
            };
            vocabulary = vocabulary.with_keywords(source, defaults.iter().copied());
        }
        vocabulary
    }
}

impl GenreVocabulary {
    /// A vocabulary with no keywords for any source.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Append keywords for `source`. Keywords are lower-cased; blanks and
    /// duplicates are ignored so earlier entries keep their priority.
    pub fn with_keywords<I, S>(mut self, source: SourceId, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = self.entries.entry(source).or_default();
        for keyword in keywords {
            let keyword = normalize_term(keyword);
            if !keyword.is_empty() && !list.contains(&keyword) {
                list.push(keyword);
            }
        }
        self
    }

    /// Replace the keyword list for `source`.
    pub fn replace_keywords<I, S>(mut self, source: SourceId, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries.insert(source, Vec::new());
        self.with_keywords(source, keywords)
    }

    /// Keywords for `source` in match-priority order.
    pub fn keywords(&self, source: SourceId) -> &[Keyword] {
        self.entries.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sources that carry a vocabulary.
    pub fn sources(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.entries.keys().copied()
    }
}

/// Compiled matcher for one keyword.
#[derive(Clone, Debug)]
struct KeywordMatcher {
    keyword: Keyword,
    pattern: Regex,
}

/// Infers a category label for free text from a compiled vocabulary.
#[derive(Clone, Debug)]
pub struct GenreInferencer {
    stop_words: StopWords,
    matchers: IndexMap<SourceId, Vec<KeywordMatcher>>,
}

impl GenreInferencer {
    /// Compile `vocabulary`, filtering keyword tokens with the same stop words
    /// later applied to text.
    pub fn new(vocabulary: &GenreVocabulary, stop_words: StopWords) -> Result<Self, InsightError> {
        let mut matchers = IndexMap::new();
        for source in vocabulary.sources() {
            let compiled = vocabulary
                .keywords(source)
                .iter()
                .map(|keyword| compile_keyword(source, keyword, &stop_words))
                .collect::<Result<Vec<_>, _>>()?;
            matchers.insert(source, compiled);
        }
        Ok(Self {
            stop_words,
            matchers,
        })
    }

    /// First keyword of `source`'s vocabulary found as a whole word in `text`,
    /// or `"other"`.
    pub fn infer(&self, source: SourceId, text: &str) -> CategoryLabel {
        let filtered = self.stop_words.filter(text);
        self.matchers
            .get(&source)
            .and_then(|matchers| {
                matchers
                    .iter()
                    .find(|matcher| matcher.pattern.is_match(&filtered))
            })
            .map(|matcher| matcher.keyword.clone())
            .unwrap_or_else(|| OTHER_CATEGORY.to_string())
    }
}

fn compile_keyword(
    source: SourceId,
    keyword: &str,
    stop_words: &StopWords,
) -> Result<KeywordMatcher, InsightError> {
    let filtered = stop_words.filter(keyword);
    if filtered.is_empty() {
        return Err(InsightError::InvalidKeyword {
            source_id: source,
            keyword: keyword.to_string(),
            reason: "keyword consists only of stop words".to_string(),
        });
    }
    let body = filtered
        .split(' ')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    // Non-word anchors, so keywords may start or end with punctuation (`#tbt`, `c++`).
    let pattern = Regex::new(&format!(r"(?i)(?:^|\W){body}(?:\W|$)")).map_err(|err| {
        InsightError::InvalidKeyword {
            source_id: source,
            keyword: keyword.to_string(),
            reason: err.to_string(),
        }
    })?;
    Ok(KeywordMatcher {
        keyword: keyword.to_string(),
        pattern,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inferencer(vocabulary: GenreVocabulary) -> GenreInferencer {
        GenreInferencer::new(&vocabulary, StopWords::default()).expect("vocabulary")
    }

    #[test]
    fn whole_word_matches_only() {
        let vocab = GenreVocabulary::empty().with_keywords(SourceId::Music, ["pop", "rock"]);
        let genres = inferencer(vocab);
        assert_eq!(genres.infer(SourceId::Music, "Popular Hits"), "other");
        assert_eq!(genres.infer(SourceId::Music, "Rocky Road"), "other");
        assert_eq!(genres.infer(SourceId::Music, "Indie Rock Anthem"), "rock");
    }

    #[test]
    fn keywords_with_punctuation_match_as_whole_words() {
        let vocab = GenreVocabulary::empty().with_keywords(SourceId::SocialTopics, ["#tbt", "c++"]);
        let genres = inferencer(vocab);
        assert_eq!(genres.infer(SourceId::SocialTopics, "#TBT da semana"), "#tbt");
        assert_eq!(genres.infer(SourceId::SocialTopics, "curso de C++ gratis"), "c++");
        assert_eq!(genres.infer(SourceId::SocialTopics, "abc++ build"), "other");
        assert_eq!(genres.infer(SourceId::SocialTopics, "#tbtx"), "other");
    }

    #[test]
    fn first_vocabulary_entry_wins() {
        let vocab = GenreVocabulary::empty().with_keywords(SourceId::Music, ["funk", "pop"]);
        let genres = inferencer(vocab);
        assert_eq!(genres.infer(SourceId::Music, "Pop Funk Mix"), "funk");

        let reversed = GenreVocabulary::empty().with_keywords(SourceId::Music, ["pop", "funk"]);
        let genres = inferencer(reversed);
        assert_eq!(genres.infer(SourceId::Music, "Pop Funk Mix"), "pop");
    }

    #[test]
    fn matching_is_case_insensitive_and_unicode_aware() {
        let genres = inferencer(GenreVocabulary::default());
        assert_eq!(genres.infer(SourceId::Music, "FORRÓ das Antigas"), "forró");
        assert_eq!(
            genres.infer(SourceId::Video, "Melhores momentos do Futebol"),
            "futebol"
        );
    }

    #[test]
    fn multi_word_keywords_survive_stop_word_filtering() {
        let vocab =
            GenreVocabulary::empty().with_keywords(SourceId::Music, ["forró pé de serra"]);
        let genres = inferencer(vocab);
        assert_eq!(
            genres.infer(SourceId::Music, "Forró  Pé de Serra ao vivo"),
            "forró pé de serra"
        );
    }

    #[test]
    fn custom_additions_append_after_defaults() {
        let vocab = GenreVocabulary::default().with_keywords(SourceId::Music, ["brega", "Funk"]);
        let keywords = vocab.keywords(SourceId::Music);
        assert_eq!(keywords.last().map(String::as_str), Some("brega"));
        assert_eq!(keywords.iter().filter(|k| k.as_str() == "funk").count(), 1);
        let genres = inferencer(vocab);
        assert_eq!(genres.infer(SourceId::Music, "Brega Funk"), "funk");
        assert_eq!(genres.infer(SourceId::Music, "Brega Romântico"), "brega");
    }

    #[test]
    fn inference_is_repeatable() {
        let genres = inferencer(GenreVocabulary::default());
        let first = genres.infer(SourceId::SocialTopics, "novo trailer da série");
        for _ in 0..5 {
            assert_eq!(genres.infer(SourceId::SocialTopics, "novo trailer da série"), first);
        }
        assert_eq!(first, "trailer");
    }

    #[test]
    fn stop_word_only_keywords_are_rejected() {
        let vocab = GenreVocabulary::empty().with_keywords(SourceId::Video, ["de"]);
        let err = GenreInferencer::new(&vocab, StopWords::default()).unwrap_err();
        assert!(matches!(err, InsightError::InvalidKeyword { .. }));
    }

    #[test]
    fn sources_without_vocabulary_fall_back_to_other() {
        let genres = inferencer(GenreVocabulary::empty());
        assert_eq!(genres.infer(SourceId::Video, "gameplay"), "other");
    }
}
