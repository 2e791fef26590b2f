//! Per-language relevance scores
//!
//! Formula (7) of Řehůřek and Kolkus (2009) with unit word weights:
//!
//! ```text
//! relevance(lang) = 1/N · Σ [ ln g_lang(w) − ln g_0(w) ]
//! ```
//!
//! where `g_lang` is the language's table, `g_0` the background table, and
//! missing words take the value [`FREQUENCY_FLOOR`] in both.

use crate::classify::LanguageScore;
use crate::model::{BackgroundTable, LanguageModel, LanguageTable};

/// Frequency used for a word a table does not contain, or lists with no mass
pub const FREQUENCY_FLOOR: f64 = 1e-12;

/// Sentences with fewer words than this are not scored
pub const MIN_TOKENS: usize = 3;

fn log_frequency(frequency: Option<f64>) -> f64 {
    frequency
        .filter(|&f| f > 0.0)
        .unwrap_or(FREQUENCY_FLOOR)
        .ln()
}

/// Average log-likelihood ratio of `tokens` under one language versus the background
pub fn relevance(table: &LanguageTable, background: &BackgroundTable, tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let total: f64 = tokens
        .iter()
        .map(|token| {
            log_frequency(table.frequency(token)) - log_frequency(background.frequency(token))
        })
        .sum();
    total / tokens.len() as f64
}

/// Score `tokens` against every language of the model, in model order
pub fn score_tokens(model: &LanguageModel, tokens: &[String]) -> Vec<LanguageScore> {
    model
        .tables()
        .iter()
        .map(|table| LanguageScore {
            language: table.language(),
            relevance: relevance(table, model.background(), tokens),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use language_utils::Language;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn model(english_cat: f64) -> LanguageModel {
        LanguageModel::from_tables(
            vec![
                LanguageTable::from_frequencies(
                    Language::English,
                    [("the", 0.05), ("cat", english_cat), ("sat", 0.01)],
                ),
                LanguageTable::from_frequencies(Language::French, [("le", 0.05), ("chat", 0.01)]),
            ],
            BackgroundTable::from_frequencies([
                ("the", 0.025),
                ("cat", 0.005),
                ("sat", 0.005),
                ("le", 0.025),
                ("chat", 0.005),
            ]),
        )
    }

    #[test]
    fn test_relevance_formula() {
        let model = model(0.01);
        let english = model.table(Language::English).unwrap();
        // Every word is twice as frequent in English as in the background
        let score = relevance(english, model.background(), &tokens(&["the", "cat", "sat"]));
        assert!((score - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_missing_words_use_floor() {
        let model = model(0.01);
        let french = model.table(Language::French).unwrap();
        let score = relevance(french, model.background(), &tokens(&["the"]));
        let expected = FREQUENCY_FLOOR.ln() - 0.025f64.ln();
        assert!((score - expected).abs() < 1e-9);

        // Unseen everywhere: floor over floor
        let score = relevance(french, model.background(), &tokens(&["zzz"]));
        assert_eq!(score, 0.0);
        assert!(score.is_finite());
    }

    #[test]
    fn test_zero_frequency_uses_floor() {
        let model = LanguageModel::from_tables(
            vec![
                LanguageTable::from_frequencies(Language::English, [("the", 0.05), ("rare", 0.0)]),
                LanguageTable::from_frequencies(Language::French, [("le", 0.05)]),
            ],
            BackgroundTable::from_frequencies([("the", 0.025), ("le", 0.025), ("rare", 0.0)]),
        );
        let scores = score_tokens(&model, &tokens(&["le", "rare", "the"]));
        for score in &scores {
            assert!(score.relevance.is_finite(), "{score:?}");
        }
        // "rare" is floor over floor in both languages
        let french = model.table(Language::French).unwrap();
        let expected = (2f64.ln() + FREQUENCY_FLOOR.ln() - 0.025f64.ln()) / 3.0;
        let score = relevance(french, model.background(), &tokens(&["le", "rare", "the"]));
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_scores_in_model_order() {
        let model = model(0.01);
        let scores = score_tokens(&model, &tokens(&["the", "cat", "sat"]));
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].language, Language::English);
        assert_eq!(scores[1].language, Language::French);
        assert!(scores[0].relevance > scores[1].relevance);
    }

    #[test]
    fn test_scores_are_reproducible() {
        let sentence = tokens(&["le", "chat", "the", "inconnu"]);
        let first = score_tokens(&model(0.01), &sentence);
        let second = score_tokens(&model(0.01), &sentence);
        assert_eq!(first, second);
    }

    #[test]
    fn test_raising_frequency_never_lowers_relevance() {
        let sentence = tokens(&["the", "cat", "le"]);
        let mut previous = f64::NEG_INFINITY;
        for english_cat in [0.0001, 0.001, 0.01, 0.02, 0.5] {
            let model = model(english_cat);
            let english = model.table(Language::English).unwrap();
            let score = relevance(english, model.background(), &sentence);
            assert!(score >= previous, "{score} < {previous} at {english_cat}");
            previous = score;
        }
    }
}
