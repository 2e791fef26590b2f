use language_utils::Language;
use language_utils::text_cleanup::normalize_sentence;

use crate::model::LanguageModel;
use crate::score::{MIN_TOKENS, score_tokens};

/// Default minimum lead of the best language over the runner-up
pub const DEFAULT_MARGIN: f64 = 0.4;

/// The language a sentence is believed to be in
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Known(Language),
    /// Too short, no language scored positively, or the top two were too close
    Unknown,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Known(language) => write!(f, "{language}"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LanguageScore {
    pub language: Language,
    pub relevance: f64,
}

/// Classification of a single sentence
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredSentence {
    pub verdict: Verdict,
    /// Every language's score, best first. Empty for sentences too short to score.
    pub ranking: Vec<LanguageScore>,
    /// Lead of the best score over the second best
    pub gap: f64,
}

impl ScoredSentence {
    fn too_short() -> Self {
        Self {
            verdict: Verdict::Unknown,
            ranking: Vec::new(),
            gap: 0.0,
        }
    }
}

/// Decision thresholds
///
/// The confidence rule is additive: the best language must lead the runner-up
/// by strictly more than `margin` in relevance (a difference of log-ratios).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClassifierConfig {
    pub margin: f64,
    pub min_tokens: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            min_tokens: MIN_TOKENS,
        }
    }
}

/// Rank `scores` and apply the confidence rule.
///
/// The sort is stable, so equal scores keep their input order.
pub fn decide(mut scores: Vec<LanguageScore>, margin: f64) -> ScoredSentence {
    scores.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

    let (verdict, gap) = match scores.as_slice() {
        [best, runner_up, ..] => {
            let gap = best.relevance - runner_up.relevance;
            if best.relevance < 0.0 || gap <= margin {
                (Verdict::Unknown, gap)
            } else {
                (Verdict::Known(best.language), gap)
            }
        }
        // Nothing to compare against
        _ => (Verdict::Unknown, 0.0),
    };

    ScoredSentence {
        verdict,
        ranking: scores,
        gap,
    }
}

/// Identifies the language of sentences against a shared, read-only model
#[derive(Copy, Clone, Debug)]
pub struct Classifier<'a> {
    model: &'a LanguageModel,
    config: ClassifierConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(model: &'a LanguageModel) -> Self {
        Self::with_config(model, ClassifierConfig::default())
    }

    pub fn with_config(model: &'a LanguageModel, config: ClassifierConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &'a LanguageModel {
        self.model
    }

    pub fn classify(&self, sentence: &str) -> ScoredSentence {
        self.classify_tokens(&normalize_sentence(sentence))
    }

    pub fn classify_tokens(&self, tokens: &[String]) -> ScoredSentence {
        if tokens.len() < self.config.min_tokens {
            return ScoredSentence::too_short();
        }
        decide(score_tokens(self.model, tokens), self.config.margin)
    }
}
