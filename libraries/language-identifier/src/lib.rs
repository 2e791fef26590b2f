//! Dictionary-based language identification for short sentences.
//!
//! Character n-gram models need more text than a typical Tatoeba sentence
//! provides, so this crate uses the extended dictionary method of Řehůřek and
//! Kolkus (2009): each language gets a word-frequency table, all languages
//! together form a background table, and a sentence is scored per language by
//! the average log-ratio of its words' frequency in that language versus the
//! background.
//!
//! # Example
//!
//! ```
//! use language_identifier::{Classifier, ModelBuilder, Verdict, WordCount};
//! use language_utils::Language;
//!
//! fn word_list(words: &[(&str, u64)]) -> Vec<WordCount> {
//!     words.iter().map(|&(word, count)| WordCount::new(word, count)).collect()
//! }
//!
//! let english = word_list(&[("the", 50), ("cat", 10), ("sat", 10), ("dog", 30)]);
//! let french = word_list(&[("le", 50), ("chat", 10), ("chien", 40)]);
//!
//! let mut builder = ModelBuilder::new();
//! builder.add(Language::English, &english).unwrap();
//! builder.add(Language::French, &french).unwrap();
//! let model = builder.finish().unwrap();
//!
//! let scored = Classifier::new(&model).classify("The cat sat.");
//! assert_eq!(scored.verdict, Verdict::Known(Language::English));
//! ```

pub mod classify;
pub mod model;
pub mod score;
pub mod wordlist;

pub use classify::{Classifier, ClassifierConfig, LanguageScore, ScoredSentence, Verdict};
pub use model::{BackgroundTable, LanguageModel, LanguageTable, ModelBuilder};
pub use wordlist::{ParseMode, WordCount, WordListOptions};

use language_utils::Language;
use std::path::PathBuf;

/// Errors that prevent a language model from being built
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("Failed to open {language} word-list at {path:?}")]
    Open {
        language: Language,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {language} word-list")]
    Read {
        language: Language,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed line {line} in {language} word-list: {content:?}")]
    MalformedLine {
        language: Language,
        line: usize,
        content: String,
    },

    #[error("{language} word-list contains no words")]
    EmptyWordList { language: Language },

    #[error("{language} word-list was supplied more than once")]
    DuplicateLanguage { language: Language },

    #[error("No word-lists were supplied")]
    Empty,
}
