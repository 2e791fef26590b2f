//! Per-language and background word-frequency tables

use language_utils::Language;
use rustc_hash::FxHashMap;

use crate::ModelLoadError;
use crate::wordlist::WordCount;

/// Relative frequency of each word within one language's word-list
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageTable {
    language: Language,
    frequencies: FxHashMap<String, f64>,
}

impl LanguageTable {
    /// Build a table from frequencies that are already normalized
    pub fn from_frequencies<W: Into<String>>(
        language: Language,
        frequencies: impl IntoIterator<Item = (W, f64)>,
    ) -> Self {
        Self {
            language,
            frequencies: frequencies
                .into_iter()
                .map(|(word, frequency)| (word.into(), frequency))
                .collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn frequency(&self, word: &str) -> Option<f64> {
        self.frequencies.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn frequencies(&self) -> impl Iterator<Item = (&str, f64)> {
        self.frequencies
            .iter()
            .map(|(word, &frequency)| (word.as_str(), frequency))
    }
}

/// Frequency of each word across every language's word-list
///
/// A word's count is summed over all languages listing it and divided by the
/// summed word mass of all languages. A word shared by K languages therefore
/// contributes K counts to its numerator.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundTable {
    frequencies: FxHashMap<String, f64>,
}

impl BackgroundTable {
    pub fn from_frequencies<W: Into<String>>(frequencies: impl IntoIterator<Item = (W, f64)>) -> Self {
        Self {
            frequencies: frequencies
                .into_iter()
                .map(|(word, frequency)| (word.into(), frequency))
                .collect(),
        }
    }

    pub fn frequency(&self, word: &str) -> Option<f64> {
        self.frequencies.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Tables for every language in a run, plus the background table
///
/// The languages of the model are the supported set: corpus records in any
/// other language are out of scope.
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageModel {
    tables: Vec<LanguageTable>,
    background: BackgroundTable,
}

impl LanguageModel {
    /// Assemble a model from prebuilt tables. Table order is the order scores
    /// are reported in before ranking.
    pub fn from_tables(tables: Vec<LanguageTable>, background: BackgroundTable) -> Self {
        Self { tables, background }
    }

    pub fn tables(&self) -> &[LanguageTable] {
        &self.tables
    }

    pub fn table(&self, language: Language) -> Option<&LanguageTable> {
        self.tables.iter().find(|table| table.language == language)
    }

    pub fn background(&self) -> &BackgroundTable {
        &self.background
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.tables.iter().map(|table| table.language)
    }

    pub fn supports(&self, language: Language) -> bool {
        self.table(language).is_some()
    }
}

/// Builds a [`LanguageModel`] one word-list at a time
///
/// Raw counts are accumulated as integers and only divided once in
/// [`ModelBuilder::finish`], so the result does not depend on the order
/// word-lists were loaded in, only on the order they were added.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    tables: Vec<LanguageTable>,
    background_counts: FxHashMap<String, u64>,
    grand_total: u64,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, language: Language, words: &[WordCount]) -> Result<(), ModelLoadError> {
        if self.tables.iter().any(|table| table.language == language) {
            return Err(ModelLoadError::DuplicateLanguage { language });
        }

        // Zero-count entries carry no frequency mass
        let mut counts: FxHashMap<&str, u64> = FxHashMap::default();
        for entry in words.iter().filter(|entry| entry.count > 0) {
            *counts.entry(entry.word.as_str()).or_insert(0) += entry.count;
        }

        let distinct_words = counts.len();
        let total_count: u64 = counts.values().sum();
        if total_count == 0 {
            return Err(ModelLoadError::EmptyWordList { language });
        }

        let frequencies = counts
            .iter()
            .map(|(&word, &count)| (word.to_string(), count as f64 / total_count as f64))
            .collect();

        for (word, count) in counts {
            *self.background_counts.entry(word.to_string()).or_insert(0) += count;
        }
        self.grand_total += total_count;

        log::debug!(
            "{language}: {distinct_words} distinct words, {total_count} total occurrences"
        );

        self.tables.push(LanguageTable {
            language,
            frequencies,
        });
        Ok(())
    }

    pub fn finish(self) -> Result<LanguageModel, ModelLoadError> {
        if self.tables.is_empty() {
            return Err(ModelLoadError::Empty);
        }

        let grand_total = self.grand_total;
        let frequencies = self
            .background_counts
            .into_iter()
            .map(|(word, count)| (word, count as f64 / grand_total as f64))
            .collect();

        log::info!(
            "Built language model for {} languages ({grand_total} words of background text)",
            self.tables.len()
        );

        Ok(LanguageModel {
            tables: self.tables,
            background: BackgroundTable { frequencies },
        })
    }

    /// Build a model from `(language, word-list)` pairs in order
    pub fn build(
        word_lists: impl IntoIterator<Item = (Language, Vec<WordCount>)>,
    ) -> Result<LanguageModel, ModelLoadError> {
        let mut builder = Self::new();
        for (language, words) in word_lists {
            builder.add(language, &words)?;
        }
        builder.finish()
    }
}
