//! Reading frequency word-lists
//!
//! A word-list is a text file of `<word> <count>` lines sorted by descending
//! count, one file per language named after its ISO 639-3 code (`fra.txt`).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use language_utils::Language;
use rayon::prelude::*;

use crate::ModelLoadError;

/// How many entries of each word-list are used by default
pub const DEFAULT_MAX_WORDS: usize = 50_000;

/// A word and its raw occurrence count
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// What to do with a line that is not `<word> <count>`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Fail the whole model build
    #[default]
    Strict,
    /// Log a warning and skip the line
    Lenient,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WordListOptions {
    /// Entries beyond this many are ignored
    pub max_words: usize,
    pub mode: ParseMode,
}

impl Default for WordListOptions {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            mode: ParseMode::default(),
        }
    }
}

/// Path of a language's word-list inside a dictionary directory
pub fn dictionary_path(dir: &Path, language: Language) -> PathBuf {
    dir.join(format!("{}.txt", language.iso_639_3()))
}

/// Parse a word-list, keeping at most `options.max_words` entries in file order.
///
/// Words are kept verbatim. Blank lines are ignored and do not count toward
/// the cap; neither do lines skipped in [`ParseMode::Lenient`].
pub fn parse_word_list<R: BufRead>(
    reader: R,
    language: Language,
    options: WordListOptions,
) -> Result<Vec<WordCount>, ModelLoadError> {
    let mut entries = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        if entries.len() >= options.max_words {
            break;
        }

        let line = line.map_err(|source| ModelLoadError::Read { language, source })?;
        let line = line.strip_prefix('\u{feff}').unwrap_or(line.as_str());
        if line.trim().is_empty() {
            continue;
        }

        match parse_entry(line) {
            Some(entry) => entries.push(entry),
            None => match options.mode {
                ParseMode::Strict => {
                    return Err(ModelLoadError::MalformedLine {
                        language,
                        line: idx + 1,
                        content: line.to_string(),
                    });
                }
                ParseMode::Lenient => {
                    log::warn!(
                        "Skipping malformed line {} in {language} word-list: {line:?}",
                        idx + 1
                    );
                }
            },
        }
    }

    Ok(entries)
}

fn parse_entry(line: &str) -> Option<WordCount> {
    let mut fields = line.split_whitespace();
    let word = fields.next()?;
    let count = fields.next()?.parse::<u64>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(WordCount::new(word, count))
}

/// Load the word-lists of `languages` from `dir`, in parallel.
///
/// The result is in the same order as `languages`. `on_loaded` is called once
/// per language as soon as its list has been parsed, from whichever thread
/// parsed it.
pub fn load_dictionary_dir(
    dir: &Path,
    languages: &[Language],
    options: WordListOptions,
    on_loaded: impl Fn(Language) + Sync,
) -> Result<Vec<(Language, Vec<WordCount>)>, ModelLoadError> {
    languages
        .par_iter()
        .map(|&language| {
            let path = dictionary_path(dir, language);
            let file = File::open(&path).map_err(|source| ModelLoadError::Open {
                language,
                path: path.clone(),
                source,
            })?;
            let entries = parse_word_list(BufReader::new(file), language, options)?;
            log::debug!(
                "Loaded {} words for {language} from {}",
                entries.len(),
                path.display()
            );
            on_loaded(language);
            Ok((language, entries))
        })
        .collect()
}
