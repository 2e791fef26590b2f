//! Command-line entry point

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use language_identifier::wordlist::{DEFAULT_MAX_WORDS, load_dictionary_dir};
use language_identifier::{
    ClassifierConfig, LanguageModel, ModelBuilder, ParseMode, WordListOptions,
};
use language_utils::LANGUAGES;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::audit::{AuditConfig, AuditResult, Auditor};
use crate::report::write_report;

const WORD_LIST_COUNTER: &str = "{pos}/{len} word-lists ({msg})";
/// The corpus bar advances by bytes read, not by sentences
const CORPUS_COUNTER: &str = "{bytes}/{total_bytes} read ({bytes_per_sec}, {eta})";

/// Find Tatoeba sentences that are probably filed under the wrong language
///
/// Sentences are listed from most to least likely to be mislabeled.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Tatoeba sentence export (sentences.csv)
    pub input: PathBuf,

    /// Where to write the report
    pub output: PathBuf,

    /// List every language's score under each suspicious sentence
    #[arg(short, long)]
    pub verbose: bool,

    /// Hide progress bars
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory with one frequency word-list per language, named `<iso 639-3>.txt`
    #[arg(long, default_value = "dict")]
    pub dictionary_dir: PathBuf,

    /// Number of entries used from each word-list
    #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
    pub max_words: usize,

    /// Classifier threads (defaults to the number of CPUs)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Skip malformed word-list lines instead of aborting
    #[arg(long)]
    pub lenient: bool,
}

/// Load the word-lists, audit the corpus and write the report
///
/// Nothing is written to `args.output` unless the model loads and the corpus opens.
pub fn run(args: Args) -> anyhow::Result<()> {
    let model = load_model(&args)?;
    let result = audit_corpus(&args, &model)?;

    if result.skipped_malformed > 0 {
        log::warn!(
            "Skipped {} malformed lines in {}",
            result.skipped_malformed,
            args.input.display()
        );
    }

    let report_file = File::create(&args.output)
        .with_context(|| format!("Failed to create report file: {:?}", args.output))?;
    let mut writer = BufWriter::new(report_file);
    write_report(&mut writer, &result, args.verbose).context("Failed to write report")?;
    writer.flush().context("Failed to write report")?;

    if !args.quiet {
        println!(
            "{} correct, {} incorrect, {} unknown",
            result.correct, result.incorrect, result.unknown
        );
        println!("Report written to {}", args.output.display());
    }

    Ok(())
}

fn progress_bar(len: u64, counter: &str, quiet: bool) -> anyhow::Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {counter}"
            ))?
            .progress_chars("#>-"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

fn load_model(args: &Args) -> anyhow::Result<LanguageModel> {
    let options = WordListOptions {
        max_words: args.max_words,
        mode: if args.lenient {
            ParseMode::Lenient
        } else {
            ParseMode::Strict
        },
    };

    let pb = progress_bar(LANGUAGES.len() as u64, WORD_LIST_COUNTER, args.quiet)?;
    let word_lists = load_dictionary_dir(&args.dictionary_dir, LANGUAGES, options, |language| {
        pb.set_message(language.to_string());
        pb.inc(1);
    })
    .with_context(|| {
        format!(
            "Failed to load word-lists from {}",
            args.dictionary_dir.display()
        )
    })?;
    pb.finish_with_message("done");

    ModelBuilder::build(word_lists).context("Failed to build language model")
}

fn audit_corpus(args: &Args, model: &LanguageModel) -> anyhow::Result<AuditResult> {
    let corpus_file = File::open(&args.input)
        .with_context(|| format!("Failed to open sentence file: {:?}", args.input))?;
    let corpus_len = corpus_file.metadata().map(|m| m.len()).unwrap_or(0);

    let pb = progress_bar(corpus_len, CORPUS_COUNTER, args.quiet)?;

    let mut config = AuditConfig::default();
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let auditor = Auditor::new(model, ClassifierConfig::default(), config);
    let result = auditor.audit(BufReader::new(pb.wrap_read(corpus_file)));
    pb.finish();

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_templates_parse() {
        for counter in [WORD_LIST_COUNTER, CORPUS_COUNTER] {
            let pb = progress_bar(10, counter, false).unwrap();
            pb.finish_and_clear();
        }
    }

    #[test]
    fn test_corpus_counter_names_bytes() {
        assert!(CORPUS_COUNTER.contains("{bytes}"));
        assert!(!CORPUS_COUNTER.contains("sentences"));
    }
}
