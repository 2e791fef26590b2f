//! Parallel audit of a sentence export against a language model
//!
//! ```text
//! reader thread ──(bounded)──▶ N classifier threads ──(bounded)──▶ caller (tallies)
//! ```
//!
//! The model is shared by reference. Only the calling thread touches the
//! tallies and mismatch list.

use std::io::BufRead;
use std::thread;

use crossbeam_channel::{Sender, bounded};
use language_identifier::{Classifier, ClassifierConfig, LanguageModel, ScoredSentence, Verdict};
use language_utils::Language;

use crate::corpus::{self, CorpusRecord};

/// Configuration for the audit pipeline
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AuditConfig {
    /// Number of classifier threads
    pub workers: usize,
    /// Records in flight per channel
    pub queue_capacity: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            queue_capacity: 1024,
        }
    }
}

/// A record whose declared language disagrees with a confident estimate
#[derive(Clone, Debug, PartialEq)]
pub struct Mismatch {
    pub record_id: String,
    /// 1-based line of the record in the export
    pub line_number: usize,
    pub declared: Language,
    pub estimated: Language,
    pub text: String,
    pub scored: ScoredSentence,
}

impl Mismatch {
    pub fn gap(&self) -> f64 {
        self.scored.gap
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuditResult {
    pub correct: usize,
    pub incorrect: usize,
    pub unknown: usize,
    /// Records in a language the model has no table for
    pub skipped_unsupported: usize,
    /// Lines that could not be parsed as a record
    pub skipped_malformed: usize,
    /// Most confident disagreements first
    pub mismatches: Vec<Mismatch>,
}

impl AuditResult {
    /// Number of records that were classified
    pub fn classified(&self) -> usize {
        self.correct + self.incorrect + self.unknown
    }

    fn record(&mut self, job: Job, scored: ScoredSentence) {
        match outcome(job.declared, scored.verdict) {
            Outcome::Correct => self.correct += 1,
            Outcome::Unknown => self.unknown += 1,
            Outcome::Incorrect(estimated) => {
                self.incorrect += 1;
                self.mismatches.push(Mismatch {
                    record_id: job.record.id,
                    line_number: job.line_number,
                    declared: job.declared,
                    estimated,
                    text: job.record.text,
                    scored,
                });
            }
        }
    }

    fn sort_mismatches(&mut self) {
        self.mismatches.sort_by(|a, b| {
            b.gap()
                .total_cmp(&a.gap())
                .then(a.line_number.cmp(&b.line_number))
        });
    }
}

/// How a classified record compares to its declared language
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect(Language),
    Unknown,
}

pub fn outcome(declared: Language, verdict: Verdict) -> Outcome {
    match verdict {
        Verdict::Unknown => Outcome::Unknown,
        Verdict::Known(estimated) if estimated == declared => Outcome::Correct,
        Verdict::Known(estimated) => Outcome::Incorrect(estimated),
    }
}

struct Job {
    line_number: usize,
    declared: Language,
    record: CorpusRecord,
}

#[derive(Debug, Default)]
struct ReadStats {
    unsupported: usize,
    malformed: usize,
}

pub struct Auditor<'a> {
    classifier: Classifier<'a>,
    config: AuditConfig,
}

impl<'a> Auditor<'a> {
    pub fn new(
        model: &'a LanguageModel,
        classifier_config: ClassifierConfig,
        config: AuditConfig,
    ) -> Self {
        Self {
            classifier: Classifier::with_config(model, classifier_config),
            config,
        }
    }

    /// Classify every supported record of `reader` and tally the outcomes.
    ///
    /// A read error ends the pass early; whatever was read before it is kept.
    pub fn audit<R: BufRead + Send>(&self, reader: R) -> AuditResult {
        let workers = self.config.workers.max(1);
        let capacity = self.config.queue_capacity.max(1);
        let (job_tx, job_rx) = bounded::<Job>(capacity);
        let (scored_tx, scored_rx) = bounded::<(Job, ScoredSentence)>(capacity);

        let mut result = AuditResult::default();

        thread::scope(|scope| {
            let reader_thread = scope.spawn(move || self.read_records(reader, job_tx));

            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let scored_tx = scored_tx.clone();
                scope.spawn(move || {
                    for job in job_rx {
                        let scored = self.classifier.classify(&job.record.text);
                        if scored_tx.send((job, scored)).is_err() {
                            break;
                        }
                    }
                });
            }
            // Workers hold the only remaining handles, so the loop below ends
            // once they have all finished
            drop(job_rx);
            drop(scored_tx);

            for (job, scored) in scored_rx {
                result.record(job, scored);
            }

            match reader_thread.join() {
                Ok(stats) => {
                    result.skipped_unsupported = stats.unsupported;
                    result.skipped_malformed = stats.malformed;
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        });

        result.sort_mismatches();

        log::info!(
            "Audited {} records: {} correct, {} incorrect, {} unknown ({} unsupported, {} malformed)",
            result.classified(),
            result.correct,
            result.incorrect,
            result.unknown,
            result.skipped_unsupported,
            result.skipped_malformed
        );

        result
    }

    fn read_records<R: BufRead>(&self, mut reader: R, jobs: Sender<Job>) -> ReadStats {
        let mut stats = ReadStats::default();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => line_number += 1,
                Err(e) => {
                    log::warn!("Corpus stream ended unexpectedly after line {line_number}: {e}");
                    break;
                }
            }

            let Ok(line) = std::str::from_utf8(&buf) else {
                log::debug!("Skipping line {line_number}: not valid UTF-8");
                stats.malformed += 1;
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }

            let record = match corpus::parse_line(line) {
                Ok(record) => record,
                Err(e) => {
                    log::debug!("Skipping line {line_number}: {e}");
                    stats.malformed += 1;
                    continue;
                }
            };

            let declared = Language::from_iso_639_3(&record.language_code)
                .filter(|&language| self.classifier.model().supports(language));
            let Some(declared) = declared else {
                stats.unsupported += 1;
                continue;
            };

            let job = Job {
                line_number,
                declared,
                record,
            };
            if jobs.send(job).is_err() {
                break;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use language_identifier::{BackgroundTable, LanguageTable};
    use std::io::Cursor;

    fn english_french_model() -> LanguageModel {
        LanguageModel::from_tables(
            vec![
                LanguageTable::from_frequencies(
                    Language::English,
                    [("the", 0.05), ("cat", 0.01), ("sat", 0.01), ("dog", 0.01)],
                ),
                LanguageTable::from_frequencies(
                    Language::French,
                    [("le", 0.05), ("chat", 0.01), ("chien", 0.01), ("dort", 0.01)],
                ),
            ],
            BackgroundTable::from_frequencies([
                ("the", 0.025),
                ("cat", 0.005),
                ("sat", 0.005),
                ("dog", 0.005),
                ("le", 0.025),
                ("chat", 0.005),
                ("chien", 0.005),
                ("dort", 0.005),
            ]),
        )
    }

    fn audit_with_workers(corpus: &str, workers: usize) -> AuditResult {
        let model = english_french_model();
        let auditor = Auditor::new(
            &model,
            ClassifierConfig::default(),
            AuditConfig {
                workers,
                queue_capacity: 2,
            },
        );
        auditor.audit(Cursor::new(corpus.as_bytes()))
    }

    fn audit(corpus: &str) -> AuditResult {
        audit_with_workers(corpus, 3)
    }

    #[test]
    fn test_outcome() {
        assert_eq!(
            outcome(Language::English, Verdict::Known(Language::English)),
            Outcome::Correct
        );
        assert_eq!(
            outcome(Language::English, Verdict::Known(Language::French)),
            Outcome::Incorrect(Language::French)
        );
        assert_eq!(outcome(Language::English, Verdict::Unknown), Outcome::Unknown);
    }

    #[test]
    fn test_mislabeled_sentence_is_incorrect() {
        let result = audit("1\tfra\tthe cat sat\n");
        assert_eq!((result.correct, result.incorrect, result.unknown), (0, 1, 0));

        let mismatch = &result.mismatches[0];
        assert_eq!(mismatch.record_id, "1");
        assert_eq!(mismatch.declared, Language::French);
        assert_eq!(mismatch.estimated, Language::English);
        assert_eq!(mismatch.text, "the cat sat");
        assert!(mismatch.gap() > 0.4);
    }

    #[test]
    fn test_tallies() {
        let corpus = "\
1\teng\tThe cat sat.
2\tfra\tLe chat dort.
3\tfra\tThe dog sat.
4\teng\tThe cat.
5\teng\tich bin hier
";
        let result = audit(corpus);
        assert_eq!(result.correct, 2);
        assert_eq!(result.incorrect, 1);
        assert_eq!(result.unknown, 2);
        assert_eq!(result.classified(), 5);
        assert_eq!(result.mismatches.len(), 1);
        assert_eq!(result.mismatches[0].record_id, "3");
    }

    #[test]
    fn test_unsupported_language_is_skipped() {
        let with = audit("1\teng\tthe cat sat\n2\txyz\tthe cat sat\n3\tdeu\tthe cat sat\n");
        let without = audit("1\teng\tthe cat sat\n");
        assert_eq!(with.classified(), without.classified());
        assert_eq!(with.mismatches, without.mismatches);
        assert_eq!(with.skipped_unsupported, 2);
        assert_eq!(without.skipped_unsupported, 0);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let result = audit("garbage\n\n1\teng\tthe cat sat\n2\tfra\n\tfra\tle chat dort\n");
        assert_eq!(result.skipped_malformed, 3);
        assert_eq!(result.classified(), 1);
        assert_eq!(result.correct, 1);
    }

    #[test]
    fn test_extra_fields_are_malformed() {
        let baseline = audit("2\teng\tthe cat sat\n");
        let result = audit(
            "1\tfra\tthe cat sat\tle\tle\tle\tle\tle\tle\tle\n\
             2\teng\tthe cat sat\n",
        );
        assert_eq!(result.skipped_malformed, 1);
        assert_eq!(
            (result.correct, result.incorrect, result.unknown),
            (baseline.correct, baseline.incorrect, baseline.unknown)
        );
        assert!(result.mismatches.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let model = english_french_model();
        let auditor = Auditor::new(&model, ClassifierConfig::default(), AuditConfig::default());
        let mut corpus = b"1\teng\tthe cat sat\n2\teng\t".to_vec();
        corpus.extend_from_slice(&[0xff, 0xfe, b'\n']);
        corpus.extend_from_slice(b"3\tfra\tle chat dort\n");

        let result = auditor.audit(Cursor::new(corpus));
        assert_eq!(result.skipped_malformed, 1);
        assert_eq!(result.correct, 2);
    }

    #[test]
    fn test_mismatches_sorted_by_gap() {
        // A sentence with more foreign filler has a smaller gap
        let corpus = "\
10\tfra\tthe cat sat zzz zzz zzz
11\tfra\tthe cat sat dog
12\teng\tle chat dort
13\tfra\tthe cat sat dog
";
        let result = audit(corpus);
        let ids: Vec<_> = result
            .mismatches
            .iter()
            .map(|m| m.record_id.as_str())
            .collect();
        assert_eq!(ids.len(), 4);
        for pair in result.mismatches.windows(2) {
            assert!(pair[0].gap() >= pair[1].gap());
        }
        // Equal gaps keep corpus order
        let first_11 = ids.iter().position(|&id| id == "11").unwrap();
        let first_13 = ids.iter().position(|&id| id == "13").unwrap();
        assert_eq!(first_13, first_11 + 1);
        assert_eq!(ids.last(), Some(&"10"));
    }

    #[test]
    fn test_result_independent_of_worker_count() {
        let corpus: String = (0..200)
            .map(|i| {
                let (lang, text) = match i % 4 {
                    0 => ("eng", "the cat sat"),
                    1 => ("fra", "the dog sat"),
                    2 => ("eng", "le chien dort"),
                    _ => ("fra", "le chat"),
                };
                format!("{i}\t{lang}\t{text}\n")
            })
            .collect();

        let single = audit_with_workers(&corpus, 1);
        let many = audit_with_workers(&corpus, 8);
        assert_eq!(single, many);
        assert_eq!(single.classified(), 200);
        assert_eq!(single.incorrect, 100);
    }
}
