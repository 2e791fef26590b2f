use std::io::Write;

use crate::audit::AuditResult;

pub const SENTENCE_URL_PREFIX: &str = "https://tatoeba.org/eng/sentences/show/";

/// Width of the language column in the verbose score listing
const NAME_WIDTH: usize = 15;

pub fn sentence_url(record_id: &str) -> String {
    format!("{SENTENCE_URL_PREFIX}{record_id}")
}

/// Write the summary line followed by one block per mismatch, most confident first.
///
/// With `verbose`, each block also lists every language's relevance score.
pub fn write_report<W: Write>(
    mut writer: W,
    result: &AuditResult,
    verbose: bool,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{} correct, {} incorrect, {} unknown",
        result.correct, result.incorrect, result.unknown
    )?;
    writeln!(writer)?;

    for mismatch in &result.mismatches {
        writeln!(writer, "{}", mismatch.text)?;
        writeln!(writer, "\tCurrent Language: {}", mismatch.declared)?;
        writeln!(writer, "\tSuggested Language: {}", mismatch.estimated)?;
        writeln!(writer, "\tURL: {}", sentence_url(&mismatch.record_id))?;
        writeln!(writer)?;

        if verbose {
            for score in &mismatch.scored.ranking {
                writeln!(
                    writer,
                    "\t{:<width$} {:.4}",
                    score.language.to_string(),
                    score.relevance,
                    width = NAME_WIDTH
                )?;
            }
            writeln!(writer)?;
        }
    }

    Ok(())
}
