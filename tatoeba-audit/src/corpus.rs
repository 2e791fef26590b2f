//! Tatoeba sentence export records
//!
//! `sentences.csv` is tab-separated despite its name: `id [tab] lang [tab] text`.

/// One line of the sentence export
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorpusRecord {
    pub id: String,
    pub language_code: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRecord {
    #[error("expected 3 tab-separated fields, found {found}")]
    WrongFieldCount { found: usize },

    #[error("empty sentence id")]
    EmptyId,
}

/// Parse one line of the export.
///
/// A line must have exactly three tab-separated fields. Trailing whitespace
/// (including the line terminator) is removed from the text.
pub fn parse_line(line: &str) -> Result<CorpusRecord, MalformedRecord> {
    // Skip BOM if present
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);

    let parts: Vec<&str> = line.split('\t').collect();
    let [id, language_code, text] = parts.as_slice() else {
        return Err(MalformedRecord::WrongFieldCount { found: parts.len() });
    };

    let id = id.trim();
    if id.is_empty() {
        return Err(MalformedRecord::EmptyId);
    }

    Ok(CorpusRecord {
        id: id.to_string(),
        language_code: language_code.trim().to_string(),
        text: text.trim_end().to_string(),
    })
}
