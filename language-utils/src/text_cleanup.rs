//! Sentence normalization for word-frequency lookups
//!
//! Frequency word-lists are lowercase and free of punctuation, so sentences
//! have to be brought into the same shape before their words can be looked up.

/// Punctuation outside the ASCII range that shows up in Tatoeba sentences.
const EXTRA_PUNCTUATION: &[char] = &[
    '«', '»', '¿', '¡', '…', '·', '‹', '›', // Latin-script quotation and inversion marks
    '。', '、', '，', '！', '？', '：', '；', '（', '）', '「', '」', '『', '』', // CJK
    '،', '؛', '؟', // Arabic
    '״', '׳', // Hebrew
];

/// Replace Unicode quote and hyphen variants with their ASCII equivalents
pub fn fold_special_characters(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            // Single quote variants: ' (U+2018), ' (U+2019), ‚ (U+201A), ‛ (U+201B),
            // ′ (U+2032), ‵ (U+2035), ＇ (U+FF07), ʼ (U+02BC), ´ (U+00B4)
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{2035}'
            | '\u{FF07}' | '\u{02BC}' | '\u{00B4}' => '\'',

            // Double quote variants: " (U+201C), " (U+201D), „ (U+201E), ‟ (U+201F),
            // ″ (U+2033), ＂ (U+FF02)
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{FF02}' => '"',

            // Hyphen/dash variants: ‐ (U+2010), ‑ (U+2011), ‒ (U+2012), – (U+2013),
            // — (U+2014), ― (U+2015), − (U+2212), － (U+FF0D)
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
            | '\u{2212}' | '\u{FF0D}' => '-',

            _ => c,
        })
        .collect()
}

/// Normalize a sentence into the words used for frequency lookups
///
/// - Folds quote and hyphen variants to ASCII
/// - Converts to lowercase
/// - Deletes punctuation (apostrophes included, so "don't" becomes "dont")
/// - Splits on whitespace
pub fn normalize_sentence(sentence: &str) -> Vec<String> {
    fold_special_characters(sentence)
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !EXTRA_PUNCTUATION.contains(c))
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
