pub mod text_cleanup;

/// A language the identifier ships a word-frequency list for.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub enum Language {
    Arabic,
    Bulgarian,
    Bosnian,
    Czech,
    Danish,
    German,
    Greek,
    English,
    Spanish,
    Estonian,
    Finnish,
    French,
    Hebrew,
    Croatian,
    Hungarian,
    Icelandic,
    Italian,
    Lithuanian,
    Latvian,
    Malay,
    Norwegian,
    Dutch,
    Polish,
    Portuguese,
    Romanian,
    Russian,
    Slovak,
    Slovenian,
    Albanian,
    Swedish,
    Turkish,
    Ukrainian,
    Chinese,
}

impl Language {
    pub fn iso_639_3(&self) -> &'static str {
        match self {
            Language::Arabic => "ara",
            Language::Bulgarian => "bul",
            Language::Bosnian => "bos",
            Language::Czech => "ces",
            Language::Danish => "dan",
            Language::German => "deu",
            Language::Greek => "ell",
            Language::English => "eng",
            Language::Spanish => "spa",
            Language::Estonian => "est",
            Language::Finnish => "fin",
            Language::French => "fra",
            Language::Hebrew => "heb",
            Language::Croatian => "hrv",
            Language::Hungarian => "hun",
            Language::Icelandic => "isl",
            Language::Italian => "ita",
            Language::Lithuanian => "lit",
            Language::Latvian => "lav",
            Language::Malay => "msa",
            Language::Norwegian => "nob",
            Language::Dutch => "nld",
            Language::Polish => "pol",
            Language::Portuguese => "por",
            Language::Romanian => "ron",
            Language::Russian => "rus",
            Language::Slovak => "slk",
            Language::Slovenian => "slv",
            Language::Albanian => "sqi",
            Language::Swedish => "swe",
            Language::Turkish => "tur",
            Language::Ukrainian => "ukr",
            Language::Chinese => "zho",
        }
    }

    /// Look up a language by its ISO 639-3 code, e.g. `"fra"`.
    ///
    /// Codes are matched exactly; Tatoeba exports them in lowercase.
    pub fn from_iso_639_3(code: &str) -> Option<Language> {
        LANGUAGES
            .iter()
            .copied()
            .find(|language| language.iso_639_3() == code)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Language::Arabic => "Arabic",
            Language::Bulgarian => "Bulgarian",
            Language::Bosnian => "Bosnian",
            Language::Czech => "Czech",
            Language::Danish => "Danish",
            Language::German => "German",
            Language::Greek => "Greek",
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::Estonian => "Estonian",
            Language::Finnish => "Finnish",
            Language::French => "French",
            Language::Hebrew => "Hebrew",
            Language::Croatian => "Croatian",
            Language::Hungarian => "Hungarian",
            Language::Icelandic => "Icelandic",
            Language::Italian => "Italian",
            Language::Lithuanian => "Lithuanian",
            Language::Latvian => "Latvian",
            Language::Malay => "Malay",
            Language::Norwegian => "Norwegian",
            Language::Dutch => "Dutch",
            Language::Polish => "Polish",
            Language::Portuguese => "Portuguese",
            Language::Romanian => "Romanian",
            Language::Russian => "Russian",
            Language::Slovak => "Slovak",
            Language::Slovenian => "Slovenian",
            Language::Albanian => "Albanian",
            Language::Swedish => "Swedish",
            Language::Turkish => "Turkish",
            Language::Ukrainian => "Ukrainian",
            Language::Chinese => "Chinese",
        };
        write!(f, "{name}")
    }
}

/// Every supported language, in the order word-lists are loaded.
pub const LANGUAGES: &[Language] = &[
    Language::Arabic,
    Language::Bulgarian,
    Language::Bosnian,
    Language::Czech,
    Language::Danish,
    Language::German,
    Language::Greek,
    Language::English,
    Language::Spanish,
    Language::Estonian,
    Language::Finnish,
    Language::French,
    Language::Hebrew,
    Language::Croatian,
    Language::Hungarian,
    Language::Icelandic,
    Language::Italian,
    Language::Lithuanian,
    Language::Latvian,
    Language::Malay,
    Language::Norwegian,
    Language::Dutch,
    Language::Polish,
    Language::Portuguese,
    Language::Romanian,
    Language::Russian,
    Language::Slovak,
    Language::Slovenian,
    Language::Albanian,
    Language::Swedish,
    Language::Turkish,
    Language::Ukrainian,
    Language::Chinese,
];
