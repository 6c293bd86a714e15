//! Supported article languages, keyed by ISO 639-2 code

use serde::{Deserialize, Serialize};

use crate::ParserError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    Czech,
    Danish,
    Dutch,
    English,
    Estonian,
    Finnish,
    French,
    German,
    Greek,
    Italian,
    Norwegian,
    Polish,
    Portuguese,
    Slovene,
    Spanish,
    Swedish,
    Turkish,
}

const ALL: [Language; 17] = [
    Language::Czech,
    Language::Danish,
    Language::Dutch,
    Language::English,
    Language::Estonian,
    Language::Finnish,
    Language::French,
    Language::German,
    Language::Greek,
    Language::Italian,
    Language::Norwegian,
    Language::Polish,
    Language::Portuguese,
    Language::Slovene,
    Language::Spanish,
    Language::Swedish,
    Language::Turkish,
];

impl Language {
    /// Every supported language, ordered by code
    pub fn all() -> &'static [Language] {
        &ALL
    }

    /// ISO 639-2 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Czech => "cze",
            Self::Danish => "dan",
            Self::Dutch => "dut",
            Self::English => "eng",
            Self::Estonian => "est",
            Self::Finnish => "fin",
            Self::French => "fre",
            Self::German => "ger",
            Self::Greek => "gre",
            Self::Italian => "ita",
            Self::Norwegian => "nob",
            Self::Polish => "pol",
            Self::Portuguese => "por",
            Self::Slovene => "slv",
            Self::Spanish => "spa",
            Self::Swedish => "swe",
            Self::Turkish => "tur",
        }
    }

    /// English name, lowercase
    pub fn name(&self) -> &'static str {
        match self {
            Self::Czech => "czech",
            Self::Danish => "danish",
            Self::Dutch => "dutch",
            Self::English => "english",
            Self::Estonian => "estonian",
            Self::Finnish => "finnish",
            Self::French => "french",
            Self::German => "german",
            Self::Greek => "greek",
            Self::Italian => "italian",
            Self::Norwegian => "norwegian",
            Self::Polish => "polish",
            Self::Portuguese => "portuguese",
            Self::Slovene => "slovene",
            Self::Spanish => "spanish",
            Self::Swedish => "swedish",
            Self::Turkish => "turkish",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = ParserError;

    /// Accepts a code or an English name, case-insensitively
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL.iter()
            .copied()
            .find(|language| language.code() == wanted || language.name() == wanted)
            .ok_or_else(|| ParserError::UnsupportedLanguage(s.to_string()))
    }
}

impl TryFrom<String> for Language {
    type Error = ParserError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
