//! Annotated article input
//!
//! An annotated article is JSON of the form
//!
//! ```json
//! {
//!   "lang": "eng",
//!   "text": "The cat chased Rex.",
//!   "annotations": [
//!     { "url": "http://example.org/Cat", "mentions": [ { "start": 4, "end": 7 } ] }
//!   ]
//! }
//! ```
//!
//! Mention offsets count characters, not bytes. `lang` is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use allpairs_core::{Article, CharOffsets, Mention, Span};

use crate::{Language, ParserError, Result, TokenizerRegistry};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// Language code, if the annotator recorded one
    #[serde(default)]
    pub lang: Option<String>,

    pub text: String,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// All mentions of one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    /// Entity identifier
    pub url: String,

    #[serde(default)]
    pub mentions: Vec<CharRange>,
}

/// Half-open character range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharRange {
    pub start: usize,
    pub end: usize,
}

/// Normalize article text: trailing whitespace removed, newlines become spaces
///
/// Every remaining character keeps its offset.
pub fn normalize_cleartext(text: &str) -> String {
    text.trim_end().replace('\n', " ")
}

impl AnnotatedDocument {
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ParserError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Read an annotated article from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ParserError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content, path)
    }

    /// Language recorded in the article, if any
    pub fn language(&self) -> Result<Option<Language>> {
        self.lang.as_deref().map(str::parse::<Language>).transpose()
    }

    /// Pick the article language: `forced`, else the recorded one, else `default`
    pub fn resolve_language(
        &self,
        forced: Option<Language>,
        default: Language,
    ) -> Result<Language> {
        match forced {
            Some(language) => Ok(language),
            None => Ok(self.language()?.unwrap_or(default)),
        }
    }

    pub fn mention_count(&self) -> usize {
        self.annotations.iter().map(|a| a.mentions.len()).sum()
    }

    /// Normalize, tokenize and validate into an `Article`
    pub fn into_article(self, registry: &TokenizerRegistry, language: Language) -> Result<Article> {
        let text = normalize_cleartext(&self.text);
        let offsets = CharOffsets::new(&text);

        let mut mentions = Vec::with_capacity(self.mention_count());
        for annotation in self.annotations {
            for range in &annotation.mentions {
                let (start, end) = offsets.to_bytes(range.start, range.end)?;
                let span = Span::from_text(&text, start, end)?;
                mentions.push(Mention::new(span, annotation.url.as_str()));
            }
        }

        let sentences = registry.tokenize(language, &text)?;
        tracing::debug!(
            "Read article ({}): {} sentences, {} mentions",
            language,
            sentences.len(),
            mentions.len()
        );

        Ok(Article::new(text, sentences, mentions)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
