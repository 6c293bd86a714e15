//! Reference tokenizer built on Unicode text segmentation
//!
//! Sentences follow UAX #29 sentence boundaries. Each sentence is trimmed of
//! surrounding whitespace and loses a single final `.`, `!` or `?`. Words are
//! runs of non-whitespace with one trailing `,` or `;` removed.

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use allpairs_core::{Sentence, Span};

use crate::{Language, Result, Tokenizer};

const WORD_PATTERN: &str = r"\S+";

#[derive(Debug, Clone)]
pub struct SegmentationTokenizer {
    languages: Vec<Language>,
    word_pattern: Regex,
}

impl SegmentationTokenizer {
    /// Tokenizer serving every supported language
    pub fn new() -> Result<Self> {
        Self::for_languages(Language::all().to_vec())
    }

    pub fn for_languages(languages: Vec<Language>) -> Result<Self> {
        Ok(Self {
            languages,
            word_pattern: Regex::new(WORD_PATTERN)?,
        })
    }

    /// Words of the sentence `text[start..end]`
    fn words(&self, text: &str, start: usize, end: usize) -> Result<Vec<Span>> {
        let mut words = Vec::new();
        for found in self.word_pattern.find_iter(&text[start..end]) {
            let word = found
                .as_str()
                .strip_suffix(|c: char| c == ',' || c == ';')
                .unwrap_or(found.as_str());
            if word.is_empty() {
                continue;
            }
            let word_start = start + found.start();
            words.push(Span::from_text(text, word_start, word_start + word.len())?);
        }
        Ok(words)
    }
}

/// Byte range of `raw` after trimming and dropping one terminal mark
fn sentence_body(raw: &str) -> (usize, usize) {
    let trimmed = raw.trim_end();
    let body = trimmed
        .strip_suffix(|c: char| matches!(c, '.' | '!' | '?'))
        .unwrap_or(trimmed);
    let leading = body.len() - body.trim_start().len();
    (leading, body.len())
}

impl Tokenizer for SegmentationTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Sentence>> {
        let mut sentences = Vec::new();
        for (offset, raw) in text.split_sentence_bound_indices() {
            let (body_start, body_end) = sentence_body(raw);
            if body_start >= body_end {
                continue;
            }
            let (start, end) = (offset + body_start, offset + body_end);
            let words = self.words(text, start, end)?;
            sentences.push(Sentence::new(Span::from_text(text, start, end)?, words)?);
        }

        tracing::debug!(
            "Tokenized {} bytes into {} sentences",
            text.len(),
            sentences.len()
        );
        Ok(sentences)
    }

    fn supported_languages(&self) -> &[Language] {
        &self.languages
    }
}

// ============================================================================
// Tests
// ============================================================================
