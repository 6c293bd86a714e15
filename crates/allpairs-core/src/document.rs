//! Sentences and articles
//!
//! Both types validate their spans on construction, so downstream
//! components can rely on ordered, in-bounds input.

use serde::Serialize;

use crate::span::{ensure_disjoint, slice, sort_mentions};
use crate::{AllPairsError, Interval, Mention, Result, Span, SpanKind};

// ============================================================================
// Sentence
// ============================================================================

/// A sentence span with its word spans
#[derive(Debug, Clone, Serialize)]
pub struct Sentence {
    span: Span,
    words: Vec<Span>,
}

impl Sentence {
    /// Create a sentence, checking that words are ordered, disjoint and
    /// inside the sentence span
    pub fn new(span: Span, words: Vec<Span>) -> Result<Self> {
        ensure_disjoint(SpanKind::Word, &words)?;
        if let Some(word) = words.iter().find(|word| !span.contains(*word)) {
            return Err(AllPairsError::WordOutsideSentence {
                word: word.bounds(),
                sentence: span.bounds(),
            });
        }
        Ok(Self { span, words })
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn words(&self) -> &[Span] {
        &self.words
    }

    pub fn text(&self) -> &str {
        self.span.text()
    }

    /// Text between two absolute offsets, sliced from the sentence text
    pub fn slice(&self, start: usize, end: usize) -> Result<&str> {
        if start < self.span.start() || end > self.span.end() {
            return Err(AllPairsError::OutOfBounds {
                start,
                end,
                len: self.span.end(),
            });
        }
        let origin = self.span.start();
        slice(self.text(), start - origin, end - origin)
    }
}

impl Interval for Sentence {
    fn start(&self) -> usize {
        self.span.start()
    }

    fn end(&self) -> usize {
        self.span.end()
    }
}

// ============================================================================
// Article
// ============================================================================

/// An article's text, its sentences and its entity mentions
///
/// Mentions are kept sorted by `(start, end)`; the sort is stable, so
/// mentions at the same position keep annotator order.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    text: String,
    sentences: Vec<Sentence>,
    mentions: Vec<Mention>,
}

impl Article {
    pub fn new(
        text: impl Into<String>,
        sentences: Vec<Sentence>,
        mut mentions: Vec<Mention>,
    ) -> Result<Self> {
        let text = text.into();
        ensure_disjoint(SpanKind::Sentence, &sentences)?;

        let len = text.len();
        let out_of_bounds = sentences
            .iter()
            .map(Interval::bounds)
            .chain(mentions.iter().map(Interval::bounds))
            .find(|&(_, end)| end > len);
        if let Some((start, end)) = out_of_bounds {
            return Err(AllPairsError::OutOfBounds { start, end, len });
        }

        sort_mentions(&mut mentions);
        Ok(Self {
            text,
            sentences,
            mentions,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }
}

// ============================================================================
// Tests
// ============================================================================
