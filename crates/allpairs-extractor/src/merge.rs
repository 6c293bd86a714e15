//! Word/mention merging
//!
//! Collapses the words covered by a mention into a single annotated element.
//! A mention is emitted only when a word it covers is reached, and the read
//! index into the mentions advances only on emission: a mention covering no
//! word is never emitted and holds back the mentions after it.

use allpairs_core::span::{ensure_disjoint, ensure_sorted};
use allpairs_core::{Interval, Mention, Result, Span, SpanKind};

use crate::MergedElement;

/// Merged element sequence of one sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedSentence<'a> {
    /// Words and mentions in text order
    pub elements: Vec<MergedElement<'a>>,
    /// Mentions that were never emitted
    pub unmerged: &'a [Mention],
}

/// Merge a sentence's words with the mentions assigned to it
///
/// Both inputs must be ordered by start; words must not overlap.
pub fn merge_spans<'a>(words: &'a [Span], mentions: &'a [Mention]) -> Result<MergedSentence<'a>> {
    ensure_disjoint(SpanKind::Word, words)?;
    ensure_sorted(SpanKind::Mention, mentions)?;

    let mut elements: Vec<MergedElement<'a>> = Vec::with_capacity(words.len());
    let mut next_mention = 0;

    for word in words {
        // already swallowed by the mention emitted for an earlier word
        if elements.last().is_some_and(|last| last.contains(word)) {
            continue;
        }

        match mentions.get(next_mention) {
            Some(mention) if mention.contains(word) => {
                elements.push(MergedElement::Annotation(mention));
                next_mention += 1;
            }
            _ => elements.push(MergedElement::Word(word)),
        }
    }

    let unmerged = &mentions[next_mention..];
    if let Some(first) = unmerged.first() {
        tracing::debug!(
            "{} mentions not merged; first {} ({}) covers no word",
            unmerged.len(),
            first.span(),
            first.entity()
        );
    }

    Ok(MergedSentence { elements, unmerged })
}

// ============================================================================
// Tests
// ============================================================================
