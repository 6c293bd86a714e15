//! Sentence/mention partitioning
//!
//! Assigns the article's sorted mentions to sentences with a single
//! left-to-right sweep. The sweep is not self-correcting, so its ordering
//! preconditions are checked up front.

use allpairs_core::span::{ensure_disjoint, ensure_sorted};
use allpairs_core::{Interval, Mention, Result, Sentence, SpanKind};

/// Mentions assigned to each sentence, as contiguous sub-slices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'a> {
    assigned: Vec<&'a [Mention]>,
    unassigned: &'a [Mention],
}

impl<'a> Partition<'a> {
    /// Mentions per sentence, in sentence order
    pub fn assigned(&self) -> &[&'a [Mention]] {
        &self.assigned
    }

    /// Mentions left over after the last sentence
    pub fn unassigned(&self) -> &'a [Mention] {
        self.unassigned
    }
}

/// Split `mentions` across `sentences`
///
/// For each sentence in turn, every remaining mention at the front of the
/// list whose end does not exceed the sentence end is taken. A mention is
/// assigned to at most one sentence.
pub fn partition_mentions<'a>(
    sentences: &[Sentence],
    mentions: &'a [Mention],
) -> Result<Partition<'a>> {
    ensure_disjoint(SpanKind::Sentence, sentences)?;
    ensure_sorted(SpanKind::Mention, mentions)?;

    let mut assigned = Vec::with_capacity(sentences.len());
    let mut remaining = mentions;
    for sentence in sentences {
        let taken = remaining
            .iter()
            .take_while(|mention| mention.end() <= sentence.end())
            .count();
        let (head, tail) = remaining.split_at(taken);
        assigned.push(head);
        remaining = tail;
    }

    if !remaining.is_empty() {
        tracing::debug!(
            "{} mentions end after the last sentence and were not assigned",
            remaining.len()
        );
    }

    Ok(Partition {
        assigned,
        unassigned: remaining,
    })
}

// ============================================================================
// Tests
// ============================================================================
