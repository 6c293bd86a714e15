//! allpairs Extractor - Weak-supervision context and triple extraction
//!
//! Turns validated sentences and entity mentions into:
//! - preceding contexts (`text_`, entity)
//! - succeeding contexts (entity, `_text`)
//! - triples (entity, connecting text, entity)
//!
//! Pipeline per article: partition mentions by sentence, merge each
//! sentence's words with its mentions, then scan the merged sequence with a
//! bounded window.

use allpairs_core::{EntityRef, Interval, Mention, Span};

pub mod aggregate;
pub mod context;
pub mod merge;
pub mod partition;

pub use aggregate::{AllPairs, ArticleAggregator, ArticleExtraction, ReturnSpec};
pub use context::{ContextExtractor, SentenceExtraction};
pub use merge::{merge_spans, MergedSentence};
pub use partition::{partition_mentions, Partition};

/// One unit of a merged sentence: a bare word or an entity mention
///
/// Elements borrow from the article they were merged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergedElement<'a> {
    Word(&'a Span),
    Annotation(&'a Mention),
}

impl<'a> MergedElement<'a> {
    pub fn is_annotated(&self) -> bool {
        matches!(self, Self::Annotation(_))
    }

    /// Linked entity, if this element is a mention
    pub fn entity(&self) -> Option<&'a EntityRef> {
        match self {
            Self::Word(_) => None,
            Self::Annotation(mention) => Some(mention.entity()),
        }
    }

    pub fn text(&self) -> &'a str {
        match self {
            Self::Word(span) => span.text(),
            Self::Annotation(mention) => mention.text(),
        }
    }
}

impl Interval for MergedElement<'_> {
    fn start(&self) -> usize {
        match self {
            Self::Word(span) => span.start(),
            Self::Annotation(mention) => mention.start(),
        }
    }

    fn end(&self) -> usize {
        match self {
            Self::Word(span) => span.end(),
            Self::Annotation(mention) => mention.end(),
        }
    }
}
