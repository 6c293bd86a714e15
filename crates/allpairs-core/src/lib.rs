//! allpairs Core - Span models, validation, and shared types
//!
//! This crate defines the abstractions every other allpairs crate builds on:
//! - Half-open text spans and the `Interval` containment relations
//! - Entity mentions with opaque entity references
//! - Validated sentences and articles
//! - Context and triple output records
//! - Common error types
//! - Configuration management

pub mod config;
pub mod document;
pub mod offset;
pub mod output;
pub mod span;

pub use config::{
    AppConfig, ConfigError, ExtractorConfig, LoggingConfig, OutputConfig, RuntimeConfig,
    TokenizerConfig,
};
pub use document::{Article, Sentence};
pub use offset::CharOffsets;
pub use output::{EntityContext, PrecedingContext, Triple};
pub use span::{EntityRef, Interval, Mention, Span};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Kind of span sequence being validated, used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Sentence,
    Word,
    Mention,
}

impl std::fmt::Display for SpanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sentence => write!(f, "sentence"),
            Self::Word => write!(f, "word"),
            Self::Mention => write!(f, "mention"),
        }
    }
}

/// Core error types for allpairs operations
///
/// Every variant except `Config` and `Other` is an input-validation failure
/// raised at a component boundary. Ordering problems are reported, never
/// repaired.
#[derive(Error, Debug)]
pub enum AllPairsError {
    #[error("Invalid span: start {start} is after end {end}")]
    InvalidSpan { start: usize, end: usize },

    #[error("Span [{start}, {end}) is outside a text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Offset {offset} is not on a character boundary")]
    CharBoundary { offset: usize },

    #[error("Unsorted {kind} spans: {previous:?} is followed by {current:?}")]
    UnsortedSpans {
        kind: SpanKind,
        previous: (usize, usize),
        current: (usize, usize),
    },

    #[error("Overlapping {kind} spans: {previous:?} overlaps {current:?}")]
    OverlappingSpans {
        kind: SpanKind,
        previous: (usize, usize),
        current: (usize, usize),
    },

    #[error("Word {word:?} lies outside its sentence {sentence:?}")]
    WordOutsideSentence {
        word: (usize, usize),
        sentence: (usize, usize),
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AllPairsError {
    /// Whether this error reports malformed span input
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Other(_))
    }
}

pub type Result<T> = std::result::Result<T, AllPairsError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_kind_display() {
        assert_eq!(SpanKind::Sentence.to_string(), "sentence");
        assert_eq!(SpanKind::Mention.to_string(), "mention");
    }

    #[test]
    fn test_error_messages() {
        let err = AllPairsError::UnsortedSpans {
            kind: SpanKind::Word,
            previous: (4, 7),
            current: (0, 3),
        };
        assert_eq!(
            err.to_string(),
            "Unsorted word spans: (4, 7) is followed by (0, 3)"
        );
        assert!(err.is_validation());

        let err = AllPairsError::Config(ConfigError::InvalidValue {
            key: "extractor.marker".to_string(),
            value: "a".to_string(),
        });
        assert!(!err.is_validation());
    }
}
