//! Text spans and entity mentions
//!
//! All offsets are UTF-8 byte offsets into a fixed article text and every
//! interval is half-open (`[start, end)`). Spans compare by position only.

use serde::{Deserialize, Serialize};

use crate::{AllPairsError, Result, SpanKind};

// ============================================================================
// Interval relations
// ============================================================================

/// A half-open `[start, end)` interval over article text
pub trait Interval {
    fn start(&self) -> usize;

    fn end(&self) -> usize;

    /// Position as a `(start, end)` pair
    fn bounds(&self) -> (usize, usize) {
        (self.start(), self.end())
    }

    fn len(&self) -> usize {
        self.end() - self.start()
    }

    fn is_empty(&self) -> bool {
        self.start() == self.end()
    }

    /// `other` lies entirely inside `self` (boundaries may coincide)
    fn contains<I: Interval + ?Sized>(&self, other: &I) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// `other` lies inside `self` and the two do not share both boundaries
    fn strictly_contains<I: Interval + ?Sized>(&self, other: &I) -> bool {
        self.contains(other) && self.bounds() != other.bounds()
    }
}

/// Check that intervals are ordered by start and pairwise disjoint
///
/// Touching intervals (`previous.end == current.start`) are allowed.
pub fn ensure_disjoint<I: Interval>(kind: SpanKind, items: &[I]) -> Result<()> {
    for pair in items.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.start() < previous.start() {
            return Err(AllPairsError::UnsortedSpans {
                kind,
                previous: previous.bounds(),
                current: current.bounds(),
            });
        }
        if current.start() < previous.end() {
            return Err(AllPairsError::OverlappingSpans {
                kind,
                previous: previous.bounds(),
                current: current.bounds(),
            });
        }
    }
    Ok(())
}

/// Check that intervals are sorted by `(start, end)`; overlap is allowed
pub fn ensure_sorted<I: Interval>(kind: SpanKind, items: &[I]) -> Result<()> {
    match items
        .windows(2)
        .find(|pair| pair[1].bounds() < pair[0].bounds())
    {
        Some(pair) => Err(AllPairsError::UnsortedSpans {
            kind,
            previous: pair[0].bounds(),
            current: pair[1].bounds(),
        }),
        None => Ok(()),
    }
}

// ============================================================================
// Span
// ============================================================================

/// Immutable text interval with the text it covers
#[derive(Debug, Clone, Serialize)]
pub struct Span {
    start: usize,
    end: usize,
    text: String,
}

impl Span {
    /// Create a span from explicit bounds and text
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Result<Self> {
        if start > end {
            return Err(AllPairsError::InvalidSpan { start, end });
        }
        Ok(Self {
            start,
            end,
            text: text.into(),
        })
    }

    /// Create a span by slicing `source`, validating bounds and char boundaries
    pub fn from_text(source: &str, start: usize, end: usize) -> Result<Self> {
        let text = slice(source, start, end)?;
        Ok(Self {
            start,
            end,
            text: text.to_string(),
        })
    }

    /// Covered text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Interval for Span {
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.end
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.bounds() == other.bounds()
    }
}

impl Eq for Span {}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.start, self.end)
    }
}

/// Slice `source[start..end]`, reporting invalid offsets instead of panicking
pub fn slice(source: &str, start: usize, end: usize) -> Result<&str> {
    if start > end {
        return Err(AllPairsError::InvalidSpan { start, end });
    }
    if end > source.len() {
        return Err(AllPairsError::OutOfBounds {
            start,
            end,
            len: source.len(),
        });
    }
    for offset in [start, end] {
        if !source.is_char_boundary(offset) {
            return Err(AllPairsError::CharBoundary { offset });
        }
    }
    Ok(&source[start..end])
}

// ============================================================================
// Entities and mentions
// ============================================================================

/// Opaque entity identifier supplied by the annotator (usually a URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRef(String);

impl EntityRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A span of text linked to an entity
#[derive(Debug, Clone, Serialize)]
pub struct Mention {
    span: Span,
    entity: EntityRef,
}

impl Mention {
    pub fn new(span: Span, entity: impl Into<EntityRef>) -> Self {
        Self {
            span,
            entity: entity.into(),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn text(&self) -> &str {
        self.span.text()
    }

    pub fn is_annotated(&self) -> bool {
        true
    }
}

impl Interval for Mention {
    fn start(&self) -> usize {
        self.span.start
    }

    fn end(&self) -> usize {
        self.span.end
    }
}

impl PartialEq for Mention {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span
    }
}

impl Eq for Mention {}

/// Stable sort of mentions by `(start, end)`
pub fn sort_mentions(mentions: &mut [Mention]) {
    mentions.sort_by_key(|mention| mention.bounds());
}

// ============================================================================
// Tests
// ============================================================================
