//! Windowed context and triple extraction
//!
//! Scans a sentence's merged elements around every mention:
//! - backwards for a preceding context,
//! - forwards for either a triple (another mention within reach) or a
//!   succeeding context.
//!
//! A pair of mentions within reach of each other yields a triple from the
//! earlier one and nothing from the later one's backward scan, so every
//! stretch of text is reported once.

use serde::Serialize;

use allpairs_core::config::check_marker;
use allpairs_core::{
    EntityContext, ExtractorConfig, Interval, PrecedingContext, Result, Sentence, Triple,
};

use crate::MergedElement;

pub const DEFAULT_WINDOW_SIZE: usize = 5;
pub const DEFAULT_MARKER: char = '_';

/// Contexts and triples found in one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentenceExtraction {
    pub preceding: Vec<PrecedingContext>,
    pub succeeding: Vec<EntityContext>,
    pub triples: Vec<Triple>,
}

impl SentenceExtraction {
    pub fn is_empty(&self) -> bool {
        self.preceding.is_empty() && self.succeeding.is_empty() && self.triples.is_empty()
    }
}

/// Outcome of the forward scan from a mention
enum Lookahead {
    /// Another mention at this index
    Collision(usize),
    /// No mention in reach; last index inspected
    Clear(usize),
}

/// Context/triple extractor with a fixed window
#[derive(Debug, Clone)]
pub struct ContextExtractor {
    window_size: usize,
    marker: char,
}

impl ContextExtractor {
    /// Create an extractor inspecting up to `window_size + 1` neighbours
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            marker: DEFAULT_MARKER,
        }
    }

    /// Replace the marker; alphanumeric and whitespace markers are rejected
    pub fn with_marker(mut self, marker: char) -> Result<Self> {
        check_marker(marker)?;
        self.marker = marker;
        Ok(self)
    }

    pub fn from_config(config: &ExtractorConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.window_size).with_marker(config.marker)
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    /// Extract contexts and triples from one sentence's merged elements
    pub fn extract(
        &self,
        sentence: &Sentence,
        elements: &[MergedElement<'_>],
    ) -> Result<SentenceExtraction> {
        let mut found = SentenceExtraction::default();

        for (index, element) in elements.iter().enumerate() {
            let Some(entity) = element.entity() else {
                continue;
            };

            if let Some(start) = self.preceding_start(elements, index) {
                let text = sentence.slice(elements[start].start(), elements[index - 1].end())?;
                found.preceding.push(PrecedingContext {
                    context: format!("{text}{}", self.marker),
                    entity: entity.clone(),
                });
            }

            match self.lookahead(elements, index) {
                Lookahead::Collision(other) if other > index + 1 => {
                    let connector =
                        sentence.slice(elements[index + 1].start(), elements[other - 1].end())?;
                    if let Some(object) = elements[other].entity() {
                        found.triples.push(Triple {
                            subject: entity.clone(),
                            connector: connector.to_string(),
                            object: object.clone(),
                        });
                    }
                }
                // adjacent mentions: nothing in between to report
                Lookahead::Collision(_) => {}
                Lookahead::Clear(last) if last != index => {
                    let text = sentence.slice(elements[index + 1].start(), elements[last].end())?;
                    found.succeeding.push(EntityContext {
                        entity: entity.clone(),
                        context: format!("{}{text}", self.marker),
                    });
                }
                Lookahead::Clear(_) => {}
            }
        }

        Ok(found)
    }

    /// First element of the preceding context of the mention at `index`
    ///
    /// Collisions are looked for up to `W + 1` elements back, but the
    /// context itself spans at most `W` elements. Returns `None` on a
    /// collision or when nothing precedes the mention.
    fn preceding_start(&self, elements: &[MergedElement<'_>], index: usize) -> Option<usize> {
        let lowest = index.saturating_sub(self.window_size.saturating_add(1));
        if elements[lowest..index].iter().any(MergedElement::is_annotated) {
            return None;
        }
        let start = index.saturating_sub(self.window_size);
        (start != index).then_some(start)
    }

    /// Scan up to `W + 1` elements after `index`
    fn lookahead(&self, elements: &[MergedElement<'_>], index: usize) -> Lookahead {
        let highest = index
            .saturating_add(1)
            .saturating_add(self.window_size)
            .min(elements.len() - 1);
        (index + 1..=highest)
            .find(|&next| elements[next].is_annotated())
            .map_or(Lookahead::Clear(highest), Lookahead::Collision)
    }
}

impl Default for ContextExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge_spans;
    use allpairs_core::{Mention, Span};

    /// Whitespace words with a trailing comma excluded
    fn tokenize(text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut start = None;
        for (i, c) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
            match (start, c.is_whitespace()) {
                (None, false) => start = Some(i),
                (Some(s), true) => {
                    let end = if text[..i].ends_with(',') { i - 1 } else { i };
                    spans.push(Span::from_text(text, s, end).unwrap());
                    start = None;
                }
                _ => {}
            }
        }
        spans
    }

    fn sentence(text: &str) -> Sentence {
        Sentence::new(Span::from_text(text, 0, text.len()).unwrap(), tokenize(text)).unwrap()
    }

    /// Mentions for the given surfaces, linked to entities named after them
    fn mentions(text: &str, surfaces: &[&str]) -> Vec<Mention> {
        surfaces
            .iter()
            .map(|surface| {
                let start = text.find(surface).unwrap();
                let span = Span::from_text(text, start, start + surface.len()).unwrap();
                Mention::new(span, *surface)
            })
            .collect()
    }

    fn run(extractor: &ContextExtractor, text: &str, surfaces: &[&str]) -> SentenceExtraction {
        let sentence = sentence(text);
        let mentions = mentions(text, surfaces);
        let merged = merge_spans(sentence.words(), &mentions).unwrap();
        extractor.extract(&sentence, &merged.elements).unwrap()
    }

    fn preceding(found: &SentenceExtraction) -> Vec<(&str, &str)> {
        found
            .preceding
            .iter()
            .map(|p| (p.context.as_str(), p.entity.as_str()))
            .collect()
    }

    fn succeeding(found: &SentenceExtraction) -> Vec<(&str, &str)> {
        found
            .succeeding
            .iter()
            .map(|s| (s.entity.as_str(), s.context.as_str()))
            .collect()
    }

    fn triples(found: &SentenceExtraction) -> Vec<[&str; 3]> {
        found.triples.iter().map(Triple::fields).collect()
    }

    #[test]
    fn test_contexts_around_single_mention() {
        let found = run(&ContextExtractor::default(), "The cat sat", &["cat"]);
        assert_eq!(preceding(&found), vec![("The_", "cat")]);
        assert_eq!(succeeding(&found), vec![("cat", "_sat")]);
        assert!(found.triples.is_empty());
    }

    #[test]
    fn test_window_limits_triples() {
        let text = "Alpha one two Beta";

        let found = run(&ContextExtractor::new(1), text, &["Alpha", "Beta"]);
        assert!(found.triples.is_empty());
        assert_eq!(succeeding(&found), vec![("Alpha", "_one two")]);
        assert_eq!(preceding(&found), vec![("two_", "Beta")]);

        let found = run(&ContextExtractor::new(3), text, &["Alpha", "Beta"]);
        assert_eq!(triples(&found), vec![["Alpha", "one two", "Beta"]]);
        assert!(found.preceding.is_empty());
        assert!(found.succeeding.is_empty());
    }

    #[test]
    fn test_adjacent_mentions_yield_no_triple() {
        for window in [0, 1, 5, 50] {
            let found = run(
                &ContextExtractor::new(window),
                "Alpha Beta rest",
                &["Alpha", "Beta"],
            );
            assert!(found.triples.is_empty(), "window {window}");
            assert!(found.preceding.is_empty(), "window {window}");
        }
    }

    #[test]
    fn test_adjacent_mentions_keep_outer_contexts() {
        let found = run(
            &ContextExtractor::default(),
            "before Alpha Beta after",
            &["Alpha", "Beta"],
        );
        assert_eq!(preceding(&found), vec![("before_", "Alpha")]);
        assert_eq!(succeeding(&found), vec![("Beta", "_after")]);
    }

    #[test]
    fn test_boundary_mentions() {
        let found = run(
            &ContextExtractor::new(1),
            "Alpha a b c d Beta",
            &["Alpha", "Beta"],
        );
        // first mention: no preceding context; last mention: no succeeding one
        assert_eq!(preceding(&found), vec![("d_", "Beta")]);
        assert_eq!(succeeding(&found), vec![("Alpha", "_a b")]);
    }

    #[test]
    fn test_preceding_context_spans_window() {
        let found = run(
            &ContextExtractor::new(2),
            "one two three four Alpha",
            &["Alpha"],
        );
        assert_eq!(preceding(&found), vec![("three four_", "Alpha")]);
    }

    #[test]
    fn test_succeeding_context_spans_window_plus_one() {
        let found = run(
            &ContextExtractor::new(2),
            "Alpha one two three four",
            &["Alpha"],
        );
        assert_eq!(succeeding(&found), vec![("Alpha", "_one two three")]);
    }

    #[test]
    fn test_collision_at_window_edge() {
        // Beta is W + 1 elements before Alpha: seen as a collision
        let found = run(
            &ContextExtractor::new(2),
            "Beta two three Alpha",
            &["Beta", "Alpha"],
        );
        assert_eq!(triples(&found), vec![["Beta", "two three", "Alpha"]]);
        assert!(found.preceding.is_empty());

        // one element further and Beta is out of reach both ways
        let found = run(
            &ContextExtractor::new(2),
            "Beta two three four Alpha",
            &["Beta", "Alpha"],
        );
        assert!(found.triples.is_empty());
        assert_eq!(preceding(&found), vec![("three four_", "Alpha")]);
        assert_eq!(succeeding(&found), vec![("Beta", "_two three four")]);
    }

    #[test]
    fn test_chain_of_mentions() {
        let found = run(
            &ContextExtractor::default(),
            "Alpha one Beta two Gamma",
            &["Alpha", "Beta", "Gamma"],
        );
        assert_eq!(
            triples(&found),
            vec![["Alpha", "one", "Beta"], ["Beta", "two", "Gamma"]]
        );
        assert!(found.preceding.is_empty());
        assert!(found.succeeding.is_empty());
    }

    #[test]
    fn test_connector_keeps_punctuation() {
        let found = run(
            &ContextExtractor::default(),
            "Obama met Merkel, Hollande and Renzi",
            &["Obama", "Renzi"],
        );
        assert_eq!(
            triples(&found),
            vec![["Obama", "met Merkel, Hollande and", "Renzi"]]
        );
    }

    #[test]
    fn test_multi_word_mention_text() {
        let found = run(
            &ContextExtractor::default(),
            "He reads The New York Times daily",
            &["New York Times"],
        );
        assert_eq!(preceding(&found), vec![("He reads The_", "New York Times")]);
        assert_eq!(succeeding(&found), vec![("New York Times", "_daily")]);
    }

    #[test]
    fn test_custom_marker() {
        let extractor = ContextExtractor::default().with_marker('|').unwrap();
        let found = run(&extractor, "The cat sat", &["cat"]);
        assert_eq!(preceding(&found), vec![("The|", "cat")]);
        assert_eq!(succeeding(&found), vec![("cat", "|sat")]);
    }

    #[test]
    fn test_sentence_without_mentions() {
        let found = run(&ContextExtractor::default(), "Nothing to see here", &[]);
        assert!(found.is_empty());

        let empty = sentence("");
        let found = ContextExtractor::default().extract(&empty, &[]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_lone_mention_sentence() {
        let found = run(&ContextExtractor::default(), "Alpha", &["Alpha"]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = ExtractorConfig {
            window_size: 2,
            marker: '#',
        };
        let extractor = ContextExtractor::from_config(&config).unwrap();
        assert_eq!(extractor.window_size(), 2);
        assert_eq!(extractor.marker(), '#');

        let config = ExtractorConfig {
            window_size: 2,
            marker: 'x',
        };
        assert!(ContextExtractor::from_config(&config).is_err());
    }

    #[test]
    fn test_unbounded_window() {
        let found = run(
            &ContextExtractor::new(usize::MAX),
            "Alpha one Beta two",
            &["Alpha", "Beta"],
        );
        assert_eq!(triples(&found), vec![["Alpha", "one", "Beta"]]);
        assert!(found.preceding.is_empty());
        assert_eq!(succeeding(&found), vec![("Beta", "_two")]);

        let found = run(&ContextExtractor::new(usize::MAX), "So the cat sat", &["cat"]);
        assert_eq!(preceding(&found), vec![("So the_", "cat")]);
        assert_eq!(succeeding(&found), vec![("cat", "_sat")]);
    }

    #[test]
    fn test_with_marker_rejects_text_characters() {
        for marker in ['a', '7', ' ', '\t'] {
            assert!(ContextExtractor::default().with_marker(marker).is_err());
        }
        let extractor = ContextExtractor::new(2).with_marker('#').unwrap();
        assert_eq!(extractor.marker(), '#');
        assert_eq!(extractor.window_size(), 2);
    }
}
