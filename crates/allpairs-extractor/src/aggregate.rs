//! Article-level aggregation
//!
//! Runs partitioning, merging and extraction sentence by sentence and
//! concatenates the results. Nothing is deduplicated and nothing crosses a
//! sentence boundary.

use serde::{Deserialize, Serialize};

use allpairs_core::{
    AppConfig, Article, ConfigError, EntityContext, PrecedingContext, Result, Triple,
};

use crate::context::ContextExtractor;
use crate::merge::merge_spans;
use crate::partition::partition_mentions;

// ============================================================================
// Result selection
// ============================================================================

/// Which result sequences to produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnSpec {
    Contexts,
    Triples,
    #[default]
    Both,
}

impl ReturnSpec {
    pub fn contexts(&self) -> bool {
        matches!(self, Self::Contexts | Self::Both)
    }

    pub fn triples(&self) -> bool {
        matches!(self, Self::Triples | Self::Both)
    }
}

impl std::str::FromStr for ReturnSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contexts" => Ok(Self::Contexts),
            "triples" => Ok(Self::Triples),
            "both" => Ok(Self::Both),
            _ => Err(ConfigError::InvalidValue {
                key: "return_spec".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ReturnSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contexts => write!(f, "contexts"),
            Self::Triples => write!(f, "triples"),
            Self::Both => write!(f, "both"),
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Everything extracted from one article, in sentence order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleExtraction {
    pub preceding: Vec<PrecedingContext>,
    pub succeeding: Vec<EntityContext>,
    pub triples: Vec<Triple>,
    /// Mentions ending after the last sentence
    pub unassigned_mentions: usize,
    /// Mentions that covered no word of their sentence
    pub unmerged_mentions: usize,
}

impl ArticleExtraction {
    /// Flatten contexts to `(entity, context)`: succeeding contexts first,
    /// then the preceding ones with their fields swapped
    pub fn into_contexts(self) -> (Vec<EntityContext>, Vec<Triple>) {
        let mut contexts = self.succeeding;
        contexts.extend(self.preceding.into_iter().map(EntityContext::from));
        (contexts, self.triples)
    }
}

/// Flattened contexts and triples over any number of articles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllPairs {
    pub contexts: Vec<EntityContext>,
    pub triples: Vec<Triple>,
}

impl AllPairs {
    /// Append one article's results, keeping only what `spec` selects
    pub fn extend(&mut self, extraction: ArticleExtraction, spec: ReturnSpec) {
        let (contexts, triples) = extraction.into_contexts();
        if spec.contexts() {
            self.contexts.extend(contexts);
        }
        if spec.triples() {
            self.triples.extend(triples);
        }
    }

    /// Append results that were already selected and flattened
    pub fn append(&mut self, mut other: AllPairs) {
        self.contexts.append(&mut other.contexts);
        self.triples.append(&mut other.triples);
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty() && self.triples.is_empty()
    }
}

// ============================================================================
// Aggregator
// ============================================================================

/// Runs the full extraction pipeline over articles
#[derive(Debug, Clone, Default)]
pub struct ArticleAggregator {
    extractor: ContextExtractor,
}

impl ArticleAggregator {
    pub fn new(extractor: ContextExtractor) -> Self {
        Self { extractor }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(ContextExtractor::from_config(&config.extractor)?))
    }

    /// Extract preceding contexts, succeeding contexts and triples from an article
    pub fn process_article(&self, article: &Article) -> Result<ArticleExtraction> {
        let partition = partition_mentions(article.sentences(), article.mentions())?;
        let mut extraction = ArticleExtraction {
            unassigned_mentions: partition.unassigned().len(),
            ..Default::default()
        };

        for (sentence, mentions) in article.sentences().iter().zip(partition.assigned()) {
            let merged = merge_spans(sentence.words(), mentions)?;
            extraction.unmerged_mentions += merged.unmerged.len();

            let found = self.extractor.extract(sentence, &merged.elements)?;
            extraction.preceding.extend(found.preceding);
            extraction.succeeding.extend(found.succeeding);
            extraction.triples.extend(found.triples);
        }

        tracing::debug!(
            "Article processed: {} sentences, {} preceding, {} succeeding, {} triples",
            article.sentences().len(),
            extraction.preceding.len(),
            extraction.succeeding.len(),
            extraction.triples.len()
        );

        Ok(extraction)
    }

    /// Process articles in order and flatten their results
    pub fn process_articles<'a, I>(&self, articles: I, spec: ReturnSpec) -> Result<AllPairs>
    where
        I: IntoIterator<Item = &'a Article>,
    {
        let mut all = AllPairs::default();
        for article in articles {
            all.extend(self.process_article(article)?, spec);
        }
        Ok(all)
    }
}

// ============================================================================
// Tests
// ============================================================================
