//! allpairs Parser - Tokenization and annotated article input
//!
//! Turns raw article text into validated sentences and words, and reads
//! annotated articles (text plus entity mentions) from JSON.
//!
//! Each tokenizer implements the `Tokenizer` trait for a set of languages.
//! A `TokenizerRegistry` is built once and passed by reference to whatever
//! needs to split text.

use std::path::PathBuf;

use allpairs_core::{AllPairsError, Sentence};
use thiserror::Error;

pub mod article;
pub mod language;
pub mod tokenizer;

pub use article::{normalize_cleartext, Annotation, AnnotatedDocument, CharRange};
pub use language::Language;
pub use tokenizer::SegmentationTokenizer;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while tokenizing or reading articles
#[derive(Error, Debug)]
pub enum ParserError {
    /// Language code is not in the supported table
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Language is supported but nothing was registered for it
    #[error("No tokenizer registered for language: {0}")]
    MissingTokenizer(Language),

    /// IO error while reading the file
    #[error("IO error reading file: {path}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed annotated article
    #[error("Invalid annotated article in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Word pattern failed to compile
    #[error("Invalid word pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Spans produced or read do not satisfy the core invariants
    #[error(transparent)]
    Validation(#[from] AllPairsError),
}

pub type Result<T> = std::result::Result<T, ParserError>;

// ============================================================================
// Tokenizer Trait
// ============================================================================

/// Splits text into sentences and words
pub trait Tokenizer: Send + Sync {
    /// Sentences of `text` with their words, as byte spans into `text`
    fn tokenize(&self, text: &str) -> Result<Vec<Sentence>>;

    /// Languages this tokenizer handles
    fn supported_languages(&self) -> &[Language];

    fn can_tokenize(&self, language: Language) -> bool {
        self.supported_languages().contains(&language)
    }
}

// ============================================================================
// Tokenizer Registry
// ============================================================================

/// Registry of available tokenizers
pub struct TokenizerRegistry {
    tokenizers: Vec<Box<dyn Tokenizer>>,
}

impl TokenizerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tokenizers: Vec::new(),
        }
    }

    /// Registry with the segmentation tokenizer for every supported language
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(SegmentationTokenizer::new()?);
        Ok(registry)
    }

    /// Register a tokenizer; earlier registrations win for shared languages
    pub fn register<T: Tokenizer + 'static>(&mut self, tokenizer: T) {
        self.tokenizers.push(Box::new(tokenizer));
    }

    /// Find a tokenizer for a language
    pub fn find_tokenizer(&self, language: Language) -> Option<&dyn Tokenizer> {
        self.tokenizers
            .iter()
            .find(|t| t.can_tokenize(language))
            .map(|t| t.as_ref())
    }

    /// Tokenize text with the tokenizer registered for `language`
    pub fn tokenize(&self, language: Language, text: &str) -> Result<Vec<Sentence>> {
        let tokenizer = self
            .find_tokenizer(language)
            .ok_or(ParserError::MissingTokenizer(language))?;
        tokenizer.tokenize(text)
    }
}

impl Default for TokenizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokenizerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenizerRegistry")
            .field("tokenizers", &self.tokenizers.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
