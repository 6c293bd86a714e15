//! Document pipeline
//!
//! Each document is read, tokenized and extracted on a blocking worker under
//! a timeout. Directory runs keep input order while up to
//! `max_concurrent_documents` workers are in flight; a failed document is
//! logged and skipped.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use futures::stream::{self, StreamExt};

use allpairs_core::AppConfig;
use allpairs_extractor::{AllPairs, ArticleAggregator, ReturnSpec};
use allpairs_parser::{AnnotatedDocument, Language, TokenizerRegistry};

#[derive(Debug, Clone)]
pub struct Pipeline {
    registry: Arc<TokenizerRegistry>,
    aggregator: Arc<ArticleAggregator>,
    default_language: Language,
    forced_language: Option<Language>,
    spec: ReturnSpec,
    max_concurrent: usize,
    timeout: Duration,
}

impl Pipeline {
    pub fn from_config(
        config: &AppConfig,
        forced_language: Option<Language>,
        spec: ReturnSpec,
    ) -> anyhow::Result<Self> {
        let default_language = config
            .tokenizer
            .default_language
            .parse::<Language>()
            .context("Invalid tokenizer.default_language")?;

        Ok(Self {
            registry: Arc::new(TokenizerRegistry::with_defaults()?),
            aggregator: Arc::new(ArticleAggregator::from_config(config)?),
            default_language,
            forced_language,
            spec,
            max_concurrent: config.runtime.max_concurrent_documents.max(1),
            timeout: Duration::from_secs(config.runtime.document_timeout_secs),
        })
    }

    /// Run one document synchronously
    pub fn process_document(&self, path: &Path) -> anyhow::Result<AllPairs> {
        let document = AnnotatedDocument::from_path(path)?;
        let language = document.resolve_language(self.forced_language, self.default_language)?;
        let article = document.into_article(&self.registry, language)?;
        let extraction = self.aggregator.process_article(&article)?;

        if extraction.unassigned_mentions + extraction.unmerged_mentions > 0 {
            tracing::debug!(
                "{}: {} mentions outside sentences, {} covering no word",
                path.display(),
                extraction.unassigned_mentions,
                extraction.unmerged_mentions
            );
        }

        let mut pairs = AllPairs::default();
        pairs.extend(extraction, self.spec);
        tracing::info!(
            "Processed {} ({}): {} contexts, {} triples",
            path.display(),
            language,
            pairs.contexts.len(),
            pairs.triples.len()
        );
        Ok(pairs)
    }

    /// Run one document on a blocking worker, bounded by the document timeout
    ///
    /// A timeout only stops waiting: the worker cannot be cancelled and runs
    /// to completion on the blocking pool, its result discarded.
    pub async fn process_file(&self, path: PathBuf) -> anyhow::Result<AllPairs> {
        let name = path.display().to_string();
        let pipeline = self.clone();
        let task = tokio::task::spawn_blocking(move || pipeline.process_document(&path));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(joined) => joined.with_context(|| format!("Worker for {name} panicked"))?,
            Err(_) => anyhow::bail!("Timed out after {}s: {}", self.timeout.as_secs(), name),
        }
    }

    /// Run every document of `dir` in name order and concatenate the results
    pub async fn process_dir(&self, dir: &Path) -> anyhow::Result<AllPairs> {
        let paths = list_documents(dir).await?;
        tracing::info!("Processing {} documents from {}", paths.len(), dir.display());

        let results: Vec<(PathBuf, anyhow::Result<AllPairs>)> = stream::iter(paths)
            .map(|path| async move {
                let result = self.process_file(path.clone()).await;
                (path, result)
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut all = AllPairs::default();
        let mut skipped = 0;
        for (path, result) in results {
            match result {
                Ok(pairs) => all.append(pairs),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Skipping {}: {:#}", path.display(), e);
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("{} documents skipped", skipped);
        }
        Ok(all)
    }
}

/// Regular, non-hidden files of `dir`, sorted by name
async fn list_documents(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && entry.file_type().await?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT: &str = r#"{ "lang": "eng", "text": "The cat chased Rex.",
        "annotations": [
            { "url": "Cat", "mentions": [ { "start": 4, "end": 7 } ] },
            { "url": "Dog", "mentions": [ { "start": 15, "end": 18 } ] }
        ] }"#;

    const BIRD: &str = r#"{ "text": "A bird sang",
        "annotations": [ { "url": "Bird", "mentions": [ { "start": 2, "end": 6 } ] } ] }"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("allpairs-pipeline-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn pipeline(spec: ReturnSpec) -> Pipeline {
        Pipeline::from_config(&AppConfig::default(), None, spec).unwrap()
    }

    fn contexts(pairs: &AllPairs) -> Vec<[&str; 2]> {
        pairs.contexts.iter().map(|c| c.fields()).collect()
    }

    #[tokio::test]
    async fn test_process_file() {
        let dir = scratch_dir("file");
        let path = dir.join("cat.json");
        std::fs::write(&path, CAT).unwrap();

        let pairs = pipeline(ReturnSpec::Both).process_file(path).await.unwrap();
        assert_eq!(contexts(&pairs), vec![["Cat", "The_"]]);
        assert_eq!(pairs.triples[0].fields(), ["Cat", "chased", "Dog"]);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_process_dir_keeps_order_and_skips_failures() {
        let dir = scratch_dir("dir");
        std::fs::write(dir.join("a.json"), CAT).unwrap();
        std::fs::write(dir.join("b.json"), "{ not json").unwrap();
        std::fs::write(dir.join("c.json"), BIRD).unwrap();
        std::fs::write(dir.join(".hidden"), "ignored").unwrap();

        let pairs = pipeline(ReturnSpec::Both).process_dir(&dir).await.unwrap();
        assert_eq!(
            contexts(&pairs),
            vec![["Cat", "The_"], ["Bird", "_sang"], ["Bird", "A_"]]
        );
        assert_eq!(pairs.triples.len(), 1);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_return_spec_and_forced_language() {
        let dir = scratch_dir("spec");
        let path = dir.join("bird.json");
        std::fs::write(&path, BIRD).unwrap();

        let pipeline = Pipeline::from_config(
            &AppConfig::default(),
            Some(Language::Danish),
            ReturnSpec::Triples,
        )
        .unwrap();
        let pairs = pipeline.process_file(path).await.unwrap();
        assert!(pairs.is_empty());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let result = pipeline(ReturnSpec::Both)
            .process_file(PathBuf::from("/nonexistent/article.json"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_dir_fails() {
        let result = pipeline(ReturnSpec::Both)
            .process_dir(Path::new("/nonexistent/articles"))
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_default_language() {
        let mut config = AppConfig::default();
        config.tokenizer.default_language = "xx".to_string();
        assert!(Pipeline::from_config(&config, None, ReturnSpec::Both).is_err());
    }
}
