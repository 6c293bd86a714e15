//! Tab-separated result files
//!
//! Contexts go to `<prefix>_contexts`, triples to `<prefix>_triples`. One
//! record per line, fields separated by tabs, no trailing newline. In append
//! mode a newline is written before the new records.
//!
//! Backslashes, tabs and line breaks inside a field are written as `\\`,
//! `\t`, `\r` and `\n`, so every record keeps its field count.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use allpairs_core::OutputConfig;
use allpairs_extractor::{AllPairs, ReturnSpec};

#[derive(Debug, Clone)]
pub struct TsvWriter {
    prefix: PathBuf,
    contexts_suffix: String,
    triples_suffix: String,
    append: bool,
}

impl TsvWriter {
    pub fn new(prefix: impl Into<PathBuf>, config: &OutputConfig) -> Self {
        Self {
            prefix: prefix.into(),
            contexts_suffix: config.contexts_suffix.clone(),
            triples_suffix: config.triples_suffix.clone(),
            append: config.append,
        }
    }

    pub fn contexts_path(&self) -> PathBuf {
        self.with_suffix(&self.contexts_suffix)
    }

    pub fn triples_path(&self) -> PathBuf {
        self.with_suffix(&self.triples_suffix)
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.prefix.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Write the sequences selected by `spec`, returning the files touched
    pub fn write(&self, pairs: &AllPairs, spec: ReturnSpec) -> anyhow::Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        if spec.contexts() {
            let path = self.contexts_path();
            let lines = pairs.contexts.iter().map(|c| record(&c.fields()));
            self.write_lines(&path, lines)?;
            written.push(path);
        }

        if spec.triples() {
            let path = self.triples_path();
            let lines = pairs.triples.iter().map(|t| record(&t.fields()));
            self.write_lines(&path, lines)?;
            written.push(path);
        }

        Ok(written)
    }

    fn write_lines(&self, path: &Path, lines: impl Iterator<Item = String>) -> anyhow::Result<()> {
        let body = lines.collect::<Vec<_>>().join("\n");

        let mut file = if self.append {
            OpenOptions::new().create(true).append(true).open(path)
        } else {
            File::create(path)
        }
        .with_context(|| format!("Failed to open {}", path.display()))?;

        if self.append {
            file.write_all(b"\n")?;
        }
        file.write_all(body.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::debug!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(())
    }
}

fn escape_field(field: &str) -> String {
    let mut escaped = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn record(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join("\t")
}
