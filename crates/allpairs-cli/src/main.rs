//! allpairs CLI - Command-line interface
//!
//! Usage:
//!   allpairs file <article.json> <out_prefix>
//!   allpairs dir <articles/> <out_prefix>
//!   allpairs languages

mod output;
mod pipeline;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use allpairs_core::{AppConfig, LoggingConfig};
use allpairs_extractor::ReturnSpec;
use allpairs_parser::Language;

use crate::output::TsvWriter;
use crate::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "allpairs")]
#[command(about = "Extract entity contexts and triples from annotated articles")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Language code for every article, overriding the article's own
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Window size
    #[arg(long, global = true)]
    window: Option<usize>,

    /// Produce only contexts or only triples
    #[arg(long, global = true, value_name = "contexts|triples")]
    only: Option<ReturnSpec>,

    /// Append to existing output files
    #[arg(long, global = true)]
    append: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one annotated article
    File {
        /// Annotated article (JSON)
        path: PathBuf,
        /// Output prefix
        out: PathBuf,
    },
    /// Process every article in a directory
    Dir {
        /// Directory of annotated articles
        dir: PathBuf,
        /// Output prefix
        out: PathBuf,
    },
    /// List supported languages
    Languages,
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };

    if let Some(window) = cli.window {
        config.extractor.window_size = window;
    }
    if cli.append {
        config.output.append = true;
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging);

    let forced_language = cli
        .lang
        .as_deref()
        .map(str::parse::<Language>)
        .transpose()?;
    let spec = cli.only.unwrap_or_default();

    let (pairs, out) = match cli.command {
        Commands::Languages => {
            for language in Language::all() {
                println!("{}\t{}", language.code(), language.name());
            }
            return Ok(());
        }
        Commands::File { path, out } => {
            let pipeline = Pipeline::from_config(&config, forced_language, spec)?;
            (pipeline.process_file(path).await?, out)
        }
        Commands::Dir { dir, out } => {
            let pipeline = Pipeline::from_config(&config, forced_language, spec)?;
            (pipeline.process_dir(&dir).await?, out)
        }
    };

    let writer = TsvWriter::new(out, &config.output);
    for path in writer.write(&pairs, spec)? {
        tracing::info!("Wrote {}", path.display());
    }
    tracing::info!(
        "{} contexts, {} triples",
        pairs.contexts.len(),
        pairs.triples.len()
    );

    Ok(())
}
