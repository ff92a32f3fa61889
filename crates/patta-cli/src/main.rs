//! Command-line interface for patta certificate extraction.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use patta::ocr::TesseractEngine;
use patta::{ExtractionConfig, FieldSchema, process_image};

#[derive(Parser)]
#[command(name = "patta", version, about = "Extract structured fields from scanned certificates")]
struct Cli {
    /// Path to a patta.toml config file (searched upward from the current
    /// directory when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run OCR on a certificate image and print the extracted record
    Extract {
        /// Image file to process
        image: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Normalize raw OCR text from a file (or stdin) into markdown
    Normalize {
        /// Text file to normalize; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// Run the extraction API server
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value_t = 5001)]
        port: u16,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Flat JSON record (null for absent fields)
    Json,
    /// Normalized markdown content
    Text,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ExtractionConfig> {
    match path {
        Some(path) => ExtractionConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ExtractionConfig::discover()?.unwrap_or_default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    config.validate()?;

    match cli.command {
        Commands::Extract { image, format } => {
            let bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("failed to read {}", image.display()))?;

            let schema = FieldSchema::default();
            let engine = TesseractEngine::new();
            let extraction = process_image(&bytes, &engine, &config, &schema).await?;

            tracing::info!(matched = extraction.record.matched_count(), "extraction complete");

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&extraction.record)?),
                OutputFormat::Text => println!("{}", extraction.content),
            }
        }

        Commands::Normalize { file } => {
            let text = match file {
                Some(path) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("failed to read stdin")?;
                    buffer
                }
            };

            let document = patta::normalize(&text, &config.corrections);
            println!("{}", document.to_markdown());
        }

        Commands::Serve { host, port } => {
            patta::api::serve(&host, port, config, Arc::new(TesseractEngine::new())).await?;
        }
    }

    Ok(())
}
