//! Gazette content tool
//!
//! Runs the article content pipeline over a Markdown file or stdin.
//!
//! Usage:
//!   gazette validate article.md
//!   gazette render article.md > article.html
//!   cat article.md | gazette excerpt --max-length 120

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use gazette_kernel::content::{ContentPipeline, strip_html};
use gazette_kernel::{Config, ContentRejected};

/// Validate, render, and sanitize article Markdown.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the validation verdict as JSON.
    Validate {
        /// Markdown file (stdin when omitted or "-").
        file: Option<PathBuf>,
    },
    /// Validate, then print sanitized HTML.
    Render { file: Option<PathBuf> },
    /// Print a plain-text excerpt.
    Excerpt {
        file: Option<PathBuf>,

        /// Maximum excerpt length in characters.
        #[arg(long, env = "GAZETTE_EXCERPT_LENGTH")]
        max_length: Option<usize>,
    },
    /// Print the stored form of an article (markdown, html, excerpt) as JSON.
    Prepare { file: Option<PathBuf> },
    /// Print the input with markup tags removed.
    Strip { file: Option<PathBuf> },
}

fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    debug!(
        max_content_length = config.max_content_length,
        excerpt_length = config.excerpt_length,
        "Configuration loaded"
    );

    let pipeline = ContentPipeline::from_config(&config);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Validate { file } => {
            let input = read_input(file.as_ref())?;
            let verdict = pipeline.validate(&input);
            serde_json::to_writer_pretty(&mut stdout, &verdict)
                .context("failed to write verdict")?;
            writeln!(stdout)?;
            if !verdict.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Render { file } => {
            let input = read_input(file.as_ref())?;
            match pipeline.process_for_storage(&input) {
                Ok(html) => write!(stdout, "{html}")?,
                Err(rejected) => return report_rejection(rejected),
            }
        }
        Command::Excerpt { file, max_length } => {
            let input = read_input(file.as_ref())?;
            writeln!(stdout, "{}", pipeline.generate_excerpt(&input, max_length))?;
        }
        Command::Prepare { file } => {
            let input = read_input(file.as_ref())?;
            match pipeline.prepare_article(&input) {
                Ok(article) => {
                    serde_json::to_writer_pretty(&mut stdout, &article)
                        .context("failed to write article")?;
                    writeln!(stdout)?;
                }
                Err(rejected) => return report_rejection(rejected),
            }
        }
        Command::Strip { file } => {
            let input = read_input(file.as_ref())?;
            write!(stdout, "{}", strip_html(&input))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Read the whole input from a file, or stdin for `None` / `-`.
fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn report_rejection(rejected: ContentRejected) -> Result<ExitCode> {
    info!(reason = %rejected, "content rejected");
    let mut stderr = io::stderr().lock();
    serde_json::to_writer_pretty(&mut stderr, rejected.verdict())
        .context("failed to write verdict")?;
    writeln!(stderr)?;
    Ok(ExitCode::FAILURE)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
