//! sitebrief CLI - webpage summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use sitebrief::scraper::{self, FetchResult, PageFetcher};
use sitebrief::pipeline::display_text;
use sitebrief::{input, observability, ui, Config, LlmSummarizer, Pipeline};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "sitebrief")]
#[command(author, version, about = "Fetch a webpage and summarise it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a webpage by URL
    Summarise {
        /// URL to summarise; `https://` is assumed when no scheme is given
        url: String,
        /// Show raw extracted text instead of summary
        #[arg(long)]
        raw: bool,
    },
    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Summarise { url, raw }) => {
            let config = init()?;
            let url = match input::normalize_url(&url) {
                Ok(url) => url,
                Err(e) => fail(&e.to_string()),
            };
            println!("Fetching: {}", url);

            if raw {
                // Just show raw extracted text
                let fetcher = PageFetcher::new(
                    &config.pipeline.user_agent,
                    config.pipeline.fetch_timeout(),
                )?;
                let html = match fetcher.fetch(&url).await {
                    FetchResult::Success { html } => html,
                    FetchResult::Failure { reason } => fail(&reason),
                };
                let title = scraper::extract_title(&html).unwrap_or_else(|| "No title".to_string());
                let text = scraper::extract_text(&html);

                println!("\n=== {} ===\n", title);
                println!("{}", text);
                println!("\n--- Extracted {} characters ---", text.chars().count());
            } else {
                let pipeline = build_pipeline(&config)?;
                let outcome = pipeline.run(&url).await;
                match &outcome {
                    Ok(_) => println!("\n{}", display_text(&outcome)),
                    Err(e) => fail(&e.to_string()),
                }
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "sitebrief", &mut std::io::stdout());
        }
        None => {
            // Default: Launch the TUI
            if !atty::is(atty::Stream::Stdout) {
                anyhow::bail!("the interactive UI needs a terminal; use `sitebrief summarise <url>`");
            }
            let config = init()?;
            ui::run(Arc::new(build_pipeline(&config)?)).await?;
        }
    }

    Ok(())
}

/// Load configuration and start logging
fn init() -> anyhow::Result<Config> {
    let config = Config::load()?;
    let log_path = observability::init_logging(&config.logging)?;
    tracing::info!(log = %log_path.display(), "sitebrief starting");
    Ok(config)
}

fn build_pipeline(config: &Config) -> anyhow::Result<Pipeline> {
    let summarizer = LlmSummarizer::from_config(config)?;
    Ok(Pipeline::new(&config.pipeline, Arc::new(summarizer))?)
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(1);
}
