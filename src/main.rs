//! # tubecrawl CLI
//!
//! Command-line front end for the channel crawler.
//!
//! - `crawl`: crawl a channel and write its JSON snapshot, CSV table and
//!   HTML table of contents
//! - `render`: rebuild the CSV table and HTML page from a saved snapshot
//!   without fetching anything
//!
//! Requests are throttled to one every few seconds by default, so crawling a
//! large channel takes a while. Progress is logged to stderr.

mod telemetry;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::instrument;
use tubecrawl::crawler::{
    Crawler, CrawlerConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_DELAY_MS, MissingTitlePolicy,
    SelectorConfig,
};
use tubecrawl::storage::{Storage, StorageConfig, load_snapshot};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Crawl a video channel into a table of contents",
    long_about = None
)]
struct Cli {
    /// Also write logs to tubecrawl.log in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a channel and save the results
    Crawl(CrawlArgs),

    /// Regenerate the CSV and HTML output from a saved snapshot
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Channel user name or channel id
    #[arg(required = true)]
    channel: String,

    /// Directory to write the output files to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Delay after each request in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_REQUEST_DELAY_MS)]
    delay_ms: u64,

    /// Site base address
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// JSON file overriding the CSS selectors
    #[arg(short, long)]
    selectors: Option<PathBuf>,

    /// Leave out video pages without a title instead of stopping the crawl
    #[arg(long)]
    skip_missing_title: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Snapshot file written by `crawl`
    #[arg(required = true)]
    snapshot: PathBuf,

    /// Directory to write the output files to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing_subscriber(cli.log_dir.as_deref())?;

    match cli.command {
        Commands::Crawl(args) => crawl_command(args).await?,
        Commands::Render(args) => render_command(args).await?,
    }

    Ok(())
}

#[instrument]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    let selectors = match &args.selectors {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading selectors from {}", path.display()))?;
            SelectorConfig::from_json(&json)?
        }
        None => SelectorConfig::default(),
    };

    let missing_title = if args.skip_missing_title {
        MissingTitlePolicy::Skip
    } else {
        MissingTitlePolicy::Abort
    };

    let config = CrawlerConfig::builder()
        .base_url(args.base_url)
        .request_delay_ms(args.delay_ms)
        .selectors(selectors)
        .missing_title(missing_title)
        .build();

    println!("Finding sections for {}...", args.channel);
    let crawler = Crawler::new(config)?;
    let channel = crawler.crawl_channel(&args.channel).await?;

    let storage = Storage::with_config(StorageConfig {
        base_path: args.output_dir,
    });
    let files = storage.store(&channel).await?;

    println!(
        "Crawled {} sections and {} videos",
        channel.sections.len(),
        channel.video_count()
    );
    println!(
        "Wrote {}, {} and {}",
        files.snapshot.display(),
        files.csv.display(),
        files.html.display()
    );
    Ok(())
}

#[instrument]
async fn render_command(args: RenderArgs) -> anyhow::Result<()> {
    let channel = load_snapshot(&args.snapshot)
        .await
        .with_context(|| format!("loading snapshot {}", args.snapshot.display()))?;

    let storage = Storage::with_config(StorageConfig {
        base_path: args.output_dir,
    });
    let files = storage.store_reports(&channel).await?;

    println!(
        "Wrote {} and {}",
        files.csv.display(),
        files.html.display()
    );
    Ok(())
}
