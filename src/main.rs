mod error;
mod http;
mod output;
mod page;
mod pipeline;
mod settings;
mod sitemap;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use pipeline::ScrapeOptions;
use settings::Settings;

#[derive(Parser)]
#[command(name = "docscrape", about = "Scrape guide and tutorial pages listed in a docs sitemap")]
struct Cli {
    /// Path to write the JSON output
    output: PathBuf,

    /// Max pages to scrape (default: all discovered)
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Sitemap to read instead of the configured one
    #[arg(long)]
    sitemap_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// URL substring marking a doc page; repeat for several
    #[arg(long = "marker")]
    markers: Vec<String>,
}

impl Cli {
    fn apply(self, mut settings: Settings) -> (Settings, PathBuf, Option<usize>) {
        if let Some(url) = self.sitemap_url {
            settings.sitemap_url = url;
        }
        if let Some(secs) = self.timeout {
            settings.timeout_secs = secs;
        }
        if !self.markers.is_empty() {
            settings.doc_path_markers = self.markers;
        }
        (settings, self.output, self.limit)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    let (settings, output, limit) = cli.apply(settings);
    info!(?settings, "Starting doc scraper");

    let client = http::build_client(settings.timeout()).context("Failed to build HTTP client")?;
    let opts = ScrapeOptions {
        sitemap_url: settings.sitemap_url,
        doc_path_markers: settings.doc_path_markers,
        output,
        limit,
    };

    let summary = pipeline::run(&client, &opts)
        .await
        .with_context(|| format!("Scrape of {} failed", opts.sitemap_url))?;

    println!(
        "Done: {} scraped ({} ok, {} errors) of {} doc pages -> {}",
        summary.selected,
        summary.scraped,
        summary.failed,
        summary.discovered,
        opts.output.display()
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Finished in {}", format_duration(elapsed));
    }
    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
