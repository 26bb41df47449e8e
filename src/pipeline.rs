use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::{output, page, sitemap};

/// Inputs for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub sitemap_url: String,
    pub doc_path_markers: Vec<String>,
    pub output: PathBuf,
    /// Max pages to scrape (default: all discovered)
    pub limit: Option<usize>,
}

/// Counts returned after completion. `scraped + failed == selected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    pub selected: usize,
    pub scraped: usize,
    pub failed: usize,
}

/// Sitemap → filter → scrape each page in order → write JSON.
///
/// Sitemap errors abort the run. Page errors are logged and skipped.
pub async fn run(client: &Client, opts: &ScrapeOptions) -> Result<RunSummary> {
    let xml = sitemap::fetch_sitemap(client, &opts.sitemap_url).await?;
    let mut urls = sitemap::extract_doc_urls(&xml, &opts.doc_path_markers)?;
    let discovered = urls.len();

    if let Some(limit) = opts.limit {
        urls.truncate(limit);
    }
    let selected = urls.len();
    info!("Scraping {} of {} doc pages", selected, discovered);

    let pb = ProgressBar::new(selected as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut pages = Vec::with_capacity(selected);
    let mut failed = 0usize;

    for url in &urls {
        match page::scrape_page(client, url).await {
            Ok(scraped) => {
                debug!(%url, code_blocks = scraped.code_blocks.len(), "scraped");
                pages.push(scraped);
            }
            Err(e) => {
                failed += 1;
                pb.suspend(|| warn!(network = e.is_network(), "Failed to scrape {}: {}", url, e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    output::write_pages(&opts.output, &pages)?;

    Ok(RunSummary {
        discovered,
        selected,
        scraped: pages.len(),
        failed,
    })
}
