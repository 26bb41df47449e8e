use quick_xml::events::Event;
use reqwest::Client;
use tracing::info;

use crate::error::Result;
use crate::http;

pub const ANGULAR_SITEMAP_URL: &str = "https://angular.io/sitemap.xml";
pub const DEFAULT_DOC_MARKERS: &[&str] = &["angular.io/guide/", "angular.io/tutorial"];

/// Download the raw sitemap XML. Any failure here aborts the run.
pub async fn fetch_sitemap(client: &Client, url: &str) -> Result<String> {
    info!("Fetching sitemap: {}", url);
    http::fetch_text(client, url).await
}

/// Return the sitemap's doc URLs in document order.
pub fn extract_doc_urls<S: AsRef<str>>(xml: &str, markers: &[S]) -> Result<Vec<String>> {
    let all_urls = parse_locations(xml)?;
    info!("Total URLs in sitemap: {}", all_urls.len());

    let filtered = filter_doc_urls(all_urls, markers);
    info!("Doc pages after filtering: {}", filtered.len());
    Ok(filtered)
}

/// Keep URLs containing at least one marker. Duplicates are kept.
pub fn filter_doc_urls<S: AsRef<str>>(urls: Vec<String>, markers: &[S]) -> Vec<String> {
    urls.into_iter()
        .filter(|url| markers.iter().any(|m| url.contains(m.as_ref())))
        .collect()
}

/// Parse sitemap XML and return every <loc> value, trimmed.
/// Works for both <urlset> and <sitemapindex> documents.
pub fn parse_locations(xml: &str) -> Result<Vec<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut urls = Vec::new();
    let mut loc: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"loc" => loc = Some(String::new()),
            Event::Text(e) => {
                if let Some(text) = loc.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(text) = loc.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"loc" => {
                if let Some(text) = loc.take() {
                    urls.push(text.trim().to_string());
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(urls)
}
