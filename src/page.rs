use std::sync::LazyLock;

use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http;

static MAIN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("main").unwrap());
static PRE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("pre").unwrap());

/// Elements whose text never renders.
const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

/// One successfully scraped documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedPage {
    pub url: String,
    pub text: String,
    pub code_blocks: Vec<String>,
}

/// Fetch a single page and extract its text and code blocks.
pub async fn scrape_page(client: &Client, url: &str) -> Result<ScrapedPage> {
    let html = http::fetch_text(client, url).await?;
    Ok(extract_page(url, &html))
}

/// Extract from the <main> region, or the whole document when there is none.
pub fn extract_page(url: &str, html: &str) -> ScrapedPage {
    let document = Html::parse_document(html);
    let region = document
        .select(&MAIN_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    collect_visible_text(region, &mut raw);

    let code_blocks = region
        .select(&PRE_SELECTOR)
        .map(|pre| trim_code(&pre.text().collect::<String>()))
        .collect();

    ScrapedPage {
        url: url.to_string(),
        text: normalize_whitespace(&raw),
        code_blocks,
    }
}

/// Depth-first walk with an explicit stack so deep nesting cannot overflow.
fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    let mut stack: Vec<_> = element.children().rev().collect();
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) if !INVISIBLE.contains(&el.name()) => {
                stack.extend(node.children().rev());
            }
            _ => {}
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop leading blank lines and trailing whitespace; keep everything between.
fn trim_code(raw: &str) -> String {
    let mut code = raw.trim_end();
    while let Some(idx) = code.find('\n') {
        if !code[..idx].trim().is_empty() {
            break;
        }
        code = &code[idx + 1..];
    }
    code.to_string()
}
