//! Reader-mode extraction
//!
//! Fetches a page and distills the main article: the densest text
//! block among the usual article containers, re-rendered as sanitized
//! block elements so the reader pane never executes page scripts.

use reqwest::redirect::Policy;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::time::Duration;

use crate::error::SurfaceError;
use crate::Result;

const READER_USER_AGENT: &str = "Mozilla/5.0 (Nimbus Reader)";

/// Blocks emitted per article before extraction stops.
const MAX_BLOCKS: usize = 320;

#[derive(Debug, Clone, Serialize)]
pub struct ReaderContent {
    pub url: String,
    pub title: String,
    pub byline: Option<String>,
    pub content_html: String,
}

pub struct ReaderExtractor {
    client: reqwest::Client,
}

impl ReaderExtractor {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(5))
            .timeout(Duration::from_secs(12))
            .user_agent(READER_USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    pub async fn extract(&self, url: &str) -> Result<ReaderContent> {
        let parsed = url::Url::parse(url.trim())
            .map_err(|e| SurfaceError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SurfaceError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let resp = self.client.get(parsed).send().await?;
        if !resp.status().is_success() {
            return Err(SurfaceError::Status(resp.status().as_u16()));
        }

        let final_url = resp.url().to_string();
        let body = resp.text().await?;
        let content = extract_document(final_url, &body)?;

        tracing::debug!(url = %content.url, title = %content.title, "Reader extraction complete");
        Ok(content)
    }
}

fn extract_document(final_url: String, body: &str) -> Result<ReaderContent> {
    let doc = Html::parse_document(body);

    let title = extract_title(&doc).unwrap_or_else(|| final_url.clone());
    let byline = extract_byline(&doc);
    let content_html = extract_content_html(&doc);

    if content_html.trim().is_empty() {
        return Err(SurfaceError::NoContent);
    }

    Ok(ReaderContent {
        url: final_url,
        title,
        byline,
        content_html,
    })
}

fn extract_title(doc: &Html) -> Option<String> {
    if let Ok(sel) = Selector::parse("meta[property='og:title']") {
        for el in doc.select(&sel) {
            if let Some(content) = el.value().attr("content") {
                let cleaned = normalize_whitespace(content);
                if !cleaned.is_empty() {
                    return Some(cleaned);
                }
            }
        }
    }

    if let Ok(sel) = Selector::parse("title") {
        for el in doc.select(&sel) {
            let text = el.text().collect::<Vec<_>>().join(" ");
            let cleaned = normalize_whitespace(&text);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }

    if let Ok(sel) = Selector::parse("h1") {
        for el in doc.select(&sel) {
            let text = el.text().collect::<Vec<_>>().join(" ");
            let cleaned = normalize_whitespace(&text);
            if cleaned.len() >= 6 {
                return Some(cleaned);
            }
        }
    }

    None
}

fn extract_byline(doc: &Html) -> Option<String> {
    let sel = Selector::parse("meta[name='author']").ok()?;
    for el in doc.select(&sel) {
        if let Some(content) = el.value().attr("content") {
            let cleaned = normalize_whitespace(content);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }
    None
}

fn extract_content_html(doc: &Html) -> String {
    // Containers in preference order; body is the last resort and
    // accepts any length.
    let candidates = [
        ("article", 400usize),
        ("main, [role='main'], .content, .post", 400usize),
        ("body", 0usize),
    ];

    for (selector_str, min_len) in candidates {
        let Ok(sel) = Selector::parse(selector_str) else {
            continue;
        };

        let mut best_score = 0usize;
        let mut best_html = String::new();

        for el in doc.select(&sel) {
            let score = element_text_len(&el);
            if score <= best_score {
                continue;
            }
            let rendered = render_blocks(&el);
            if rendered.trim().is_empty() {
                continue;
            }
            best_score = score;
            best_html = rendered;
        }

        if best_score >= min_len && !best_html.trim().is_empty() {
            return best_html;
        }
    }

    String::new()
}

fn element_text_len(el: &ElementRef<'_>) -> usize {
    el.text()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.len())
        .sum()
}

/// Re-render the article as plain block elements. Script, style, and
/// page chrome never make it through because only the whitelisted
/// block tags are emitted, with their text escaped.
fn render_blocks(root: &ElementRef<'_>) -> String {
    let Ok(block_sel) = Selector::parse("h2, h3, p, blockquote, pre, li") else {
        return String::new();
    };

    let mut out = String::new();
    let mut blocks = 0usize;

    for el in root.select(&block_sel) {
        if blocks >= MAX_BLOCKS {
            break;
        }

        let tag = el.value().name();
        let text = if tag == "pre" {
            el.text().collect::<Vec<_>>().join("")
        } else {
            el.text().collect::<Vec<_>>().join(" ")
        };

        let cleaned = if tag == "pre" {
            text.trim_end().to_string()
        } else {
            normalize_whitespace(&text)
        };

        if cleaned.is_empty() {
            continue;
        }

        let escaped = escape_html(&cleaned);
        let rendered_tag = match tag {
            "h2" | "h3" | "blockquote" | "pre" => tag,
            "li" => "li",
            _ => "p",
        };

        out.push('<');
        out.push_str(rendered_tag);
        out.push('>');
        out.push_str(&escaped);
        out.push_str("</");
        out.push_str(rendered_tag);
        out.push_str(">\n");

        blocks += 1;
    }

    out
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
