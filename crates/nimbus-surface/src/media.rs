//! Media element discovery
//!
//! Scans a page for video and image sources. The coordinator triggers
//! a scan after a non-internal page finishes loading and again for the
//! explicit extract-videos / extract-images actions; results flow back
//! asynchronously and are dropped by the coordinator when the
//! requesting tab is no longer active.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use scraper::{Html, Selector};
use serde::Serialize;
use std::time::Duration;

use crate::error::SurfaceError;
use crate::Result;

const SCANNER_USER_AGENT: &str = "Mozilla/5.0 (Nimbus)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaScan {
    pub videos: Vec<String>,
    pub images: Vec<String>,
}

#[async_trait]
pub trait MediaScanner: Send + Sync {
    async fn scan(&self, url: &str) -> Result<MediaScan>;
}

/// Scanner that fetches the page over HTTP and walks its DOM for
/// `video`, `video > source`, and `img` sources.
pub struct HttpMediaScanner {
    client: reqwest::Client,
}

impl HttpMediaScanner {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(5))
            .timeout(Duration::from_secs(12))
            .user_agent(SCANNER_USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl MediaScanner for HttpMediaScanner {
    async fn scan(&self, url: &str) -> Result<MediaScan> {
        let parsed = url::Url::parse(url).map_err(|e| SurfaceError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SurfaceError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let resp = self.client.get(parsed).send().await?;
        if !resp.status().is_success() {
            return Err(SurfaceError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        let scan = scan_document(&body);

        tracing::debug!(
            url = %url,
            videos = scan.videos.len(),
            images = scan.images.len(),
            "Media scan complete"
        );
        Ok(scan)
    }
}

/// Parse outside the async path so the non-`Send` DOM never crosses an
/// await point.
fn scan_document(body: &str) -> MediaScan {
    let doc = Html::parse_document(body);

    let mut videos = Vec::new();
    if let Ok(sel) = Selector::parse("video, video source") {
        for el in doc.select(&sel) {
            push_http_src(&mut videos, el.value().attr("src"));
        }
    }

    let mut images = Vec::new();
    if let Ok(sel) = Selector::parse("img") {
        for el in doc.select(&sel) {
            push_http_src(&mut images, el.value().attr("src"));
        }
    }

    MediaScan { videos, images }
}

fn push_http_src(out: &mut Vec<String>, src: Option<&str>) {
    let Some(src) = src else { return };
    if !src.starts_with("http") {
        return;
    }
    if out.iter().any(|existing| existing == src) {
        return;
    }
    out.push(src.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_collects_http_sources() {
        let html = r#"
            <html><body>
              <video src="https://cdn.test/clip.mp4"></video>
              <video><source src="https://cdn.test/other.webm"></video>
              <video src="blob:local-stream"></video>
              <img src="https://cdn.test/pic.png">
              <img src="/relative.png">
            </body></html>
        "#;

        let scan = scan_document(html);
        assert_eq!(
            scan.videos,
            vec![
                "https://cdn.test/clip.mp4".to_string(),
                "https://cdn.test/other.webm".to_string()
            ]
        );
        assert_eq!(scan.images, vec!["https://cdn.test/pic.png".to_string()]);
    }

    #[test]
    fn test_scan_dedups_preserving_order() {
        let html = r#"
            <img src="https://a.test/1.png">
            <img src="https://a.test/2.png">
            <img src="https://a.test/1.png">
        "#;

        let scan = scan_document(html);
        assert_eq!(
            scan.images,
            vec![
                "https://a.test/1.png".to_string(),
                "https://a.test/2.png".to_string()
            ]
        );
    }

    #[test]
    fn test_scan_empty_page() {
        assert_eq!(scan_document("<html></html>"), MediaScan::default());
    }
}
