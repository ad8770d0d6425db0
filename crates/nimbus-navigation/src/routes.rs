//! Internal pages and chrome-less embedded mode
//!
//! Internal paths (`/history`, `/bookmarks`, ...) load inside a
//! surface as the application's own UI bundle with a query marker
//! telling the page to render without its navigation chrome — the
//! host window supplies that chrome separately. The marker is stripped
//! again for anything user-facing (address bar, tab list).

/// Query marker appended to embedded internal-page URLs.
pub const EMBEDDED_MODE_MARKER: &str = "mode=embedded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalRoute {
    Home,
    History,
    Bookmarks,
    Videos,
    Images,
}

impl InternalRoute {
    /// Parse an internal path as typed in the address bar.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        match path.trim_end_matches('/') {
            "" => Some(InternalRoute::Home),
            "/home" => Some(InternalRoute::Home),
            "/history" => Some(InternalRoute::History),
            "/bookmarks" => Some(InternalRoute::Bookmarks),
            "/videos" => Some(InternalRoute::Videos),
            "/images" => Some(InternalRoute::Images),
            _ => None,
        }
    }

    /// Detect the route inside a full (possibly embedded) URL.
    pub fn matches_url(url: &str) -> Option<Self> {
        if url.contains("/history") {
            Some(InternalRoute::History)
        } else if url.contains("/bookmarks") {
            Some(InternalRoute::Bookmarks)
        } else if url.contains("/videos") {
            Some(InternalRoute::Videos)
        } else if url.contains("/images") {
            Some(InternalRoute::Images)
        } else if url.contains("/home") {
            Some(InternalRoute::Home)
        } else {
            None
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            InternalRoute::Home => "/home",
            InternalRoute::History => "/history",
            InternalRoute::Bookmarks => "/bookmarks",
            InternalRoute::Videos => "/videos",
            InternalRoute::Images => "/images",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            InternalRoute::Home => "New Tab",
            InternalRoute::History => "History",
            InternalRoute::Bookmarks => "Bookmarks",
            InternalRoute::Videos => "Extracted Videos",
            InternalRoute::Images => "Extracted Images",
        }
    }
}

pub fn is_embedded(url: &str) -> bool {
    url.contains(EMBEDDED_MODE_MARKER)
}

/// Rewrite an internal path to the UI bundle URL in embedded mode.
/// `/` loads the bundle root.
pub fn embedded_url(app_url: &str, path: &str) -> String {
    let suffix = if path == "/" { "" } else { path };
    format!("{}#{}?{}", app_url, suffix, EMBEDDED_MODE_MARKER)
}

/// Address-bar form of a URL: embedded internal pages show their short
/// path, everything else passes through.
pub fn display_url(url: &str) -> String {
    if is_embedded(url) {
        // The embedded root has no named route; the marker still must
        // not reach the address bar.
        return InternalRoute::matches_url(url)
            .map(|route| route.path().to_string())
            .unwrap_or_else(|| "/".to_string());
    }
    url.to_string()
}

/// Derive the display title for a loaded page. Internal routes get
/// fixed titles; a blank title or the empty placeholder page falls
/// back to "New Tab".
pub fn display_title(url: &str, surface_title: &str) -> String {
    if is_embedded(url) {
        if let Some(route) = InternalRoute::matches_url(url) {
            return route.title().to_string();
        }
    }

    if surface_title.trim().is_empty() || url == "about:blank" {
        return InternalRoute::Home.title().to_string();
    }

    surface_title.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(InternalRoute::from_path("/"), Some(InternalRoute::Home));
        assert_eq!(InternalRoute::from_path("/home"), Some(InternalRoute::Home));
        assert_eq!(
            InternalRoute::from_path("/history"),
            Some(InternalRoute::History)
        );
        assert_eq!(
            InternalRoute::from_path("/videos"),
            Some(InternalRoute::Videos)
        );
        assert_eq!(InternalRoute::from_path("/unknown"), None);
    }

    #[test]
    fn test_embedded_url_round_trip() {
        let url = embedded_url("file:///app/index.html", "/history");
        assert_eq!(url, "file:///app/index.html#/history?mode=embedded");
        assert!(is_embedded(&url));
        assert_eq!(display_url(&url), "/history");
        assert_eq!(display_title(&url, "ignored"), "History");
    }

    #[test]
    fn test_embedded_root() {
        let url = embedded_url("file:///app/index.html", "/");
        assert_eq!(url, "file:///app/index.html#?mode=embedded");
        assert_eq!(display_url(&url), "/");
        assert!(!display_url(&url).contains(EMBEDDED_MODE_MARKER));
    }

    #[test]
    fn test_display_title_fallbacks() {
        assert_eq!(display_title("https://example.com", "Example"), "Example");
        assert_eq!(display_title("https://example.com", "  "), "New Tab");
        assert_eq!(display_title("about:blank", "whatever"), "New Tab");
    }

    #[test]
    fn test_external_url_untouched() {
        assert_eq!(
            display_url("https://example.com/history-of-rome"),
            "https://example.com/history-of-rome"
        );
    }
}
