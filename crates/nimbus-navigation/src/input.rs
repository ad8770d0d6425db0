//! Address input classification
//!
//! First match wins:
//! 1. absolute URL with a recognized scheme — loaded verbatim
//! 2. leading `/` — internal path
//! 3. contains a dot, no whitespace — bare domain, https-prefixed
//! 4. anything else — search query against the configured template

use url::Url;

/// `%s` is replaced with the percent-encoded query.
pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q=%s";

const RECOGNIZED_SCHEMES: &[&str] = &["http", "https", "file", "about", "data", "app"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Absolute URL, loaded as-is
    Url(String),
    /// Internal application path, to be rewritten to the embedded-mode
    /// UI bundle URL
    Internal(String),
    /// Bare domain, prefixed with https
    Domain(String),
    /// Fully templated search URL
    Search(String),
}

impl Resolution {
    /// The URL to load, given the app bundle URL for internal paths.
    pub fn into_load_url(self, app_url: &str) -> String {
        match self {
            Resolution::Url(url) | Resolution::Domain(url) | Resolution::Search(url) => url,
            Resolution::Internal(path) => crate::routes::embedded_url(app_url, &path),
        }
    }
}

pub struct InputResolver {
    search_template: String,
}

impl InputResolver {
    pub fn new() -> Self {
        Self {
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
        }
    }

    pub fn with_search_engine(template: String) -> Self {
        Self {
            search_template: template,
        }
    }

    pub fn set_search_engine(&mut self, template: String) {
        self.search_template = template;
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    pub fn resolve(&self, input: &str) -> Resolution {
        let input = input.trim();

        if input.is_empty() {
            return Resolution::Url("about:blank".to_string());
        }

        if let Ok(parsed) = Url::parse(input) {
            if RECOGNIZED_SCHEMES.contains(&parsed.scheme()) {
                return Resolution::Url(input.to_string());
            }
        }

        if input.starts_with('/') {
            return Resolution::Internal(input.to_string());
        }

        if input.contains('.') && !input.chars().any(char::is_whitespace) {
            return Resolution::Domain(format!("https://{}", input));
        }

        let encoded = urlencoding::encode(input);
        Resolution::Search(self.search_template.replace("%s", &encoded))
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}

mod urlencoding {
    pub fn encode(input: &str) -> String {
        let mut result = String::with_capacity(input.len() * 3);
        for byte in input.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    result.push(byte as char);
                }
                _ => {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_verbatim() {
        let resolver = InputResolver::new();
        assert_eq!(
            resolver.resolve("https://x.test/a"),
            Resolution::Url("https://x.test/a".to_string())
        );
        assert_eq!(
            resolver.resolve("about:blank"),
            Resolution::Url("about:blank".to_string())
        );
    }

    #[test]
    fn test_internal_path() {
        let resolver = InputResolver::new();
        assert_eq!(
            resolver.resolve("/history"),
            Resolution::Internal("/history".to_string())
        );
    }

    #[test]
    fn test_bare_domain() {
        let resolver = InputResolver::new();
        assert_eq!(
            resolver.resolve("example.com"),
            Resolution::Domain("https://example.com".to_string())
        );
        assert_eq!(
            resolver.resolve("sub.example.com/path"),
            Resolution::Domain("https://sub.example.com/path".to_string())
        );
    }

    #[test]
    fn test_search_query() {
        let resolver = InputResolver::new();
        assert_eq!(
            resolver.resolve("weather today"),
            Resolution::Search("https://www.google.com/search?q=weather%20today".to_string())
        );
        // A dot does not save an input containing whitespace.
        assert_eq!(
            resolver.resolve("what is example.com"),
            Resolution::Search(
                "https://www.google.com/search?q=what%20is%20example.com".to_string()
            )
        );
    }

    #[test]
    fn test_custom_template() {
        let resolver =
            InputResolver::with_search_engine("https://duckduckgo.com/?q=%s".to_string());
        assert_eq!(
            resolver.resolve("rust browser"),
            Resolution::Search("https://duckduckgo.com/?q=rust%20browser".to_string())
        );
    }

    #[test]
    fn test_empty_input() {
        let resolver = InputResolver::new();
        assert_eq!(
            resolver.resolve("   "),
            Resolution::Url("about:blank".to_string())
        );
    }

    #[test]
    fn test_unrecognized_scheme_falls_through() {
        let resolver = InputResolver::new();
        // Parses as a URL with scheme "weird" but the scheme is not
        // recognized, and it has no dot or space, so it is a search.
        assert!(matches!(
            resolver.resolve("weird:thing"),
            Resolution::Search(_)
        ));
    }

    #[test]
    fn test_into_load_url() {
        assert_eq!(
            Resolution::Internal("/history".to_string()).into_load_url("app://ui/index.html"),
            "app://ui/index.html#/history?mode=embedded"
        );
        assert_eq!(
            Resolution::Url("https://x.test".to_string()).into_load_url("unused"),
            "https://x.test"
        );
    }
}
