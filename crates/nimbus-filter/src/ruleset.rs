//! The shared filtering policy
//!
//! Blocked domains come from prebuilt ABP-style lists (`||domain^`
//! entries). The allow-list names domains critical to site
//! functionality (media, auth, CDN) that must never be blocked, and
//! the bypass patterns are checked before the rule walk runs at all.

use std::collections::HashSet;
use url::Url;

use crate::error::FilterError;
use crate::Result;

/// Domains that must never be blocked, whatever the lists say.
const ALLOW_DOMAINS: &[&str] = &[
    // Video / media
    "youtube.com",
    "googlevideo.com",
    "ytimg.com",
    "ggpht.com",
    // Google infrastructure many sites depend on
    "google.com",
    "gstatic.com",
    "googleusercontent.com",
    "googleapis.com",
    "apis.google.com",
    // Auth backends
    "firebaseapp.com",
    "firebaseio.com",
    "firebase.google.com",
];

/// URL substrings permitted through before the filtering engine runs.
const BYPASS_PATTERNS: &[&str] = &[
    "youtube.com/",
    "googlevideo.com/",
    "ytimg.com/",
    "ggpht.com/",
    "googleapis.com/",
    "firebaseapp.com/",
    "firebaseio.com/",
];

pub struct FilterRuleset {
    blocked_domains: HashSet<String>,
    allow_domains: HashSet<String>,
    bypass_patterns: Vec<String>,
}

impl FilterRuleset {
    /// Fetch and parse the configured lists. Called at most once per
    /// process lifetime by the binder.
    pub async fn fetch(client: &reqwest::Client, list_urls: &[String]) -> Result<Self> {
        if list_urls.is_empty() {
            return Err(FilterError::NoSources);
        }

        let mut blocked_domains = HashSet::new();
        for list_url in list_urls {
            let resp = client.get(list_url).send().await?;
            if !resp.status().is_success() {
                return Err(FilterError::Status(resp.status().as_u16()));
            }
            let text = resp.text().await?;
            parse_abp_domains(&text, &mut blocked_domains);
        }

        tracing::info!(
            domains = blocked_domains.len(),
            lists = list_urls.len(),
            "Filter ruleset loaded"
        );

        Ok(Self::from_domains(blocked_domains))
    }

    /// Build a ruleset from an already-parsed domain set (tests, or a
    /// host that ships its lists offline).
    pub fn from_domains<I>(domains: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            blocked_domains: domains.into_iter().map(|d| d.to_lowercase()).collect(),
            allow_domains: ALLOW_DOMAINS.iter().map(|s| s.to_string()).collect(),
            bypass_patterns: BYPASS_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse one raw list body into this ruleset's blocked set.
    pub fn from_list_text(text: &str) -> Self {
        let mut domains = HashSet::new();
        parse_abp_domains(text, &mut domains);
        Self::from_domains(domains)
    }

    pub fn blocked_domain_count(&self) -> usize {
        self.blocked_domains.len()
    }

    /// Pre-filter bypass: these URLs are always permitted through
    /// before the engine runs.
    pub fn is_bypassed(&self, url: &str) -> bool {
        self.bypass_patterns.iter().any(|p| url.contains(p.as_str()))
    }

    /// Whether the URL's host (or any parent domain) is allow-listed.
    pub fn is_allow_listed(&self, url: &str) -> bool {
        host_of(url)
            .map(|host| self.walk_parents(&host, &self.allow_domains))
            .unwrap_or(false)
    }

    /// The policy decision for one request URL.
    pub fn should_block(&self, url: &str) -> bool {
        if self.is_bypassed(url) || self.is_allow_listed(url) {
            return false;
        }

        host_of(url)
            .map(|host| self.walk_parents(&host, &self.blocked_domains))
            .unwrap_or(false)
    }

    fn walk_parents(&self, host: &str, set: &HashSet<String>) -> bool {
        let parts: Vec<&str> = host.split('.').collect();
        for i in 0..parts.len() {
            if set.contains(&parts[i..].join(".")) {
                return true;
            }
        }
        false
    }
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

fn parse_abp_domains(list: &str, out: &mut HashSet<String>) {
    for raw in list.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('!') || line.starts_with('[') {
            continue;
        }
        // Exception rules carry their own syntax; the allow-list here
        // is ours, not the list's.
        if line.starts_with("@@") {
            continue;
        }

        let Some(rest) = line.strip_prefix("||") else {
            continue;
        };

        let mut end = rest.len();
        for (idx, ch) in rest.char_indices() {
            if ch == '^' || ch == '/' || ch == '$' {
                end = idx;
                break;
            }
        }

        let domain = rest[..end].trim_matches('.');
        if domain.is_empty() || !domain.contains('.') {
            continue;
        }
        if domain.contains('*') || domain.contains('|') || domain.contains('%') {
            continue;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
        {
            continue;
        }

        out.insert(domain.to_lowercase());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_abp_list() {
        let list = "\
! Title: sample list
[Adblock Plus 2.0]
||tracker.test^
||ads.example.com^$third-party
||cdn.bad.test/banner
@@||friendly.test^
||*wild.test^
not-a-rule.test
";
        let ruleset = FilterRuleset::from_list_text(list);
        assert_eq!(ruleset.blocked_domain_count(), 3);
        assert!(ruleset.should_block("https://tracker.test/pixel.gif"));
        assert!(ruleset.should_block("https://ads.example.com/x.js"));
        assert!(ruleset.should_block("https://cdn.bad.test/anything"));
        assert!(!ruleset.should_block("https://friendly.test/"));
    }

    #[test]
    fn test_parent_domain_walk() {
        let ruleset = FilterRuleset::from_domains(["tracker.test".to_string()]);
        assert!(ruleset.should_block("https://sub.tracker.test/a"));
        assert!(ruleset.should_block("https://deep.sub.tracker.test/a"));
        assert!(!ruleset.should_block("https://nottracker.test/a"));
    }

    #[test]
    fn test_allow_list_beats_block_list() {
        // Even a list entry for an allow-listed domain never blocks.
        let ruleset = FilterRuleset::from_domains(["youtube.com".to_string()]);
        assert!(ruleset.is_allow_listed("https://www.youtube.com/watch?v=x"));
        assert!(!ruleset.should_block("https://www.youtube.com/watch?v=x"));
    }

    #[test]
    fn test_bypass_patterns() {
        let ruleset = FilterRuleset::from_domains(["googlevideo.com".to_string()]);
        assert!(ruleset.is_bypassed("https://r3---sn.googlevideo.com/videoplayback"));
        assert!(!ruleset.should_block("https://r3---sn.googlevideo.com/videoplayback"));
        assert!(!ruleset.is_bypassed("https://example.com/page"));
    }

    #[test]
    fn test_unparseable_url_not_blocked() {
        let ruleset = FilterRuleset::from_domains(["tracker.test".to_string()]);
        assert!(!ruleset.should_block("not a url"));
    }
}
