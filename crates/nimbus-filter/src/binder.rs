//! Per-session filter binding
//!
//! Attaches the shared policy to each network session exactly once and
//! keeps a block counter per session. The ruleset itself is fetched
//! lazily, the first time any session needs it, and never refetched:
//! a failed fetch is logged and filtering simply stays off for this
//! process.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use nimbus_surface::SessionId;

use crate::ruleset::FilterRuleset;
use crate::Result;

const FETCH_USER_AGENT: &str = "Mozilla/5.0 (Nimbus)";

pub struct SessionFilterBinder {
    ruleset: Option<Arc<FilterRuleset>>,
    fetch_attempted: bool,
    client: reqwest::Client,
    list_urls: Vec<String>,
    bound: HashSet<SessionId>,
    blocks: HashMap<SessionId, u64>,
}

impl SessionFilterBinder {
    pub fn new(list_urls: Vec<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(3))
            .timeout(Duration::from_secs(20))
            .user_agent(FETCH_USER_AGENT)
            .build()?;

        Ok(Self {
            ruleset: None,
            fetch_attempted: false,
            client,
            list_urls,
            bound: HashSet::new(),
            blocks: HashMap::new(),
        })
    }

    /// Build a binder around an already-loaded ruleset; no fetching
    /// will happen.
    pub fn with_ruleset(ruleset: FilterRuleset) -> Self {
        Self {
            ruleset: Some(Arc::new(ruleset)),
            fetch_attempted: true,
            client: reqwest::Client::new(),
            list_urls: Vec::new(),
            bound: HashSet::new(),
            blocks: HashMap::new(),
        }
    }

    /// Attach the filtering policy to a session. Idempotent: a session
    /// already bound is a no-op. Returns whether filtering is active
    /// for the session afterwards.
    pub async fn ensure_filtering(&mut self, session: &SessionId) -> bool {
        if self.bound.contains(session) {
            return true;
        }

        if self.ruleset.is_none() && !self.fetch_attempted {
            self.fetch_attempted = true;
            match FilterRuleset::fetch(&self.client, &self.list_urls).await {
                Ok(ruleset) => self.ruleset = Some(Arc::new(ruleset)),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load filter ruleset; filtering disabled");
                }
            }
        }

        if self.ruleset.is_none() {
            tracing::debug!(session = %session, "No ruleset; session left unfiltered");
            return false;
        }

        self.bound.insert(session.clone());
        self.blocks.insert(session.clone(), 0);

        tracing::info!(session = %session, "Filtering enabled for session");
        true
    }

    pub fn is_bound(&self, session: &SessionId) -> bool {
        self.bound.contains(session)
    }

    pub fn ruleset(&self) -> Option<&Arc<FilterRuleset>> {
        self.ruleset.as_ref()
    }

    /// Record a blocked request reported by the host. Returns the
    /// session's running count, or None when the session is unbound or
    /// the URL should never have been blocked (allow-listed or
    /// bypassed).
    pub fn record_blocked(&mut self, session: &SessionId, url: &str) -> Option<u64> {
        if !self.bound.contains(session) {
            return None;
        }
        if let Some(ruleset) = &self.ruleset {
            if ruleset.is_allow_listed(url) || ruleset.is_bypassed(url) {
                return None;
            }
        }

        let count = self.blocks.entry(session.clone()).or_insert(0);
        *count += 1;
        Some(*count)
    }

    /// Current count for a session; zero when never bound.
    pub fn block_count(&self, session: &SessionId) -> u64 {
        self.blocks.get(session).copied().unwrap_or(0)
    }
}
