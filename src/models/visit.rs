//! Visit record data model.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Timestamp format used for every stored visit (local time, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder stored when a request carries no `User-Agent` header
pub const UNKNOWN_USER_AGENT: &str = "Unknown";

/// Browser and platform details parsed from a user agent string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub browser: String,
    pub browser_version: String,
    pub os: String,
    /// Device category reported by the parser (pc, smartphone, crawler, ...)
    pub category: String,
}

impl AgentSummary {
    /// Single-line form used in the text log, e.g. `Firefox 118.0 / Linux (pc)`
    pub fn display_line(&self) -> String {
        let browser = if self.browser_version.is_empty() {
            self.browser.clone()
        } else {
            format!("{} {}", self.browser, self.browser_version)
        };
        format!("{browser} / {} ({})", self.os, self.category)
    }

    /// Inverse of [`AgentSummary::display_line`]
    pub fn parse_line(line: &str) -> Option<Self> {
        let (browser_part, rest) = line.split_once(" / ")?;
        let (os, category) = rest.rsplit_once(" (")?;
        let category = category.strip_suffix(')')?;
        let (browser, browser_version) = match browser_part.rsplit_once(' ') {
            Some((name, version)) if version.chars().next().is_some_and(|c| c.is_ascii_digit()) => {
                (name.to_string(), version.to_string())
            }
            _ => (browser_part.to_string(), String::new()),
        };

        Some(Self {
            browser,
            browser_version,
            os: os.to_string(),
            category: category.to_string(),
        })
    }
}

/// One logged observation of an inbound request.
///
/// Records are created once per request and never mutated after they are
/// handed to the recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub timestamp: String,
    pub ip: String,
    pub method: String,
    pub path: String,
    pub url: String,
    #[serde(default)]
    pub referrer: Option<String>,
    pub user_agent: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub agent: Option<AgentSummary>,
}

impl VisitRecord {
    /// Create a new record stamped with the current local time
    pub fn new(
        ip: String,
        method: String,
        path: String,
        url: String,
        user_agent: Option<String>,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            ip,
            method,
            path,
            url,
            referrer: None,
            user_agent: user_agent.unwrap_or_else(|| UNKNOWN_USER_AGENT.to_string()),
            headers,
            location: None,
            agent: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_referrer(mut self, referrer: Option<String>) -> Self {
        self.referrer = referrer;
        self
    }

    /// Attach the geolocation result, if any
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn with_agent(mut self, agent: Option<AgentSummary>) -> Self {
        self.agent = agent;
        self
    }
}
