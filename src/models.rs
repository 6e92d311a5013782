//! Data models and structures
//!
//! Defines the Qiita API item shapes and the environment configuration.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<String>,
}

/// An article as returned by `/api/v2/authenticated_user/items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub url: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub rendered_body: String,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub private: bool,
}

impl Item {
    /// Creation date in the item's own UTC offset, `YYYY-MM-DD`.
    pub fn date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }

    /// Page slug; also the name of the article's output directory.
    pub fn slug(&self) -> String {
        format!("qiita-{}", self.id)
    }

    /// Reject ids that could not be a single path segment. Qiita ids are
    /// hex strings; anything beyond ASCII letters, digits, `-` and `_`
    /// (a `/`, `\` or `..` in particular) would let the slug escape the
    /// content directory.
    pub fn validate_id(&self) -> crate::Result<()> {
        let valid = !self.id.is_empty()
            && self
                .id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(crate::Error::Api(format!("Invalid item id '{}'", self.id)))
        }
    }

    /// Tag names as a comma-separated list of quoted strings, ready for a
    /// TOML array.
    pub fn all_tags(&self) -> String {
        self.tags
            .iter()
            .map(|tag| serde_json::Value::String(tag.name.clone()).to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One page of items plus the `Total-Count` the API reported alongside it.
#[derive(Debug, Clone)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total_count: usize,
}

impl ItemPage {
    /// Whether another page follows page number `page` (1-based).
    pub fn has_next(&self, page: usize, per_page: usize) -> bool {
        !self.items.is_empty() && page.saturating_mul(per_page) < self.total_count
    }
}

pub const DEFAULT_QIITA_BASE_URL: &str = "https://qiita.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub qiita_token: String,
    pub qiita_base_url: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let http_timeout = match std::env::var("QIITA_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                crate::Error::Config(format!(
                    "QIITA_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            qiita_token: std::env::var("QIITA_TOKEN")
                .map_err(|_| crate::Error::Config("QIITA_TOKEN not set".to_string()))?,
            qiita_base_url: std::env::var("QIITA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_QIITA_BASE_URL.to_string()),
            http_timeout: Duration::from_secs(http_timeout),
        })
    }
}
