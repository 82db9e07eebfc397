use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One configured feed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
}

/// Scoring rubric handed to the judge with every batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    /// The narrow topic the digest covers.
    pub topic: String,
    /// Areas the judge should prioritize.
    pub focus: Vec<String>,
    /// Areas the judge should ignore even when superficially related.
    pub ignore: Vec<String>,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            topic: "technology and industry news".to_string(),
            focus: vec![],
            ignore: vec![],
        }
    }
}

/// Process-wide configuration, read once at startup and immutable for
/// the duration of a run. Constructed from the environment and passed
/// explicitly into the pipeline entry point.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub feeds: Vec<FeedConfig>,
    pub max_articles_per_feed: usize,
    pub lookback_hours: i64,
    pub min_relevance_score: u8,
    pub max_articles_in_brief: usize,
    pub batch_size: usize,
    pub batch_delay_secs: u64,
    /// Case-insensitive substrings; empty disables the pre-filter.
    pub keywords: Vec<String>,
    pub rubric: Rubric,
    pub sender: String,
    pub recipient: String,
    pub judge_api_key: Option<String>,
    pub mail_api_key: Option<String>,
    pub trigger_token: Option<String>,
}

impl PipelineConfig {
    /// Read every setting from the environment. Fails fast on a missing
    /// feed list or recipient rather than producing an empty digest later.
    pub fn from_env() -> Result<Self> {
        let feeds = parse_feed_list(&require_env("NEWSBRIEF_FEEDS")?)?;
        let recipient = require_env("NEWSBRIEF_RECIPIENT")?;

        Ok(Self {
            feeds,
            max_articles_per_feed: env_or("NEWSBRIEF_MAX_PER_FEED", 10)?,
            lookback_hours: env_or("NEWSBRIEF_LOOKBACK_HOURS", 24)?,
            min_relevance_score: env_or("NEWSBRIEF_MIN_SCORE", 7)?,
            max_articles_in_brief: env_or("NEWSBRIEF_MAX_ARTICLES", 12)?,
            batch_size: env_or("NEWSBRIEF_BATCH_SIZE", 5)?,
            batch_delay_secs: env_or("NEWSBRIEF_BATCH_DELAY_SECS", 2)?,
            keywords: parse_list(env::var("NEWSBRIEF_KEYWORDS").unwrap_or_default()),
            rubric: Rubric {
                topic: env::var("NEWSBRIEF_TOPIC")
                    .unwrap_or_else(|_| Rubric::default().topic),
                focus: parse_list(env::var("NEWSBRIEF_FOCUS").unwrap_or_default()),
                ignore: parse_list(env::var("NEWSBRIEF_IGNORE").unwrap_or_default()),
            },
            sender: env::var("NEWSBRIEF_SENDER")
                .unwrap_or_else(|_| "News Brief <onboarding@resend.dev>".to_string()),
            recipient,
            judge_api_key: env::var("GEMINI_API_KEY").ok(),
            mail_api_key: env::var("RESEND_API_KEY").ok(),
            trigger_token: env::var("NEWSBRIEF_TRIGGER_TOKEN").ok(),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} must be set", key))),
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value))),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated list, trimming and dropping empty entries.
fn parse_list(raw: String) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse the feed list: comma-separated entries, each either `name|url`
/// or a bare URL (the host becomes the name).
pub fn parse_feed_list(raw: &str) -> Result<Vec<FeedConfig>> {
    let mut feeds = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let feed = match entry.split_once('|') {
            Some((name, url)) => FeedConfig {
                name: name.trim().to_string(),
                url: url.trim().to_string(),
            },
            None => FeedConfig {
                name: url::Url::parse(entry)
                    .ok()
                    .and_then(|u| u.host_str().map(|h| h.to_string()))
                    .unwrap_or_else(|| entry.to_string()),
                url: entry.to_string(),
            },
        };
        if feed.url.is_empty() {
            return Err(Error::Config(format!("Invalid feed entry: {}", entry)));
        }
        feeds.push(feed);
    }
    if feeds.is_empty() {
        return Err(Error::Config("NEWSBRIEF_FEEDS contains no feeds".to_string()));
    }
    Ok(feeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feed_list_named_and_bare() {
        let feeds = parse_feed_list(
            "Example|https://example.com/rss, https://news.test.org/feed.xml",
        )
        .unwrap();
        assert_eq!(feeds.len(), 2);
        assert_eq!(feeds[0].name, "Example");
        assert_eq!(feeds[0].url, "https://example.com/rss");
        assert_eq!(feeds[1].name, "news.test.org");
    }

    #[test]
    fn test_parse_feed_list_rejects_empty() {
        assert!(parse_feed_list("").is_err());
        assert!(parse_feed_list(" , ,").is_err());
        assert!(parse_feed_list("broken|").is_err());
    }

    #[test]
    fn test_parse_list_trims_and_drops_empties() {
        let list = parse_list("hemp, beverage , ,thc".to_string());
        assert_eq!(list, vec!["hemp", "beverage", "thc"]);
    }
}
