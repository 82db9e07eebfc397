use async_trait::async_trait;
use feed_rs::model::Entry;

use nb_core::{Error, FeedConfig, FeedSource, RawItem, Result};

/// Adapter for one syndicated feed endpoint (RSS or Atom).
pub struct RssFeedSource {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl RssFeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(feed: &FeedConfig) -> Self {
        Self::new(&feed.name, &feed.url)
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_items(&self) -> Result<Vec<RawItem>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Feed(format!("{}: request failed: {}", self.name, e)))?
            .error_for_status()
            .map_err(|e| Error::Feed(format!("{}: bad status: {}", self.name, e)))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Feed(format!("{}: body read failed: {}", self.name, e)))?;

        let feed = feed_rs::parser::parse(&bytes[..])
            .map_err(|e| Error::Feed(format!("{}: parse failed: {}", self.name, e)))?;

        Ok(feed.entries.into_iter().map(entry_to_raw).collect())
    }
}

fn entry_to_raw(entry: Entry) -> RawItem {
    RawItem {
        title: entry.title.map(|t| t.content),
        link: entry.links.first().map(|l| l.href.clone()),
        published_at: entry.published.or(entry.updated),
        content: entry.content.and_then(|c| c.body),
        snippet: entry
            .media
            .first()
            .and_then(|m| m.description.as_ref().map(|d| d.content.clone())),
        summary: entry.summary.map(|s| s.content),
    }
}
