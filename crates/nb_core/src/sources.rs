use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;

/// One item as it came off the wire, before normalization. Every field
/// is optional; the normalizer applies the fallback rules.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub content: Option<String>,
    pub snippet: Option<String>,
    pub summary: Option<String>,
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Display name of the feed, recorded on every article it yields.
    fn name(&self) -> &str;

    /// Fetch and parse the feed endpoint. A failure here is scoped to
    /// this one feed and must not abort the run.
    async fn fetch_items(&self) -> Result<Vec<RawItem>>;
}
