use chrono::Utc;
use tracing::{info, warn};

use nb_core::{Article, FeedSource};

pub mod normalize;
pub mod rss;

pub use rss::RssFeedSource;

/// Fetch every configured feed, taking at most `max_per_feed` items from
/// each. A feed that fails to fetch or parse is logged and skipped; the
/// other feeds still contribute.
pub async fn fetch_all(sources: &[Box<dyn FeedSource>], max_per_feed: usize) -> Vec<Article> {
    let mut articles = Vec::new();
    for source in sources {
        match source.fetch_items().await {
            Ok(items) => {
                let fetched_at = Utc::now();
                let taken = items.len().min(max_per_feed);
                articles.extend(
                    items
                        .into_iter()
                        .take(max_per_feed)
                        .map(|raw| normalize::normalize(raw, source.name(), fetched_at)),
                );
                info!("📰 {}: {} item(s)", source.name(), taken);
            }
            Err(e) => {
                warn!("⚠️ Feed {} unavailable, skipping: {}", source.name(), e);
            }
        }
    }
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nb_core::{Error, RawItem, Result};

    struct StaticSource {
        name: &'static str,
        items: Vec<RawItem>,
    }

    struct BrokenSource;

    #[async_trait]
    impl FeedSource for StaticSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch_items(&self) -> Result<Vec<RawItem>> {
            Ok(self.items.clone())
        }
    }

    #[async_trait]
    impl FeedSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        async fn fetch_items(&self) -> Result<Vec<RawItem>> {
            Err(Error::Feed("broken: connection refused".to_string()))
        }
    }

    fn item(link: &str) -> RawItem {
        RawItem {
            title: Some(format!("Story at {}", link)),
            link: Some(link.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_failed_feed_does_not_abort_the_run() {
        let sources: Vec<Box<dyn FeedSource>> = vec![
            Box::new(StaticSource {
                name: "one",
                items: vec![item("http://one.com/a")],
            }),
            Box::new(BrokenSource),
            Box::new(StaticSource {
                name: "three",
                items: vec![item("http://three.com/a"), item("http://three.com/b")],
            }),
        ];

        let articles = fetch_all(&sources, 10).await;
        assert_eq!(articles.len(), 3);
        assert!(articles.iter().any(|a| a.source == "one"));
        assert!(articles.iter().any(|a| a.source == "three"));
    }

    #[tokio::test]
    async fn test_per_feed_cap_is_positional() {
        let sources: Vec<Box<dyn FeedSource>> = vec![Box::new(StaticSource {
            name: "capped",
            items: vec![
                item("http://c.com/1"),
                item("http://c.com/2"),
                item("http://c.com/3"),
            ],
        })];

        let articles = fetch_all(&sources, 2).await;
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].link, "http://c.com/1");
        assert_eq!(articles[1].link, "http://c.com/2");
    }
}
