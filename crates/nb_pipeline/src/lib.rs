pub mod analyzer;
pub mod filter;
pub mod rank;
pub mod render;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use nb_core::{
    Article, FeedSource, Judge, Mailer, PipelineConfig, Result, RunStatus, RunSummary, SeenStore,
};

pub use analyzer::RelevanceAnalyzer;
pub use filter::{keyword_filter, matches_keywords, window_and_dedup};
pub use rank::rank;
pub use render::render_digest;

/// The end-to-end run: fetch, filter, judge, rank, render, mail.
pub struct Pipeline {
    config: PipelineConfig,
    sources: Vec<Box<dyn FeedSource>>,
    judge: Arc<dyn Judge>,
    mailer: Arc<dyn Mailer>,
    seen: Option<Arc<dyn SeenStore>>,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        sources: Vec<Box<dyn FeedSource>>,
        judge: Arc<dyn Judge>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            config,
            sources,
            judge,
            mailer,
            seen: None,
        }
    }

    /// Enable cross-run dedup. Links that made it into a digest are
    /// remembered and dropped from later runs.
    pub fn with_seen_store(mut self, seen: Arc<dyn SeenStore>) -> Self {
        self.seen = Some(seen);
        self
    }

    /// Execute one full run. Feed and judge failures degrade the run;
    /// only a mail failure (or total config breakage) errors it.
    pub async fn run(&self) -> Result<RunSummary> {
        let now = Utc::now();
        info!("🚀 Starting run with {} feed(s)", self.sources.len());

        let articles =
            nb_feeds::fetch_all(&self.sources, self.config.max_articles_per_feed).await;
        let fetched = articles.len();

        let cutoff = now - chrono::Duration::hours(self.config.lookback_hours);
        let articles = window_and_dedup(articles, cutoff);
        let articles = self.drop_previously_seen(articles).await;
        let articles = keyword_filter(&self.config.keywords, articles);
        let filtered = articles.len();
        info!("🔍 {} of {} article(s) passed the filters", filtered, fetched);

        if articles.is_empty() {
            return Ok(self.no_articles(
                fetched,
                filtered,
                0,
                "no articles within the lookback window matched the filters",
            ));
        }

        let analyzer = RelevanceAnalyzer::new(
            self.judge.clone(),
            self.config.rubric.clone(),
            self.config.min_relevance_score,
            self.config.batch_size,
            Duration::from_secs(self.config.batch_delay_secs),
        );
        let analyzed = analyzer.analyze(&articles).await;
        let analyzed_count = analyzed.len();
        info!(
            "🤖 {} of {} article(s) judged relevant",
            analyzed_count, filtered
        );

        if analyzed.is_empty() {
            return Ok(self.no_articles(
                fetched,
                filtered,
                0,
                "the judge scored no article at or above the relevance threshold",
            ));
        }

        let ranked = rank(analyzed, self.config.max_articles_in_brief);
        let digest = render_digest(&ranked, now);
        let subject = format!("News brief — {}", now.format("%Y-%m-%d"));

        self.mailer
            .send(&self.config.sender, &self.config.recipient, &subject, &digest)
            .await?;

        if let Some(seen) = &self.seen {
            for article in &ranked {
                if let Err(e) = seen.mark_seen(&article.url).await {
                    warn!("⚠️ Could not record {} as seen: {}", article.url, e);
                }
            }
        }

        info!("✅ Run complete: {} article(s) in the digest", ranked.len());
        Ok(RunSummary {
            fetched,
            filtered,
            analyzed: analyzed_count,
            selected: ranked.len(),
            status: RunStatus::DigestSent,
        })
    }

    async fn drop_previously_seen(&self, articles: Vec<Article>) -> Vec<Article> {
        let Some(seen) = &self.seen else {
            return articles;
        };
        let mut kept = Vec::with_capacity(articles.len());
        for article in articles {
            // A store lookup failure leaves the article in rather than
            // silently dropping news.
            if !seen.is_seen(&article.link).await.unwrap_or(false) {
                kept.push(article);
            }
        }
        kept
    }

    fn no_articles(
        &self,
        fetched: usize,
        filtered: usize,
        analyzed: usize,
        reason: &str,
    ) -> RunSummary {
        info!("📭 No digest today: {}", reason);
        RunSummary {
            fetched,
            filtered,
            analyzed,
            selected: 0,
            status: RunStatus::NoArticles {
                reason: reason.to_string(),
            },
        }
    }
}
