use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use nb_core::{AnalyzedArticle, Article, Judge, Result, Rubric};
use nb_judge::{build_prompt, parse_verdicts};

/// Batches articles through the judge, enforcing the relevance threshold
/// locally and isolating per-batch failures.
pub struct RelevanceAnalyzer {
    judge: Arc<dyn Judge>,
    rubric: Rubric,
    min_score: u8,
    batch_size: usize,
    batch_delay: Duration,
}

impl RelevanceAnalyzer {
    pub fn new(
        judge: Arc<dyn Judge>,
        rubric: Rubric,
        min_score: u8,
        batch_size: usize,
        batch_delay: Duration,
    ) -> Self {
        Self {
            judge,
            rubric,
            min_score,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    /// Run every batch through the judge in sequence, pausing between
    /// batches to respect the judge's rate limits. A batch that fails in
    /// transport or parsing contributes nothing; the rest still run.
    pub async fn analyze(&self, articles: &[Article]) -> Vec<AnalyzedArticle> {
        let batches: Vec<&[Article]> = articles.chunks(self.batch_size).collect();
        let total = batches.len();
        let mut results = Vec::new();

        for (i, batch) in batches.iter().enumerate() {
            match self.analyze_batch(batch).await {
                Ok(mut analyzed) => {
                    debug!("🤖 Batch {}/{}: kept {} of {}", i + 1, total, analyzed.len(), batch.len());
                    results.append(&mut analyzed);
                }
                Err(e) => warn!("⚠️ Batch {}/{} failed, skipping: {}", i + 1, total, e),
            }
            if i + 1 < total {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        results
    }

    async fn analyze_batch(&self, batch: &[Article]) -> Result<Vec<AnalyzedArticle>> {
        let prompt = build_prompt(&self.rubric, self.min_score, batch);
        let response = self.judge.complete(&prompt).await?;
        let verdicts = parse_verdicts(&response)?;

        // The threshold is enforced here, not trusted from the judge: a
        // record it forgot to mark skip but scored low is still dropped.
        Ok(verdicts
            .into_iter()
            .filter(|v| !v.skip && v.score >= i64::from(self.min_score))
            .map(|v| v.into_article())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use nb_core::Error;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Returns one scripted response (or error) per call, in order.
    struct ScriptedJudge {
        responses: Mutex<VecDeque<Result<String>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedJudge {
        fn new(responses: Vec<Result<String>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Judge for ScriptedJudge {
        fn name(&self) -> &str {
            "Scripted"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.calls.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Judge("script exhausted".to_string())))
        }
    }

    fn article(link: &str) -> Article {
        Article {
            title: format!("Story {}", link),
            link: link.to_string(),
            published_at: Utc::now(),
            content: "body".to_string(),
            source: "test".to_string(),
        }
    }

    fn analyzer(judge: Arc<dyn Judge>, batch_size: usize) -> RelevanceAnalyzer {
        RelevanceAnalyzer::new(judge, Rubric::default(), 7, batch_size, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_skip_and_threshold_are_enforced_locally() {
        // Judge marks one skip and scores another 6 without the skip flag;
        // both must be dropped, only the 8 survives.
        let judge = ScriptedJudge::new(vec![Ok(r#"[
            {"score": 4, "skip": true},
            {"score": 8, "title": "Keeper", "url": "http://a.com/keep"},
            {"score": 6, "skip": false, "title": "Sneaky", "url": "http://a.com/sneak"}
        ]"#
        .to_string())]);

        let articles = vec![
            article("http://a.com/skip"),
            article("http://a.com/keep"),
            article("http://a.com/sneak"),
        ];
        let analyzed = analyzer(judge, 5).analyze(&articles).await;
        assert_eq!(analyzed.len(), 1);
        assert_eq!(analyzed[0].url, "http://a.com/keep");
        assert_eq!(analyzed[0].score, 8);
    }

    #[tokio::test]
    async fn test_failed_batch_does_not_abort_the_rest() {
        let judge = ScriptedJudge::new(vec![
            Err(Error::Judge("rate limited".to_string())),
            Ok(r#"[{"score": 9, "title": "B", "url": "http://a.com/b"}]"#.to_string()),
        ]);

        let articles = vec![article("http://a.com/a"), article("http://a.com/b")];
        let analyzed = analyzer(judge.clone(), 1).analyze(&articles).await;
        assert_eq!(analyzed.len(), 1);
        assert_eq!(analyzed[0].url, "http://a.com/b");
        assert_eq!(judge.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unparseable_batch_is_isolated() {
        let judge = ScriptedJudge::new(vec![
            Ok("I would rather talk about the weather.".to_string()),
            Ok(r#"noise [{"score": 10, "title": "B", "url": "http://a.com/b"}] noise"#.to_string()),
        ]);

        let articles = vec![article("http://a.com/a"), article("http://a.com/b")];
        let analyzed = analyzer(judge, 1).analyze(&articles).await;
        assert_eq!(analyzed.len(), 1);
        assert_eq!(analyzed[0].score, 10);
    }

    #[tokio::test]
    async fn test_batching_splits_input() {
        let judge = ScriptedJudge::new(vec![
            Ok("[]".to_string()),
            Ok("[]".to_string()),
            Ok("[]".to_string()),
        ]);

        let articles: Vec<Article> = (0..5)
            .map(|i| article(&format!("http://a.com/{}", i)))
            .collect();
        analyzer(judge.clone(), 2).analyze(&articles).await;

        let calls = judge.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        // Last batch carries only the fifth article.
        assert!(calls[2].contains("http://a.com/4"));
        assert!(!calls[2].contains("http://a.com/3"));
    }
}
