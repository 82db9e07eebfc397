use async_trait::async_trait;
use serde_json::json;

use nb_core::{Judge, Result};

/// Offline stand-in: emits a flat verdict for every article it can spot
/// in the prompt. Useful for smoke-testing the pipeline without a key.
#[derive(Debug, Default)]
pub struct DummyJudge;

#[async_trait]
impl Judge for DummyJudge {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut verdicts = Vec::new();
        let mut title = String::new();
        for line in prompt.lines() {
            if let Some(t) = line.strip_prefix("Title: ") {
                title = t.to_string();
            } else if let Some(url) = line.strip_prefix("URL: ") {
                verdicts.push(json!({
                    "score": 7,
                    "skip": false,
                    "title": title,
                    "summary": ["Stand-in summary; no judge was consulted."],
                    "whyMatters": "Dummy judge passes every candidate through.",
                    "tags": ["Technology"],
                    "url": url,
                }));
            }
        }
        Ok(serde_json::to_string(&verdicts)?)
    }
}
