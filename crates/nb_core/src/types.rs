use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized feed item. Immutable once the normalizer builds it;
/// `link` is the dedup key within a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub content: String,
    pub source: String,
}

/// Category labels the judge may assign. The vocabulary is closed;
/// anything else coming back from the judge is dropped during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    Regulatory,
    Market,
    Jobs,
    Technology,
    Risk,
}

impl Tag {
    pub fn parse(s: &str) -> Option<Tag> {
        match s.trim().to_lowercase().as_str() {
            "regulatory" => Some(Tag::Regulatory),
            "market" => Some(Tag::Market),
            "jobs" => Some(Tag::Jobs),
            "technology" => Some(Tag::Technology),
            "risk" => Some(Tag::Risk),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tag::Regulatory => "Regulatory",
            Tag::Market => "Market",
            Tag::Jobs => "Jobs",
            Tag::Technology => "Technology",
            Tag::Risk => "Risk",
        }
    }
}

/// The judged form of an Article that survived filtering and scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedArticle {
    /// 1-10, already at or above the configured minimum.
    pub score: u8,
    pub title: String,
    /// Short bullet strings.
    pub summary: Vec<String>,
    pub why_matters: String,
    pub tags: Vec<Tag>,
    /// Echo of the source Article's link.
    pub url: String,
    /// Present only when the judge found a genuine actionable angle.
    pub opportunity: Option<String>,
}

impl AnalyzedArticle {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunStatus {
    /// The digest was rendered and handed to the mailer.
    DigestSent,
    /// Nothing survived filtering or analysis; no mail was sent.
    NoArticles { reason: String },
}

/// Structured outcome of one pipeline run, returned to the trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub fetched: usize,
    pub filtered: usize,
    pub analyzed: usize,
    pub selected: usize,
    pub status: RunStatus,
}
