pub mod config;
pub mod error;
pub mod judge;
pub mod mail;
pub mod seen;
pub mod sources;
pub mod types;

pub use config::{FeedConfig, PipelineConfig, Rubric};
pub use error::{Error, Result};
pub use judge::Judge;
pub use mail::Mailer;
pub use seen::{MemorySeenStore, SeenStore};
pub use sources::{FeedSource, RawItem};
pub use types::{AnalyzedArticle, Article, RunStatus, RunSummary, Tag};

pub mod prelude {
    pub use crate::{AnalyzedArticle, Article, Error, Result, Tag};
}
