use async_trait::async_trait;

use crate::Result;

/// The external relevance judge: one textual prompt in, one textual
/// response out. The caller owns prompt construction and defensive
/// parsing of whatever comes back.
#[async_trait]
pub trait Judge: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String>;
}
