use async_trait::async_trait;

use crate::Result;

/// Outbound mail collaborator. Fire-and-forget from the pipeline's
/// point of view; delivery confirmation is not consumed.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, from: &str, to: &str, subject: &str, body: &str) -> Result<()>;
}
