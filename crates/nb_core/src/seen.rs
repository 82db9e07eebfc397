use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::Result;

/// Optional cross-run dedup store. When injected into the pipeline,
/// links surfaced in earlier runs are dropped and digest members are
/// marked after a successful send. Without it, dedup is per-run only.
#[async_trait]
pub trait SeenStore: Send + Sync {
    async fn is_seen(&self, link: &str) -> Result<bool>;

    async fn mark_seen(&self, link: &str) -> Result<()>;
}

/// In-memory store; enough for tests and a long-lived serve process.
#[derive(Debug, Default)]
pub struct MemorySeenStore {
    links: Mutex<HashSet<String>>,
}

impl MemorySeenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeenStore for MemorySeenStore {
    async fn is_seen(&self, link: &str) -> Result<bool> {
        Ok(self.links.lock().unwrap().contains(link))
    }

    async fn mark_seen(&self, link: &str) -> Result<()> {
        self.links.lock().unwrap().insert(link.to_string());
        Ok(())
    }
}
