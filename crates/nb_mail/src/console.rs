use async_trait::async_trait;
use tracing::info;

use nb_core::{Mailer, Result};

/// Logs the digest instead of delivering it. The default when no mail
/// API key is configured, and handy for local runs.
#[derive(Debug, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, _from: &str, to: &str, subject: &str, body: &str) -> Result<()> {
        info!("📧 (console) To: {} — {}", to, subject);
        println!("{}", body);
        Ok(())
    }
}
