use std::sync::Arc;

use nb_core::{Error, Judge, Result};

pub mod dummy;
pub mod gemini;

pub use dummy::DummyJudge;
pub use gemini::GeminiJudge;

/// Pick a judge implementation by name.
/// Available judges: gemini (default), dummy.
pub fn create_judge(name: &str, api_key: Option<String>) -> Result<Arc<dyn Judge>> {
    match name {
        "gemini" => {
            let key = api_key.ok_or_else(|| {
                Error::Config("GEMINI_API_KEY is required for the gemini judge".to_string())
            })?;
            Ok(Arc::new(GeminiJudge::new(key)))
        }
        "dummy" => Ok(Arc::new(DummyJudge)),
        other => Err(Error::Config(format!("Unknown judge: {}", other))),
    }
}
