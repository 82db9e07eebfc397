pub mod models;
pub mod parse;
pub mod prompt;

pub use models::{create_judge, DummyJudge, GeminiJudge};
pub use parse::{parse_verdicts, Verdict};
pub use prompt::build_prompt;
