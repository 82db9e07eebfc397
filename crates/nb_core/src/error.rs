use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Judge error: {0}")]
    Judge(String),

    #[error("Judge parse error: {0}")]
    JudgeParse(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
