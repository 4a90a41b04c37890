use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreSetError {
    #[error("duplicate label: {0:?}")]
    DuplicateLabel(String),
    #[error("non-finite score {score} for label {label:?}")]
    NonFiniteScore { label: String, score: f64 },
    #[error("invalid vocabulary JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreSetError>;
