pub mod client;
pub mod insights;
pub mod types;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Gemini API 키가 설정되지 않았습니다.")]
    MissingKey,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {detail}")]
    ApiError { status: u16, detail: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("empty completion")]
    EmptyCompletion,
}
