use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Report must be a JSON object, got {kind}")]
    NotAnObject { kind: String },
}

pub type ReportResult<T> = Result<T, ReportError>;
