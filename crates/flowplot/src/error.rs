#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("unknown orientation: {value} (expected LR or TB)")]
    UnknownOrientation { value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
