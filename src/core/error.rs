use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdleError {
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IdleError>;
