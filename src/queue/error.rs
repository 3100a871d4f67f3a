use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("could not reach the queue: {0}")]
    Unavailable(String),

    #[error("queue rejected the job with status {0}")]
    BadStatusCode(u16),

    #[error("malformed queue response: {0}")]
    MalformedResponse(String),

    #[error("could not serialize job: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for QueueError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e.to_string())
    }
}

impl From<serde_json::Error> for QueueError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
