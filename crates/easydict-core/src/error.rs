/// Failure of a backend command. The message is what ends up on an error card.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{0}")]
    Translate(String),

    #[error("{0}")]
    Capture(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("TTS error: {0}")]
    Speech(String),

    #[error("Request timed out after {0} s")]
    Timeout(u64),

    #[error("Task error: {0}")]
    Task(String),
}
