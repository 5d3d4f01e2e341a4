use thiserror::Error;

/// Problems found while reading or validating the board layout
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("slot \"{0}\" accepts no card types")]
    NoAcceptedTypes(String),
    #[error("slot name \"{0}\" is used more than once")]
    DuplicateSlot(String),
    #[error("guide line refers to unknown slot \"{0}\"")]
    UnknownSlot(String),
    #[error("window size must be positive, got {0}x{1}")]
    BadWindowSize(f32, f32),
    #[error("malformed board layout: {0}")]
    Malformed(#[from] serde_json::Error),
}
