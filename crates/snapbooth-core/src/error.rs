//! Error types for SnapBooth

use thiserror::Error;

/// Main error type for SnapBooth operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Player session closed: renderer is gone")]
    SessionClosed,

    #[error("Player is not playing")]
    NotPlaying,

    #[error("Timed out waiting for frame from renderer")]
    CaptureTimeout,

    #[error("Frame capture failed: {0}")]
    Capture(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Image encoding error: {0}")]
    Encode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using SnapBooth's Error
pub type Result<T> = std::result::Result<T, Error>;
