//! Error types for camera diagnostics

use thiserror::Error;

/// Errors from endpoint parsing and probing
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid camera URL: {0}")]
    InvalidUrl(String),

    #[error("Camera URL has no host")]
    MissingHost,
}

pub type ProbeResult<T> = Result<T, ProbeError>;
