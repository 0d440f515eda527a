use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Invalid decoder name: {0}")]
    InvalidDecoderName(String),

    #[error("Decoder not found: {name} (no catalog entry at {})", .path.display())]
    DecoderNotFound { name: String, path: PathBuf },

    #[error("Decode failed: {0}")]
    DecodeFailure(String),

    #[error("Decoder {name} timed out after {timeout_ms} ms")]
    DecodeTimeout { name: String, timeout_ms: u64 },
}

pub type DomainResult<T> = Result<T, DomainError>;
