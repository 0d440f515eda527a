use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("truncated payload: need {expected} bytes at offset {offset}, have {remaining}")]
    Truncated {
        offset: usize,
        expected: usize,
        remaining: usize,
    },

    #[error("unsupported Cayenne LPP type {0:#04x}")]
    UnsupportedType(u8),

    #[error("payload is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, PayloadError>;
