use std::io;
use thiserror::Error;

/// Result type for encoder operations
pub type SpxResult<T> = Result<T, SpxError>;

/// Error types for the container encoder
#[derive(Error, Debug)]
pub enum SpxError {
    /// IO error from the output sink (file operations, disk access)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Codec capability rejected a frame
    #[error("Encode error: {0}")]
    Encode(String),

    /// Sample rate outside the supported range
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The rejected sample rate
        rate: u32,
    },

    /// Invalid channel configuration
    #[error("Invalid channel configuration: expected {expected}, got {got}")]
    InvalidChannels {
        /// Expected number of channels
        expected: u32,
        /// Got number of channels
        got: u32,
    },

    /// Configuration rejected at open
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stream protocol misuse (submit after close, data before headers)
    #[error("Stream error: {0}")]
    Stream(String),
}

impl From<hound::Error> for SpxError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => SpxError::Io(e),
            e => SpxError::Config(e.to_string()),
        }
    }
}
