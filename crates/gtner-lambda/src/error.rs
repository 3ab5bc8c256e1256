use gtner_core::GtnerError;
use gtner_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the conversion handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The event carries no records.
    #[error("event has no records")]
    NoRecords,

    /// An object key in the event is not valid percent-encoded UTF-8.
    #[error("invalid object key {0:?}")]
    InvalidKey(String),

    /// The manifest object is not UTF-8 text.
    #[error("manifest is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The manifest could not be converted.
    #[error(transparent)]
    Convert(#[from] GtnerError),

    /// Reading, writing or tagging an object failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for handler operations.
pub type Result<T> = std::result::Result<T, HandlerError>;
