//! Error types for labellink.

use thiserror::Error;

/// Storage backend errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Failed to access storage directory: {0}")]
    DirectoryAccess(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Agent-facing errors.
///
/// The display strings are part of the adapter's contract; callers match on
/// them across language boundaries, so they must not change.
#[derive(Debug, Error)]
pub enum AgentError {
    /// All request attempts failed; carries the last failure's message.
    #[error("{0}")]
    TransportExhausted(String),

    /// A call completed but produced no usable response body.
    #[error("Response is undefined")]
    EmptyResponse,

    /// Listing failed or returned nothing. Network failure and an empty
    /// printer list are deliberately indistinguishable here.
    #[error("No printers available or network error")]
    NoPrintersAvailable,

    /// The `default` reply had fewer lines than the protocol requires.
    #[error("Invalid printer data format")]
    InvalidPrinterFormat,

    /// Any other failure while looking up the default printer.
    #[error("No default printer found")]
    NoDefaultPrinter,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;
