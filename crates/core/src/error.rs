//! Error types for building and reading slide decks.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, writing or reading a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The deck definition breaks a structural rule.
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    /// An image file exists but its format is not one PPTX can embed.
    #[error("Unsupported image '{path}': {reason}")]
    UnsupportedImage { path: String, reason: String },

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML generation or parsing error.
    #[error("XML error: {0}")]
    XmlError(String),

    /// The package is missing a part or has a malformed one.
    #[error("Invalid or corrupted package: {0}")]
    CorruptedFile(String),

    /// Deck definition could not be (de)serialized.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
