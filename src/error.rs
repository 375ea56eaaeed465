//! Error types for cvparse library.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cvparse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while turning a resume into a profile.
///
/// Decoder libraries (lopdf, zip, quick-xml) never leak through this type:
/// their failures are folded into [`Error::CorruptDocument`] or
/// [`Error::Encrypted`] at the decoder boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The media type is neither a page-description nor a flow document we can decode.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The decoder could not read the document (malformed, truncated, image-only).
    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    /// The document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Invalid dictionary or option configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// The tagged failure kind reported to callers.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::FileNotFound(_) => FailureKind::FileNotFound,
            Error::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
            Error::CorruptDocument(_) | Error::Encrypted => FailureKind::CorruptDocument,
            Error::Io(e) if e.kind() == io::ErrorKind::NotFound => FailureKind::FileNotFound,
            Error::Io(_) => FailureKind::CorruptDocument,
            Error::Config(_) | Error::Render(_) => FailureKind::Other,
        }
    }

    /// Convert into the serializable `{ kind, message }` failure record.
    pub fn to_failure(&self) -> Failure {
        Failure::from(self)
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::CorruptDocument(format!("PDF: {}", err)),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::CorruptDocument(format!("DOCX container: {}", err))
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::CorruptDocument(format!("DOCX XML: {}", err))
    }
}

/// Category of a hard parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// Media type not decodable.
    UnsupportedFormat,
    /// Input path does not exist.
    FileNotFound,
    /// Decoder-level failure (encrypted, malformed, no extractable text).
    CorruptDocument,
    /// Failures outside the parse path (configuration, rendering).
    Other,
}

/// Tagged failure handed across the engine boundary instead of a raw error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&Error> for Failure {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        Failure::from(&err)
    }
}
