//! Input buffers and document-level metadata.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detect::MediaType;
use crate::error::{Error, Result};

/// An uploaded resume: raw bytes plus the media type the caller declared.
///
/// The engine only ever borrows it.
#[derive(Debug, Clone)]
pub struct RawDocument {
    data: Vec<u8>,
    declared: Option<MediaType>,
    source: Option<PathBuf>,
}

impl RawDocument {
    /// Wrap bytes with a declared media type.
    pub fn new(data: impl Into<Vec<u8>>, media_type: MediaType) -> Self {
        Self {
            data: data.into(),
            declared: Some(media_type),
            source: None,
        }
    }

    /// Wrap bytes whose type must be sniffed.
    pub fn undeclared(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            declared: None,
            source: None,
        }
    }

    /// Read a file fully; the extension becomes the declared type when recognised.
    ///
    /// The file handle is released before this returns.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Ok(Self {
            data,
            declared: MediaType::from_path(path).ok(),
            source: Some(path.to_path_buf()),
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn declared(&self) -> Option<MediaType> {
        self.declared
    }

    /// Path the bytes were read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Metadata reported by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Number of pages (1 for flow documents).
    pub page_count: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub created: Option<DateTime<Utc>>,
}
