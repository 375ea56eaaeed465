//! Media type detection for resume documents.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The document families the engine can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Page-description document (positioned glyph runs).
    Pdf,
    /// Office Open XML word-processing document (flow text).
    Docx,
    /// Legacy binary Word document (OLE2 compound file).
    Doc,
}

impl MediaType {
    /// Whether the decoder yields positioned runs rather than a flat text stream.
    pub fn is_page_description(self) -> bool {
        matches!(self, MediaType::Pdf)
    }

    /// Canonical MIME string.
    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            MediaType::Doc => "application/msword",
        }
    }

    /// Parse a declared media type: a MIME string or a bare extension.
    pub fn from_declared(declared: &str) -> Result<Self> {
        let lower = declared.trim().trim_start_matches('.').to_ascii_lowercase();
        match lower.as_str() {
            "pdf" | "application/pdf" | "application/x-pdf" => Ok(MediaType::Pdf),
            "docx"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Ok(MediaType::Docx)
            }
            "doc" | "application/msword" => Ok(MediaType::Doc),
            _ => Err(Error::UnsupportedFormat(declared.to_string())),
        }
    }

    /// Media type from a file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(format!("{} has no extension", path.display())))?;
        Self::from_declared(ext)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaType::Pdf => "pdf",
            MediaType::Docx => "docx",
            MediaType::Doc => "doc",
        };
        f.write_str(name)
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// ZIP local file header.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE2 compound file signature.
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
/// Entry name every WordprocessingML package carries.
const DOCX_MARKER: &[u8] = b"word/";

/// Sniff the media type from leading bytes.
///
/// Returns `None` when the bytes match no supported family. A ZIP archive is
/// only reported as DOCX when a `word/` entry name appears in it.
pub fn detect_from_bytes(data: &[u8]) -> Option<MediaType> {
    // Some producers emit garbage before the header; the PDF spec tolerates 1KB of it.
    let head = &data[..data.len().min(1024)];
    if head
        .windows(PDF_MAGIC.len())
        .any(|w| w == PDF_MAGIC)
    {
        return Some(MediaType::Pdf);
    }

    if data.starts_with(OLE_MAGIC) {
        return Some(MediaType::Doc);
    }

    if data.starts_with(ZIP_MAGIC)
        && data
            .windows(DOCX_MARKER.len())
            .any(|w| w == DOCX_MARKER)
    {
        return Some(MediaType::Docx);
    }

    None
}

/// Decide which decoder to use from the declared type and the bytes.
///
/// The sniffed type wins when it contradicts the declaration, since the
/// declaration usually comes from a file name. With nothing declared and
/// nothing sniffed the input is unsupported.
pub fn resolve_media_type(declared: Option<MediaType>, data: &[u8]) -> Result<MediaType> {
    let sniffed = detect_from_bytes(data);
    match (declared, sniffed) {
        (Some(d), Some(s)) if d != s => {
            log::debug!("declared media type {} disagrees with content ({}); using content", d, s);
            Ok(s)
        }
        (Some(d), _) => Ok(d),
        (None, Some(s)) => Ok(s),
        (None, None) => Err(Error::UnsupportedFormat(
            "content is neither PDF nor Word".to_string(),
        )),
    }
}
