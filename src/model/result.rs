//! Parse results handed back to callers.

use serde::{Deserialize, Serialize};

use super::{DocumentInfo, ExtractedProfile, Section, Table};
use crate::detect::MediaType;

/// Quality signal for gating auto-fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// 0..=100.
    pub confidence: u8,
    /// `confidence > 50`.
    pub is_valid: bool,
    pub warnings: Vec<String>,
}

/// How far a caller should trust the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Quality {
    /// Safe to pre-fill.
    Trusted,
    /// Parsed, but the user should review every field.
    LowConfidence,
}

/// A successful parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    /// `None` when plain text was handed in directly.
    pub media_type: Option<MediaType>,
    pub info: DocumentInfo,
    /// Structured text in reading order, as handed to downstream analysis.
    pub text: String,
    pub sections: Vec<Section>,
    /// Advisory tables recovered from positioned runs.
    pub tables: Vec<Table>,
    pub profile: ExtractedProfile,
    pub validation: ValidationResult,
}

impl ParsedResume {
    pub fn quality(&self) -> Quality {
        if self.validation.is_valid {
            Quality::Trusted
        } else {
            Quality::LowConfidence
        }
    }

    /// Text of a section's content.
    pub fn section_text(&self, section: &Section) -> &str {
        section.content(&self.text)
    }
}
