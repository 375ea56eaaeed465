//! Resume sections located by the segmenter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Section families the segmenter recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
}

impl SectionKind {
    /// All kinds, in tie-break order.
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-open byte range `[start_offset, end_offset)` of the structured text.
///
/// The range begins at the header line, so consecutive sections tile the
/// text after the first header; `content_start` points just past the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub name: SectionKind,
    /// Header line as it appears in the document.
    pub header: String,
    pub start_offset: usize,
    pub content_start: usize,
    pub end_offset: usize,
}

impl Section {
    /// Content below the header.
    pub fn content<'t>(&self, text: &'t str) -> &'t str {
        &text[self.content_start..self.end_offset]
    }

    /// Length of the whole range in bytes.
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.content_start >= self.end_offset
    }
}
