//! # cvparse
//!
//! Heuristic resume extraction for Rust.
//!
//! This library turns an uploaded resume (PDF or DOCX) into a structured
//! candidate profile (name, contact details, skills, education, work
//! history) without any machine-learning model: positioned text runs are
//! reassembled into reading order, split into sections, and mined by
//! independent pattern-based field extractors. Every parse also reports a
//! confidence score so callers can decide whether to trust auto-fill.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvparse::{parse_file, render};
//!
//! fn main() -> cvparse::Result<()> {
//!     // Parse a resume
//!     let parsed = parse_file("resume.pdf")?;
//!
//!     println!("{:?}", parsed.profile.personal_info.name);
//!     println!("confidence {}", parsed.validation.confidence);
//!
//!     // Hand the profile to a form as JSON
//!     let json = render::to_json(&parsed, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout reconstruction**: line, paragraph and column breaks from glyph geometry
//! - **Section segmentation**: education, experience, skills, projects, certifications
//! - **Field extractors**: one strategy object per field, never failing
//! - **Injectable dictionaries**: keywords, degrees, skills and cities from JSON
//! - **Confidence scoring**: 0-100 with warnings for missing fields
//! - **Parallel batches**: uses Rayon across independent documents

pub mod config;
pub mod decoder;
pub mod detect;
pub mod engine;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod validate;

// Re-export commonly used types
pub use config::Dictionaries;
pub use decoder::{DecoderRegistry, DocumentDecoder};
pub use detect::{detect_from_bytes, resolve_media_type, MediaType};
pub use engine::ResumeParser;
pub use error::{Error, Failure, FailureKind, Result};
pub use model::{
    ContactInfo, DocumentInfo, EducationEntry, ExperienceLevel, ExtractedProfile, ParsedResume,
    PersonalInfo, ProjectEntry, Quality, RawDocument, Section, SectionKind, StructuredText, Table,
    ValidationResult, WorkEntry,
};
pub use parser::{ErrorMode, ParseOptions};
pub use render::JsonFormat;
pub use validate::Validator;

use std::path::Path;

/// Parse a resume file with default settings.
///
/// The media type comes from the extension and is checked against the
/// file's leading bytes.
///
/// # Example
///
/// ```no_run
/// use cvparse::parse_file;
///
/// let parsed = parse_file("resume.docx").unwrap();
/// for job in &parsed.profile.work_experience {
///     println!("{} at {}", job.position, job.company);
/// }
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedResume> {
    ResumeParser::new().parse_path(path)
}

/// Parse a resume file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<ParsedResume> {
    ResumeParser::new().with_options(options).parse_path(path)
}

/// Parse resume bytes of a declared media type.
///
/// # Example
///
/// ```no_run
/// use cvparse::{parse_bytes, MediaType};
///
/// let data = std::fs::read("resume.pdf").unwrap();
/// let parsed = parse_bytes(&data, MediaType::Pdf).unwrap();
/// println!("{}", parsed.text);
/// ```
pub fn parse_bytes(data: &[u8], media_type: MediaType) -> Result<ParsedResume> {
    ResumeParser::new().parse(&RawDocument::new(data, media_type))
}

/// Run the extraction pipeline on plain text.
pub fn parse_text(text: &str) -> ParsedResume {
    ResumeParser::new().parse_text(text)
}

/// Async version of [`parse_file`].
///
/// The file is read with `tokio::fs`; parsing runs on the blocking pool.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(path: P) -> Result<ParsedResume> {
    let path = path.as_ref().to_path_buf();
    let data = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound(path.clone()),
        _ => Error::Io(e),
    })?;
    let declared = MediaType::from_path(&path).ok();

    tokio::task::spawn_blocking(move || {
        let raw = match declared {
            Some(media) => RawDocument::new(data, media),
            None => RawDocument::undeclared(data),
        };
        ResumeParser::new().parse(&raw)
    })
    .await
    .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}
