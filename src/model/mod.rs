//! Data model shared by the decoder, the parser passes and the extractors.
//!
//! Everything here is created fresh per parse call; nothing is shared
//! between documents.

mod document;
mod profile;
mod result;
mod run;
mod section;
mod table;
mod text;

pub use document::{DocumentInfo, RawDocument};
pub use profile::{
    parse_resume_date, ContactInfo, EducationEntry, ExperienceLevel, ExtractedProfile,
    PersonalInfo, ProjectEntry, WorkEntry,
};
pub use result::{ParsedResume, Quality, ValidationResult};
pub use run::{reading_order, FontWeightHint, PageRuns, RunArena, TextRun};
pub use section::{Section, SectionKind};
pub use table::Table;
pub use text::{LineStyle, StructuredText, TextLine};
