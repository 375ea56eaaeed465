//! Field extractors.
//!
//! Every field has its own strategy object implementing [`FieldExtractor`].
//! Extractors read the same [`ExtractionInput`], never fail, and never look
//! at each other's results: "not found" is `None`.

mod certifications;
mod contact;
mod education;
mod experience;
mod name;
mod projects;
mod scan;
mod skills;

pub use certifications::CertificationExtractor;
pub use contact::{EmailExtractor, GithubExtractor, LinkedinExtractor, LocationExtractor, PhoneExtractor};
pub use education::EducationExtractor;
pub use experience::{DateRange, ExperienceExtractor};
pub use name::NameExtractor;
pub use projects::ProjectExtractor;
pub use scan::{scan_entries, transition, EntryRules, ScanState};
pub use skills::{SkillMatcher, SkillsExtractor};

use crate::config::Dictionaries;
use crate::error::Result;
use crate::model::{ContactInfo, ExtractedProfile, PersonalInfo, SectionKind, Table};
use crate::parser::{is_bullet_marker, ScannedLine, Segmentation};

/// Everything an extractor may look at.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionInput<'a> {
    pub text: &'a str,
    pub segmentation: &'a Segmentation<'a>,
    /// Advisory tables; empty for flow documents.
    pub tables: &'a [Table],
}

impl<'a> ExtractionInput<'a> {
    pub fn new(segmentation: &'a Segmentation<'a>, tables: &'a [Table]) -> Self {
        Self {
            text: segmentation.text(),
            segmentation,
            tables,
        }
    }

    pub fn lines(&self) -> &'a [ScannedLine<'a>] {
        self.segmentation.lines()
    }

    /// Content of the sections of `kind`, if any were found.
    pub fn section_text(&self, kind: SectionKind) -> Option<String> {
        self.segmentation.content_of(kind)
    }

    /// The first `n` non-blank lines, trimmed.
    pub fn leading_lines(&self, n: usize) -> impl Iterator<Item = &'a str> {
        self.lines()
            .iter()
            .map(|l| l.text.trim())
            .filter(|t| !t.is_empty())
            .take(n)
    }
}

/// A single-field heuristic.
pub trait FieldExtractor {
    type Output;

    /// Extract the field, or `None` when nothing matched.
    fn extract(&self, input: &ExtractionInput<'_>) -> Option<Self::Output>;
}

/// Runs every extractor and assembles the profile.
#[derive(Debug, Clone)]
pub struct ProfileExtractor {
    name: NameExtractor,
    email: EmailExtractor,
    phone: PhoneExtractor,
    location: LocationExtractor,
    linkedin: LinkedinExtractor,
    github: GithubExtractor,
    skills: SkillsExtractor,
    education: EducationExtractor,
    experience: ExperienceExtractor,
    projects: ProjectExtractor,
    certifications: CertificationExtractor,
}

impl ProfileExtractor {
    /// Build all extractors; fails only on invalid dictionary patterns.
    pub fn new(dicts: &Dictionaries) -> Result<Self> {
        let skills = SkillMatcher::new(dicts);
        Ok(Self {
            name: NameExtractor::new(dicts),
            email: EmailExtractor::new(),
            phone: PhoneExtractor::new(),
            location: LocationExtractor::new(dicts)?,
            linkedin: LinkedinExtractor::new(),
            github: GithubExtractor::new(),
            skills: SkillsExtractor::new(skills.clone()),
            education: EducationExtractor::new(dicts)?,
            experience: ExperienceExtractor::new(dicts),
            projects: ProjectExtractor::new(skills),
            certifications: CertificationExtractor::new(dicts),
        })
    }

    pub fn extract(&self, input: &ExtractionInput<'_>) -> ExtractedProfile {
        ExtractedProfile {
            personal_info: PersonalInfo {
                name: self.name.extract(input),
            },
            contact: ContactInfo {
                email: self.email.extract(input),
                phone: self.phone.extract(input),
                location: self.location.extract(input),
                linkedin: self.linkedin.extract(input),
                github: self.github.extract(input),
            },
            skills: self.skills.extract(input).unwrap_or_default(),
            education: self.education.extract(input).unwrap_or_default(),
            work_experience: self.experience.extract(input).unwrap_or_default(),
            projects: self.projects.extract(input).unwrap_or_default(),
            certifications: self.certifications.extract(input).unwrap_or_default(),
            experience_months: None,
        }
    }
}

/// Whether a line opens with a bullet glyph. ASCII markers (`-`, `*`) need
/// a following space so that "-5%" is not a bullet.
pub(crate) fn is_bullet_line(line: &str) -> bool {
    let mut chars = line.trim_start().chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_bullet_marker(first.encode_utf8(&mut [0; 4]))
        && (!first.is_ascii() || chars.next().map_or(true, char::is_whitespace))
}

/// Line text without a leading bullet glyph.
pub(crate) fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim();
    if is_bullet_line(trimmed) {
        let mut chars = trimmed.chars();
        chars.next();
        chars.as_str().trim_start()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("  • Built APIs"), "Built APIs");
        assert_eq!(strip_bullet("- AWS Certified"), "AWS Certified");
        assert_eq!(strip_bullet("Plain line"), "Plain line");
        assert!(is_bullet_line("▪ item"));
        assert!(!is_bullet_line("-5 degrees"));
    }
}
