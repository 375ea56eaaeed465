//! Education entries keyed on degree patterns.

use regex::Regex;

use super::scan::{scan_entries, EntryRules};
use super::{strip_bullet, ExtractionInput, FieldExtractor};
use crate::config::Dictionaries;
use crate::error::{Error, Result};
use crate::model::{EducationEntry, SectionKind};

/// A compiled degree pattern and its canonical label.
#[derive(Debug, Clone)]
struct Degree {
    label: String,
    pattern: Regex,
}

/// Builds [`EducationEntry`] records from the Education section, or from the
/// whole document when the resume has no such header.
///
/// A line matching a degree pattern opens an entry; later lines may supply
/// the institution, the grade and a missing graduation year.
#[derive(Debug, Clone)]
pub struct EducationExtractor {
    degrees: Vec<Degree>,
    institution_keywords: Vec<String>,
    year: Regex,
    grade: Regex,
}

impl EducationExtractor {
    /// Compile the dictionary's degree patterns, in priority order.
    pub fn new(dicts: &Dictionaries) -> Result<Self> {
        let degrees = dicts
            .degrees
            .iter()
            .map(|d| {
                let pattern = Regex::new(&d.pattern)
                    .map_err(|e| Error::Config(format!("degree pattern {:?}: {}", d.label, e)))?;
                Ok(Degree {
                    label: d.label.clone(),
                    pattern,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            degrees,
            institution_keywords: dicts
                .institution_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            year: Regex::new(r"\b(?:19|20)\d{2}\b").unwrap(),
            grade: Regex::new(
                r"(?i)\b(?:cgpa|gpa|percentage)\b\s*[:\-]?\s*(\d+(?:\.\d+)?\s*(?:/\s*\d+(?:\.\d+)?|%)?)",
            )
            .unwrap(),
        })
    }

    fn degree_match<'l>(&self, line: &'l str) -> Option<(&Degree, regex::Match<'l>)> {
        self.degrees
            .iter()
            .find_map(|d| d.pattern.find(line).map(|m| (d, m)))
    }

    fn last_year(&self, line: &str) -> Option<u16> {
        self.year
            .find_iter(line)
            .last()
            .and_then(|m| m.as_str().parse().ok())
    }

    fn grade_of(&self, line: &str) -> Option<String> {
        let caps = self.grade.captures(line)?;
        Some(caps[1].chars().filter(|c| !c.is_whitespace()).collect())
    }

    /// The first delimited segment naming an institution, skipping the
    /// segment that carries the degree itself.
    fn institution_of(&self, line: &str) -> Option<String> {
        segments(line)
            .into_iter()
            .filter(|segment| self.degree_match(segment).is_none())
            .find(|segment| {
                let lower = segment.to_lowercase();
                self.institution_keywords.iter().any(|k| lower.contains(k.as_str()))
            })
            .map(|segment| clean_segment(&segment).to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Field of study from the text following a degree match:
/// "in Computer Science, 2019" → "Computer Science",
/// "of Science in Physics" → "Physics".
fn field_of_study(rest: &str) -> String {
    let mut end = rest.len();
    for delimiter in [",", "|", "(", ";", " - ", " – ", " — ", "\t", "  ", " from ", " at "] {
        if let Some(pos) = rest.find(delimiter) {
            end = end.min(pos);
        }
    }
    if let Some(pos) = rest.find(|c: char| c.is_ascii_digit()) {
        end = end.min(pos);
    }

    let field = rest[..end]
        .trim()
        .trim_start_matches(['.', '\'', ':', '-'])
        .trim();
    let field = match field.rfind(" in ") {
        Some(pos) => &field[pos + 4..],
        None => field
            .strip_prefix("of ")
            .or_else(|| field.strip_prefix("in "))
            .unwrap_or(field),
    };
    field.trim().trim_end_matches(['.', ':', '-']).trim().to_string()
}

/// Split a line at the separators resumes use between fields.
fn segments(line: &str) -> Vec<String> {
    line.replace(" - ", "|")
        .replace("  ", "|")
        .split(['|', ',', '(', ')', ';', '\t', '•', '–', '—'])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn clean_segment(segment: &str) -> &str {
    segment.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_digit() || matches!(c, ':' | '-' | '.'))
}

impl EntryRules for EducationExtractor {
    type Entry = EducationEntry;

    fn start(&self, line: &str) -> Option<EducationEntry> {
        let line = strip_bullet(line);
        let (degree, found) = self.degree_match(line)?;
        Some(EducationEntry {
            qualification: degree.label.clone(),
            field_of_study: field_of_study(&line[found.end()..]),
            institution: self.institution_of(line).unwrap_or_default(),
            graduation_year: self.last_year(line),
            grade_or_gpa: self.grade_of(line),
        })
    }

    fn absorb(&self, entry: &mut EducationEntry, line: &str) {
        let line = strip_bullet(line);
        if line.is_empty() {
            return;
        }
        if entry.institution.is_empty() {
            if let Some(institution) = self.institution_of(line) {
                entry.institution = institution;
            }
        }
        if entry.grade_or_gpa.is_none() {
            entry.grade_or_gpa = self.grade_of(line);
        }
        if entry.graduation_year.is_none() {
            entry.graduation_year = self.last_year(line);
        }
    }
}

impl FieldExtractor for EducationExtractor {
    type Output = Vec<EducationEntry>;

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<Vec<EducationEntry>> {
        let entries = scan_entries(self, SectionKind::Education, input.segmentation, true);
        log::debug!("Found {} education entries", entries.len());
        (!entries.is_empty()).then_some(entries)
    }
}
