//! Work history from the Experience section.

use std::ops::Range;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::scan::{scan_entries, EntryRules};
use super::{is_bullet_line, strip_bullet, ExtractionInput, FieldExtractor};
use crate::config::Dictionaries;
use crate::model::{ExperienceLevel, SectionKind, WorkEntry};

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

/// Separators between position and company, in priority order.
const ENTRY_SEPARATORS: [&str; 3] = [" at ", " - ", ", "];

const MAX_ENTRY_LINE: usize = 100;
const MAX_POSITION_CHARS: usize = 60;
const MAX_POSITION_WORDS: usize = 6;
const MAX_COMPANY_CHARS: usize = 60;
/// Shorter continuation lines are not description.
const MIN_DESCRIPTION_LINE: usize = 20;

/// A tenure such as `Jan 2018 - Mar 2020` or `2020 - Present`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// `YYYY` or `Month YYYY`, as written.
    pub start: String,
    /// `None` for open-ended ranges.
    pub end: Option<String>,
    pub is_current: bool,
}

impl DateRange {
    /// Copy the range onto a work entry.
    pub fn apply_to(&self, entry: &mut WorkEntry) {
        entry.start_date = Some(self.start.clone());
        entry.end_date = self.end.clone();
        entry.is_current = self.is_current;
    }
}

/// Builds [`WorkEntry`] records.
///
/// An entry starts on a `Position at Company`, `Position - Company` or
/// `Position, Company` line; a date range on that line or on a later
/// date-only line fills the tenure, and longer lines become description.
#[derive(Debug, Clone)]
pub struct ExperienceExtractor {
    date_range: Regex,
    levels: Vec<(ExperienceLevel, Vec<String>)>,
}

impl ExperienceExtractor {
    pub fn new(dicts: &Dictionaries) -> Self {
        let date = format!(r"(?:{MONTH}\.?\s+)?(?:19|20)\d{{2}}");
        let pattern = format!(
            r"(?i)\b(?P<start>{date})\s*(?:-|–|—|\bto\b)\s*(?P<end>{date}|present|current|now)\b"
        );
        Self {
            date_range: Regex::new(&pattern).unwrap(),
            levels: dicts
                .experience_levels
                .iter()
                .map(|l| {
                    let keywords = l
                        .keywords
                        .iter()
                        .map(|k| format!(" {} ", normalize_words(k).trim()))
                        .collect();
                    (l.level, keywords)
                })
                .collect(),
        }
    }

    /// First date range in `line` and where it sits.
    pub fn find_date_range(&self, line: &str) -> Option<(DateRange, Range<usize>)> {
        let caps = self.date_range.captures(line)?;
        let whole = caps.get(0)?;
        let start = collapse_spaces(&caps["start"]);
        let end = collapse_spaces(&caps["end"]);
        let is_current = matches!(end.to_lowercase().as_str(), "present" | "current" | "now");
        let range = DateRange {
            start,
            end: (!is_current).then_some(end),
            is_current,
        };
        Some((range, whole.range()))
    }

    /// Seniority implied by the position title.
    pub fn level_hint(&self, position: &str) -> ExperienceLevel {
        let title = normalize_words(position);
        self.levels
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| title.contains(k.as_str())))
            .map(|(level, _)| *level)
            .unwrap_or(ExperienceLevel::Mid)
    }

    /// `(position, company)` from a line with any date range removed.
    fn split_entry(line: &str) -> Option<(&str, &str)> {
        ENTRY_SEPARATORS.iter().find_map(|sep| {
            let (position, company) = line.split_once(sep)?;
            let position = position.trim();
            let company = company.trim().trim_end_matches([',', '|', ';', '-', '–']).trim();
            let valid = starts_uppercase(position)
                && position.chars().count() <= MAX_POSITION_CHARS
                && position.split_whitespace().count() <= MAX_POSITION_WORDS
                && company
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
                && company.chars().count() <= MAX_COMPANY_CHARS;
            valid.then_some((position, company))
        })
    }
}

impl EntryRules for ExperienceExtractor {
    type Entry = WorkEntry;

    fn start(&self, line: &str) -> Option<WorkEntry> {
        let line = line.trim();
        if line.is_empty() || is_bullet_line(line) || line.chars().count() > MAX_ENTRY_LINE {
            return None;
        }
        let date = self.find_date_range(line);
        let rest = match &date {
            Some((_, range)) => without_range(line, range.clone()),
            None => line.to_string(),
        };
        let (position, company) = Self::split_entry(&rest)?;

        let mut entry = WorkEntry {
            company: company.to_string(),
            position: position.to_string(),
            experience_level_hint: Some(self.level_hint(position)),
            ..Default::default()
        };
        if let Some((range, _)) = date {
            range.apply_to(&mut entry);
        }
        Some(entry)
    }

    fn absorb(&self, entry: &mut WorkEntry, line: &str) {
        let line = strip_bullet(line);
        if line.is_empty() {
            return;
        }
        if let Some((range, span)) = self.find_date_range(line) {
            if entry.start_date.is_none() {
                range.apply_to(entry);
            }
            if without_range(line, span).is_empty() {
                return;
            }
        }
        if line.chars().count() > MIN_DESCRIPTION_LINE {
            if !entry.description.is_empty() {
                entry.description.push('\n');
            }
            entry.description.push_str(line);
        }
    }
}

impl FieldExtractor for ExperienceExtractor {
    type Output = Vec<WorkEntry>;

    /// Without an Experience section, or without recognisable entries in it,
    /// the result is a single empty entry for the caller to fill in.
    fn extract(&self, input: &ExtractionInput<'_>) -> Option<Vec<WorkEntry>> {
        let entries = scan_entries(self, SectionKind::Experience, input.segmentation, false);
        log::debug!("Found {} work entries", entries.len());
        if entries.is_empty() {
            Some(vec![WorkEntry::default()])
        } else {
            Some(entries)
        }
    }
}

/// `line` with `range` cut out and left-over brackets or separators cleaned.
fn without_range(line: &str, range: Range<usize>) -> String {
    let joined = format!("{}{}", &line[..range.start], &line[range.end..]);
    let cleaned = joined.replace("()", "").replace("[]", "");
    cleaned
        .trim()
        .trim_matches(['|', ',', ';', '-', '–', '—', ':'])
        .trim()
        .to_string()
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

fn collapse_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase words separated by single spaces, padded on both sides.
fn normalize_words(text: &str) -> String {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    format!(" {} ", words.join(" "))
}
