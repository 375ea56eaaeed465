//! Candidate profile produced by the field extractors.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Everything the extractors recovered from one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedProfile {
    pub personal_info: PersonalInfo,
    pub contact: ContactInfo,
    /// Deduplicated, in first-seen order.
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub work_experience: Vec<WorkEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<String>,
    /// Months covered by dated roles, overlaps counted once.
    pub experience_months: Option<u32>,
}

impl ExtractedProfile {
    /// Total tenure over every dated role, with current roles running until
    /// `as_of`. `None` when no role has a usable date range.
    pub fn total_experience_months(&self, as_of: NaiveDate) -> Option<u32> {
        let mut spans: Vec<(i32, i32)> = self
            .work_experience
            .iter()
            .filter_map(|work| work.month_span(as_of))
            .collect();
        if spans.is_empty() {
            return None;
        }
        spans.sort_unstable();

        let mut total = 0;
        let (mut start, mut end) = spans[0];
        for &(s, e) in &spans[1..] {
            if s <= end {
                end = end.max(e);
            } else {
                total += end - start;
                (start, end) = (s, e);
            }
        }
        total += end - start;
        u32::try_from(total).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    /// Canonical degree label, e.g. `B.Tech`.
    pub qualification: String,
    pub field_of_study: String,
    pub institution: String,
    pub graduation_year: Option<u16>,
    pub grade_or_gpa: Option<String>,
}

/// Seniority guessed from the position title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Lead,
    Executive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub company: String,
    pub position: String,
    /// `YYYY` or `Month YYYY`, as written.
    pub start_date: Option<String>,
    /// `None` while `is_current`.
    pub end_date: Option<String>,
    pub is_current: bool,
    pub description: String,
    pub experience_level_hint: Option<ExperienceLevel>,
}

impl WorkEntry {
    /// Whether nothing was filled in.
    pub fn is_blank(&self) -> bool {
        self == &WorkEntry::default()
    }

    /// Tenure in whole months. Current roles run until `as_of`.
    pub fn duration_months(&self, as_of: NaiveDate) -> Option<u32> {
        let (start, end) = self.month_span(as_of)?;
        u32::try_from(end - start).ok()
    }

    /// Start and end as absolute month numbers; `None` for reversed ranges.
    fn month_span(&self, as_of: NaiveDate) -> Option<(i32, i32)> {
        let start = parse_resume_date(self.start_date.as_deref()?)?;
        let end = if self.is_current {
            as_of
        } else {
            parse_resume_date(self.end_date.as_deref()?)?
        };
        let month = |d: NaiveDate| d.year() * 12 + d.month() as i32;
        (month(end) >= month(start)).then(|| (month(start), month(end)))
    }

    /// First year of the role.
    pub fn start_year(&self) -> Option<i32> {
        parse_resume_date(self.start_date.as_deref()?).map(|d| d.year())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    /// Dictionary skills mentioned in the entry.
    pub technologies: Vec<String>,
}

/// Parse `2020`, `Jan 2020`, `Sept. 2020` or `January 2020` into the first day of that month.
pub fn parse_resume_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split_whitespace();
    let first = parts.next()?;
    let (month, year) = match parts.next() {
        Some(year) => (month_number(first)?, year),
        None => (1, first),
    };
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn month_number(name: &str) -> Option<u32> {
    let key: String = name
        .trim_end_matches('.')
        .chars()
        .take(3)
        .collect::<String>()
        .to_ascii_lowercase();
    let month = match key.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
