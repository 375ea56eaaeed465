//! Confidence scoring over the decoded text and the extracted profile.
//!
//! The score starts at 100 and loses points for four independent signals:
//!
//! | Signal                                        | Deduction |
//! |-----------------------------------------------|-----------|
//! | fewer than 100 readable characters            | 30        |
//! | more than 10% unreadable characters           | 20        |
//! | no contact keyword anywhere                   | 15        |
//! | no experience keyword anywhere                | 15        |
//!
//! The length check counts every character of the text except unreadable
//! ones, so appended garbage can never lift a short text over the bar.
//!
//! A profile is valid when the score is above 50. Missing fields and
//! chronology oddities only produce warnings.

use crate::config::Dictionaries;
use crate::model::{ExtractedProfile, SectionKind, ValidationResult};

const START: u8 = 100;
const MIN_READABLE_CHARS: usize = 100;
const SHORT_TEXT_PENALTY: u8 = 30;
const MAX_GARBLED_RATIO: f64 = 0.10;
const GARBLED_PENALTY: u8 = 20;
const NO_CONTACT_PENALTY: u8 = 15;
const NO_EXPERIENCE_PENALTY: u8 = 15;
const VALID_ABOVE: u8 = 50;
/// Work starting this many years before the first degree is flagged.
const CHRONOLOGY_GAP_YEARS: i32 = 10;

/// Typographic punctuation that resumes use freely.
const EXTRA_PUNCTUATION: &[char] = &[
    '•', '●', '○', '▪', '■', '◦', '·', '–', '—', '‘', '’', '“', '”', '…', '€', '£', '₹', '©',
];

/// Whether a character belongs to readable resume text.
pub fn is_readable(c: char) -> bool {
    (c.is_alphanumeric() && !is_private_use(c))
        || c.is_whitespace()
        || c.is_ascii_punctuation()
        || EXTRA_PUNCTUATION.contains(&c)
}

fn is_private_use(c: char) -> bool {
    matches!(c as u32, 0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD)
}

/// Character statistics used by the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub total: usize,
    /// `total - garbled`, whitespace included.
    pub readable: usize,
    pub garbled: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let mut stats = TextStats::default();
        for c in text.chars() {
            stats.total += 1;
            if is_readable(c) {
                stats.readable += 1;
            } else {
                stats.garbled += 1;
            }
        }
        stats
    }

    pub fn garbled_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.garbled as f64 / self.total as f64
        }
    }
}

/// Scores a parse.
#[derive(Debug, Clone)]
pub struct Validator {
    contact_keywords: Vec<String>,
    experience_keywords: Vec<String>,
}

impl Validator {
    /// Create a new validator using the dictionary's contact and experience keywords.
    pub fn new(dicts: &Dictionaries) -> Self {
        let lower = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .map(|w| w.to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };
        Self {
            contact_keywords: lower(dicts.contact_keywords.as_slice()),
            experience_keywords: lower(dicts.keywords_for(SectionKind::Experience)),
        }
    }

    /// Confidence from the text alone, with the reason for each deduction.
    pub fn score(&self, text: &str) -> (u8, Vec<String>) {
        let stats = TextStats::of(text);
        let lower = text.to_lowercase();
        let mut confidence = START;
        let mut reasons = Vec::new();

        if stats.readable < MIN_READABLE_CHARS {
            confidence -= SHORT_TEXT_PENALTY;
            reasons.push(format!(
                "Very little text extracted ({} readable characters)",
                stats.readable
            ));
        }
        if stats.garbled_ratio() > MAX_GARBLED_RATIO {
            confidence -= GARBLED_PENALTY;
            reasons.push(format!(
                "{:.0}% of the text is unreadable; the document may use an unsupported encoding",
                stats.garbled_ratio() * 100.0
            ));
        }
        if !self.contact_keywords.iter().any(|k| lower.contains(k.as_str())) {
            confidence -= NO_CONTACT_PENALTY;
            reasons.push("No contact details section or keyword found".to_string());
        }
        if !self.experience_keywords.iter().any(|k| lower.contains(k.as_str())) {
            confidence -= NO_EXPERIENCE_PENALTY;
            reasons.push("No work experience keyword found".to_string());
        }
        (confidence, reasons)
    }

    /// Full validation: score plus warnings about the profile.
    pub fn validate(&self, text: &str, profile: &ExtractedProfile) -> ValidationResult {
        let (confidence, mut warnings) = self.score(text);

        if profile.personal_info.name.is_none() {
            warnings.push("Candidate name not found".to_string());
        }
        if profile.contact.email.is_none() {
            warnings.push("Email address not found".to_string());
        }
        if profile.contact.phone.is_none() {
            warnings.push("Phone number not found".to_string());
        }
        warnings.extend(chronology_warnings(profile));

        log::debug!("Confidence {} with {} warnings", confidence, warnings.len());
        ValidationResult {
            confidence,
            is_valid: confidence > VALID_ABOVE,
            warnings,
        }
    }
}

/// Work that starts long before the earliest graduation is suspicious but
/// not impossible (part-time jobs, mature students), so it is only reported.
fn chronology_warnings(profile: &ExtractedProfile) -> Vec<String> {
    let Some(graduated) = profile
        .education
        .iter()
        .filter_map(|e| e.graduation_year)
        .min()
    else {
        return Vec::new();
    };
    let graduated = i32::from(graduated);

    profile
        .work_experience
        .iter()
        .filter_map(|work| work.start_year().map(|year| (work, year)))
        .filter(|(_, year)| *year < graduated - CHRONOLOGY_GAP_YEARS)
        .map(|(work, year)| {
            format!(
                "Work at {:?} starts in {}, more than {} years before graduating in {}",
                work.company, year, CHRONOLOGY_GAP_YEARS, graduated
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContactInfo, EducationEntry, PersonalInfo, WorkEntry};

    fn validator() -> Validator {
        Validator::new(&Dictionaries::default())
    }

    const GOOD: &str = "Jane Doe\nEmail: jane.doe@example.com\nPhone: 9876543210\n\
        Experience\nSenior Developer at TechCorp Inc.\n2020 - Present\n\
        Built scalable web tools for recruiters and hiring managers.";

    #[test]
    fn test_tiny_text() {
        let result = validator().validate("Hi", &ExtractedProfile::default());
        assert_eq!(result.confidence, 40);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_clean_resume_scores_full() {
        let (confidence, reasons) = validator().score(GOOD);
        assert_eq!(confidence, 100);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_garbled_text_penalty() {
        let garbled = format!("{}{}", GOOD, "\u{FFFD}".repeat(40));
        let (confidence, _) = validator().score(&garbled);
        assert_eq!(confidence, 80);
    }

    #[test]
    fn test_confidence_never_rises_with_garbage() {
        let v = validator();
        let mut previous = u8::MAX;
        for n in 0..60 {
            let text = format!("{}{}", GOOD, "\u{E001}".repeat(n));
            let (confidence, _) = v.score(&text);
            assert!(confidence <= previous);
            previous = confidence;
        }
        assert!(previous < 100);
    }

    #[test]
    fn test_length_counts_whitespace_but_not_garbage() {
        let v = validator();
        // 17 + 85 = 102 characters, 83 of them non-whitespace.
        let text = format!("Email Experience {}", "abcd ".repeat(17));
        assert_eq!(v.score(&text).0, 100);

        let short = format!("Email Experience {}", "abcd ".repeat(16));
        assert_eq!(v.score(&short).0, 70);
        let padded = format!("{}{}", short, "\u{E000}".repeat(5));
        assert_eq!(v.score(&padded).0, 70);
    }

    #[test]
    fn test_readable_characters() {
        assert!(is_readable('é'));
        assert!(is_readable('•'));
        assert!(!is_readable('\u{FFFD}'));
        assert!(!is_readable('\u{E000}'));
        assert!(!is_readable('\u{0007}'));
    }

    #[test]
    fn test_missing_field_warnings() {
        let profile = ExtractedProfile {
            personal_info: PersonalInfo {
                name: Some("Jane Doe".into()),
            },
            contact: ContactInfo {
                email: Some("jane.doe@example.com".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validator().validate(GOOD, &profile);
        assert!(result.is_valid);
        assert_eq!(result.warnings, vec!["Phone number not found".to_string()]);
    }

    #[test]
    fn test_chronology_advisory() {
        let profile = ExtractedProfile {
            education: vec![EducationEntry {
                graduation_year: Some(2020),
                ..Default::default()
            }],
            work_experience: vec![
                WorkEntry {
                    company: "Old Co".into(),
                    start_date: Some("2005".into()),
                    ..Default::default()
                },
                WorkEntry {
                    company: "New Co".into(),
                    start_date: Some("Jun 2019".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let warnings = chronology_warnings(&profile);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Old Co"));

        let (before, _) = validator().score(GOOD);
        let after = validator().validate(GOOD, &profile);
        assert_eq!(before, after.confidence);
    }
}
