//! Contact details: email, phone, location and profile links.

use std::cmp::Reverse;

use regex::Regex;

use super::{ExtractionInput, FieldExtractor};
use crate::config::Dictionaries;
use crate::error::{Error, Result};

/// First `local@domain.tld` in the document.
#[derive(Debug, Clone)]
pub struct EmailExtractor {
    pattern: Regex,
}

impl EmailExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap(),
        }
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EmailExtractor {
    type Output = String;

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        self.pattern
            .find(input.text)
            .map(|m| m.as_str().trim_end_matches('.').to_string())
    }
}

/// Phone number from a prioritised list of regional patterns.
#[derive(Debug, Clone)]
pub struct PhoneExtractor {
    patterns: Vec<Regex>,
}

impl PhoneExtractor {
    pub fn new() -> Self {
        let patterns = [
            // Indian mobile, optionally with +91 and a 5-5 split.
            r"(?:\+91[\s-]?)?\b[6-9]\d{4}[\s-]?\d{5}\b",
            // North American.
            r"(?:\+1[\s.-]?)?(?:\(\d{3}\)|\b\d{3})[\s.-]?\d{3}[\s.-]?\d{4}\b",
            // Generic international.
            r"\+\d{1,3}[\s.-]?(?:\(?\d{1,5}\)?[\s.-]?){1,4}\d{2,5}\b",
        ];
        Self {
            patterns: patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
        }
    }

    /// Accept 10 to 15 digits not glued to a longer number.
    fn accept(text: &str, start: usize, end: usize) -> bool {
        let digits = text[start..end].chars().filter(char::is_ascii_digit).count();
        let glued_before = text[..start].chars().next_back().is_some_and(|c| c.is_ascii_digit());
        let glued_after = text[end..].chars().next().is_some_and(|c| c.is_ascii_digit());
        (10..=15).contains(&digits) && !glued_before && !glued_after
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = String;

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .find_iter(input.text)
                .find(|m| Self::accept(input.text, m.start(), m.end()))
                .map(|m| m.as_str().trim().to_string())
        })
    }
}

/// Number of leading lines searched for a bare `City, Region`.
const CITY_REGION_LINES: usize = 10;

/// Location from a labelled field, a `City, Region` pair, or a known city.
#[derive(Debug, Clone)]
pub struct LocationExtractor {
    labelled: Option<Regex>,
    city_region: Regex,
    /// `(lowercase, canonical)`
    cities: Vec<(String, String)>,
}

impl LocationExtractor {
    pub fn new(dicts: &Dictionaries) -> Result<Self> {
        let escape = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .map(|k| k.trim())
                .filter(|k| !k.is_empty())
                .map(regex::escape)
                .collect()
        };
        let labels = escape(&dicts.location_labels);
        let phrases = escape(&dicts.location_phrases);

        // A bare label word is prose ("to address bottlenecks"); only a
        // separator turns it into a field.
        let mut alternatives = Vec::new();
        if !labels.is_empty() {
            alternatives.push(format!(r"(?:{})\s*[:\-–]", labels.join("|")));
        }
        if !phrases.is_empty() {
            alternatives.push(format!(r"(?:{})\b\s*[:\-–]?", phrases.join("|")));
        }
        let labelled = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!(r"(?i)\b(?:{})\s*([^\n|•]+)", alternatives.join("|"));
            Some(Regex::new(&pattern).map_err(|e| Error::Config(format!("location keywords: {}", e)))?)
        };

        Ok(Self {
            labelled,
            city_region: Regex::new(
                r"^([A-Z][A-Za-z]+(?: [A-Z][A-Za-z]+)?), ?([A-Z][A-Za-z]+(?: [A-Z][A-Za-z]+)?|[A-Z]{2})$",
            )
            .unwrap(),
            cities: dicts
                .cities
                .iter()
                .map(|c| (c.to_lowercase(), c.clone()))
                .collect(),
        })
    }

    fn from_label(&self, text: &str) -> Option<String> {
        self.labelled.as_ref()?.captures_iter(text).find_map(|caps| {
            let value = caps.get(1)?.as_str();
            // A column break ends the field.
            let value = value.split("  ").next().unwrap_or(value);
            let value = value.trim().trim_end_matches(['.', ',', ';']).trim();
            let plausible = value.chars().any(char::is_alphabetic)
                && !value.contains('@')
                && !value.contains('/')
                && value.chars().count() <= 80;
            plausible.then(|| value.to_string())
        })
    }

    fn from_city_region(&self, input: &ExtractionInput<'_>) -> Option<String> {
        input
            .leading_lines(CITY_REGION_LINES)
            .flat_map(|line| line.split(['|', '•']))
            .flat_map(|segment| segment.split("  "))
            .map(str::trim)
            .find(|segment| self.city_region.is_match(segment))
            .map(str::to_string)
    }

    /// Earliest gazetteer city in the text; longer names win ties.
    fn from_gazetteer(&self, text: &str) -> Option<String> {
        text.lines().find_map(|line| {
            let lower = line.to_lowercase();
            self.cities
                .iter()
                .filter_map(|(needle, canonical)| {
                    find_word(&lower, needle).map(|pos| (pos, Reverse(needle.len()), canonical))
                })
                .min()
                .map(|(_, _, canonical)| canonical.clone())
        })
    }
}

impl FieldExtractor for LocationExtractor {
    type Output = String;

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        self.from_label(input.text)
            .or_else(|| self.from_city_region(input))
            .or_else(|| self.from_gazetteer(input.text))
    }
}

/// First occurrence of `needle` bounded by non-alphanumeric characters.
pub(crate) fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack.match_indices(needle).map(|(i, _)| i).find(|&i| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// `linkedin.com/in/<slug>`
#[derive(Debug, Clone)]
pub struct LinkedinExtractor {
    pattern: Regex,
}

impl LinkedinExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/in/([A-Za-z0-9_%-]+)")
                .unwrap(),
        }
    }
}

impl Default for LinkedinExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LinkedinExtractor {
    type Output = String;

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        let caps = self.pattern.captures(input.text)?;
        Some(format!("linkedin.com/in/{}", &caps[1]))
    }
}

/// `github.com/<user>`
#[derive(Debug, Clone)]
pub struct GithubExtractor {
    pattern: Regex,
}

impl GithubExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/([A-Za-z0-9](?:[A-Za-z0-9-]{0,38}))")
                .unwrap(),
        }
    }
}

impl Default for GithubExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for GithubExtractor {
    type Output = String;

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        let caps = self.pattern.captures(input.text)?;
        Some(format!("github.com/{}", &caps[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructuredText;
    use crate::parser::SectionSegmenter;

    fn run<E: FieldExtractor<Output = String>>(extractor: &E, text: &str) -> Option<String> {
        let text = StructuredText::from_plain(text);
        let seg = SectionSegmenter::new(&Dictionaries::default()).segment(&text);
        extractor.extract(&ExtractionInput::new(&seg, &[]))
    }

    fn location(text: &str) -> Option<String> {
        run(&LocationExtractor::new(&Dictionaries::default()).unwrap(), text)
    }

    #[test]
    fn test_email() {
        let email = EmailExtractor::new();
        assert_eq!(
            run(&email, "Jane Doe\nMail: jane.doe@example.com.").as_deref(),
            Some("jane.doe@example.com")
        );
        assert_eq!(run(&email, "no email here"), None);
    }

    #[test]
    fn test_indian_mobile() {
        let phone = PhoneExtractor::new();
        assert_eq!(run(&phone, "Jane Doe\n9876543210").as_deref(), Some("9876543210"));
        assert_eq!(
            run(&phone, "Phone: +91 98765 43210").as_deref(),
            Some("+91 98765 43210")
        );
    }

    #[test]
    fn test_north_american_and_international() {
        let phone = PhoneExtractor::new();
        assert_eq!(
            run(&phone, "Tel (415) 555-0123").as_deref(),
            Some("(415) 555-0123")
        );
        assert_eq!(
            run(&phone, "Tel +44 20 7946 0958").as_deref(),
            Some("+44 20 7946 0958")
        );
    }

    #[test]
    fn test_phone_rejects_short_and_glued_numbers() {
        let phone = PhoneExtractor::new();
        assert_eq!(run(&phone, "Employee id 12345"), None);
        assert_eq!(run(&phone, "2016 - 2020"), None);
        assert_eq!(run(&phone, "ref 98765432101234567"), None);
    }

    #[test]
    fn test_location_from_label() {
        assert_eq!(
            location("Jane Doe\nLocation: Pune, Maharashtra | jane@x.io").as_deref(),
            Some("Pune, Maharashtra")
        );
        assert_eq!(
            location("Based in Austin, TX.").as_deref(),
            Some("Austin, TX")
        );
    }

    #[test]
    fn test_location_skips_email_address_label() {
        assert_eq!(
            location("Email address: jane@example.com\nSeattle, WA").as_deref(),
            Some("Seattle, WA")
        );
    }

    #[test]
    fn test_location_label_needs_separator() {
        assert_eq!(
            location("Jane Doe\nExperience\nWorked to address performance bottlenecks daily"),
            None
        );
        assert_eq!(location("Improved location tracking for city buses"), None);
        assert_eq!(
            location("Current Location - Lisbon, Portugal").as_deref(),
            Some("Lisbon, Portugal")
        );
        assert_eq!(location("Jane lives in Leeds").as_deref(), Some("Leeds"));
    }

    #[test]
    fn test_location_from_gazetteer() {
        assert_eq!(
            location("Jane Doe\nWorked remotely for a team in new delhi since 2019").as_deref(),
            Some("New Delhi")
        );
        assert_eq!(location("Jane Doe\nRemote"), None);
    }

    #[test]
    fn test_profile_links() {
        let text = "https://www.linkedin.com/in/jane-doe-42/ | github.com/janedoe";
        assert_eq!(
            run(&LinkedinExtractor::new(), text).as_deref(),
            Some("linkedin.com/in/jane-doe-42")
        );
        assert_eq!(run(&GithubExtractor::new(), text).as_deref(), Some("github.com/janedoe"));
    }

    #[test]
    fn test_find_word() {
        assert_eq!(find_word("pune, india", "pune"), Some(0));
        assert_eq!(find_word("punekar", "pune"), None);
        assert_eq!(find_word("in new delhi", "delhi"), Some(7));
    }
}
