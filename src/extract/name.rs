//! Candidate name from the top of the document.

use regex::Regex;

use super::{ExtractionInput, FieldExtractor};
use crate::config::Dictionaries;

const CANDIDATE_LINES: usize = 5;

/// Picks the first leading line shaped like a personal name.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    boilerplate: Vec<String>,
    title_prefixes: Vec<String>,
    domain: Regex,
}

impl NameExtractor {
    pub fn new(dicts: &Dictionaries) -> Self {
        Self {
            boilerplate: dicts.name_boilerplate.iter().map(|w| w.to_lowercase()).collect(),
            title_prefixes: dicts.name_title_prefixes.iter().map(|w| w.to_lowercase()).collect(),
            domain: Regex::new(r"(?i)\.(com|org|net|io|in|edu|gov|co|dev|me|ai|info|uk)\b").unwrap(),
        }
    }

    /// Exclusion patterns: email, long digit run, boilerplate, domain, honorific.
    fn is_excluded(&self, line: &str) -> bool {
        if line.contains('@') || longest_digit_run(line) >= 10 || self.domain.is_match(line) {
            return true;
        }
        let mut words = line
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase);
        let first = words.next();
        if first
            .as_ref()
            .is_some_and(|w| self.title_prefixes.contains(w))
        {
            return true;
        }
        first
            .into_iter()
            .chain(words)
            .any(|w| self.boilerplate.contains(&w))
    }

    /// 2–4 capitalised alphabetic tokens, 4–60 characters in total.
    fn is_name_shaped(line: &str) -> bool {
        let len = line.chars().count();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        (4..=60).contains(&len)
            && (2..=4).contains(&tokens.len())
            && tokens.iter().all(|t| {
                t.chars().all(char::is_alphabetic)
                    && t.chars().next().is_some_and(char::is_uppercase)
            })
    }
}

impl FieldExtractor for NameExtractor {
    type Output = String;

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<String> {
        input
            .leading_lines(CANDIDATE_LINES)
            .find(|line| !self.is_excluded(line) && Self::is_name_shaped(line))
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

fn longest_digit_run(line: &str) -> usize {
    let mut best = 0;
    let mut current = 0;
    for c in line.chars() {
        if c.is_ascii_digit() {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}
