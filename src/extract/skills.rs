//! Dictionary skill matching.

use std::sync::Arc;

use super::{ExtractionInput, FieldExtractor};
use crate::config::Dictionaries;
use crate::model::SectionKind;

/// Case-insensitive whole-token search for dictionary skills.
///
/// A hit must not be glued to a letter or digit on either side, and must
/// not be followed by `+` or `#` (so `C` never matches inside `C++`).
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    /// `(lowercase needle, canonical)`, shared between extractors.
    skills: Arc<[(String, String)]>,
}

impl SkillMatcher {
    /// Create a new matcher over every skill in the dictionary.
    pub fn new(dicts: &Dictionaries) -> Self {
        let mut skills: Vec<(String, String)> = Vec::new();
        for skill in dicts.all_skills() {
            let needle = skill.trim().to_ascii_lowercase();
            if !needle.is_empty() && !skills.iter().any(|(n, _)| *n == needle) {
                skills.push((needle, skill.trim().to_string()));
            }
        }
        Self {
            skills: skills.into(),
        }
    }

    /// Number of distinct skills known.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills mentioned in `text`, canonical casing, ordered by first mention.
    pub fn find(&self, text: &str) -> Vec<String> {
        let haystack = text.to_ascii_lowercase();
        let mut hits: Vec<(usize, usize, &str)> = self
            .skills
            .iter()
            .filter_map(|(needle, canonical)| {
                first_token_match(&haystack, needle).map(|pos| (pos, needle.len(), canonical.as_str()))
            })
            .collect();
        // Earlier first; at the same offset the longer skill first.
        hits.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut found: Vec<String> = Vec::with_capacity(hits.len());
        for (_, _, canonical) in hits {
            if !found.iter().any(|f| f == canonical) {
                found.push(canonical.to_string());
            }
        }
        found
    }
}

fn first_token_match(haystack: &str, needle: &str) -> Option<usize> {
    haystack.match_indices(needle).map(|(i, _)| i).find(|&i| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        let left_ok = !before.is_some_and(char::is_alphanumeric);
        let right_ok = !after.is_some_and(|c| c.is_alphanumeric() || c == '+' || c == '#');
        left_ok && right_ok
    })
}

/// Skills from the Skills section, or from the whole document and its
/// tables when there is no such section.
#[derive(Debug, Clone)]
pub struct SkillsExtractor {
    matcher: SkillMatcher,
}

impl SkillsExtractor {
    pub fn new(matcher: SkillMatcher) -> Self {
        Self { matcher }
    }
}

impl FieldExtractor for SkillsExtractor {
    type Output = Vec<String>;

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<Vec<String>> {
        let found = match input.section_text(SectionKind::Skills) {
            Some(section) => self.matcher.find(&section),
            None => {
                let mut haystack = input.text.to_string();
                for table in input.tables {
                    haystack.push('\n');
                    haystack.push_str(&table.plain_text());
                }
                self.matcher.find(&haystack)
            }
        };
        log::debug!("Matched {} skills", found.len());
        (!found.is_empty()).then_some(found)
    }
}
