//! Certification lines.

use super::{strip_bullet, ExtractionInput, FieldExtractor};
use crate::config::Dictionaries;
use crate::model::SectionKind;

/// Lines of the Certifications section, or keyword-bearing lines anywhere
/// when the section is missing.
#[derive(Debug, Clone)]
pub struct CertificationExtractor {
    keywords: Vec<String>,
}

impl CertificationExtractor {
    pub fn new(dicts: &Dictionaries) -> Self {
        Self {
            keywords: dicts
                .certification_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn mentions_certification(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

fn collect<'l>(lines: impl Iterator<Item = &'l str>) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for line in lines.map(strip_bullet) {
        if (3..=120).contains(&line.chars().count()) && !found.iter().any(|f| f == line) {
            found.push(line.to_string());
        }
    }
    found
}

impl FieldExtractor for CertificationExtractor {
    type Output = Vec<String>;

    fn extract(&self, input: &ExtractionInput<'_>) -> Option<Vec<String>> {
        let seg = input.segmentation;
        let found = if seg.has(SectionKind::Certifications) {
            collect(seg.lines_of(SectionKind::Certifications).map(|l| l.text))
        } else {
            collect(
                input
                    .lines()
                    .iter()
                    .map(|l| l.text)
                    .filter(|t| self.mentions_certification(t)),
            )
        };
        (!found.is_empty()).then_some(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructuredText;
    use crate::parser::SectionSegmenter;

    fn certifications_of(text: &str) -> Option<Vec<String>> {
        let dicts = Dictionaries::default();
        let text = StructuredText::from_plain(text);
        let seg = SectionSegmenter::new(&dicts).segment(&text);
        CertificationExtractor::new(&dicts).extract(&ExtractionInput::new(&seg, &[]))
    }

    #[test]
    fn test_section_lines() {
        assert_eq!(
            certifications_of(
                "Certifications\n• AWS Solutions Architect\n- CKA\n\nOK\n• AWS Solutions Architect\nSkills\nRust"
            ),
            Some(vec!["AWS Solutions Architect".to_string(), "CKA".to_string()])
        );
    }

    #[test]
    fn test_keyword_fallback() {
        assert_eq!(
            certifications_of("Jane Doe\nGoogle Certified Data Engineer, 2022\nLikes hiking"),
            Some(vec!["Google Certified Data Engineer, 2022".to_string()])
        );
        assert_eq!(certifications_of("Jane Doe\nLikes hiking"), None);
    }
}
