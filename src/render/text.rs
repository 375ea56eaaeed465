//! Plain-text summaries for terminals and logs.

use std::fmt::Write;

use crate::model::{ParsedResume, ValidationResult};

/// Longest header excerpt shown per section.
const PREVIEW_CHARS: usize = 48;

/// One line per detected section: kind, byte range and the first content line.
pub fn sections_outline(parsed: &ParsedResume) -> String {
    let mut out = String::new();
    if parsed.sections.is_empty() {
        out.push_str("(no sections detected)\n");
        return out;
    }
    for section in &parsed.sections {
        let preview: String = parsed
            .section_text(section)
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
            .chars()
            .take(PREVIEW_CHARS)
            .collect();
        let _ = writeln!(
            out,
            "{:<15} [{}..{})  {:?}  {}",
            section.name.as_str(),
            section.start_offset,
            section.end_offset,
            section.header,
            preview
        );
    }
    out
}

/// Confidence line followed by one line per warning.
pub fn validation_report(validation: &ValidationResult) -> String {
    let mut out = format!(
        "confidence: {}/100 ({})\n",
        validation.confidence,
        if validation.is_valid { "valid" } else { "low confidence" }
    );
    for warning in &validation.warnings {
        let _ = writeln!(out, "  - {}", warning);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentInfo, ExtractedProfile, Section, SectionKind};

    fn parsed(text: &str, sections: Vec<Section>) -> ParsedResume {
        ParsedResume {
            media_type: None,
            info: DocumentInfo::default(),
            text: text.to_string(),
            sections,
            tables: vec![],
            profile: ExtractedProfile::default(),
            validation: ValidationResult::default(),
        }
    }

    #[test]
    fn test_sections_outline() {
        let text = "Skills\nRust, Go\n";
        let outline = sections_outline(&parsed(
            text,
            vec![Section {
                name: SectionKind::Skills,
                header: "Skills".into(),
                start_offset: 0,
                content_start: 7,
                end_offset: text.len(),
            }],
        ));
        assert!(outline.starts_with("skills"));
        assert!(outline.contains("[0..16)"));
        assert!(outline.contains("Rust, Go"));
    }

    #[test]
    fn test_empty_outline() {
        assert_eq!(sections_outline(&parsed("x", vec![])), "(no sections detected)\n");
    }

    #[test]
    fn test_validation_report() {
        let report = validation_report(&ValidationResult {
            confidence: 40,
            is_valid: false,
            warnings: vec!["Email address not found".into()],
        });
        assert_eq!(
            report,
            "confidence: 40/100 (low confidence)\n  - Email address not found\n"
        );
    }
}
