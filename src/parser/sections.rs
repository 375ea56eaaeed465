//! Section segmentation.
//!
//! A line is a header when it contains a section keyword, is shorter than
//! 30 characters, has at most three words and looks like a header: bold or
//! taller than the median line when style is known, free of trailing
//! sentence punctuation when it is not.
//!
//! Boundaries come from a two-state machine over the lines:
//!
//! ```text
//! Idle ──header──▶ InSection(k) ──header──▶ InSection(k') (closes k)
//! ```
//!
//! Each section runs from its header line to the next header of any kind,
//! or to the end of the text, so consecutive sections tile the text.

use std::ops::Range;

use crate::config::Dictionaries;
use crate::model::{LineStyle, Section, SectionKind, StructuredText};

const MAX_HEADER_CHARS: usize = 30;
const MAX_HEADER_WORDS: usize = 3;

/// One line of the text with its header classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedLine<'t> {
    pub text: &'t str,
    /// Byte offset of the line start.
    pub start: usize,
    /// Byte offset of the line end, newline excluded.
    pub end: usize,
    pub header: Option<SectionKind>,
}

impl ScannedLine<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A section that has been opened but not yet closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSection {
    pub kind: SectionKind,
    /// Index of the header line.
    pub header_line: usize,
}

/// Segmenter state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    Idle,
    InSection(OpenSection),
}

/// Advance the machine over line `index`.
///
/// Returns the next state and the section closed by this line, if any.
pub fn step(
    state: SegmentState,
    index: usize,
    header: Option<SectionKind>,
) -> (SegmentState, Option<OpenSection>) {
    let Some(kind) = header else {
        return (state, None);
    };
    let opened = SegmentState::InSection(OpenSection {
        kind,
        header_line: index,
    });
    match state {
        SegmentState::Idle => (opened, None),
        SegmentState::InSection(open) => (opened, Some(open)),
    }
}

/// Result of segmenting one document.
#[derive(Debug, Clone)]
pub struct Segmentation<'t> {
    text: &'t str,
    lines: Vec<ScannedLine<'t>>,
    sections: Vec<Section>,
    /// Line indices covered by each section's content.
    spans: Vec<Range<usize>>,
}

impl<'t> Segmentation<'t> {
    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn lines(&self) -> &[ScannedLine<'t>] {
        &self.lines
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    /// Whether a section of this kind was found.
    pub fn has(&self, kind: SectionKind) -> bool {
        self.sections.iter().any(|s| s.name == kind)
    }

    /// Content lines of every section of `kind`, in document order.
    pub fn lines_of(&self, kind: SectionKind) -> impl Iterator<Item = &ScannedLine<'t>> + '_ {
        self.sections
            .iter()
            .zip(&self.spans)
            .filter(move |(s, _)| s.name == kind)
            .flat_map(move |(_, span)| self.lines[span.clone()].iter())
    }

    /// Content of all sections of `kind`, joined by newlines.
    pub fn content_of(&self, kind: SectionKind) -> Option<String> {
        let parts: Vec<&str> = self
            .sections
            .iter()
            .filter(|s| s.name == kind)
            .map(|s| s.content(self.text))
            .collect();
        (!parts.is_empty()).then(|| parts.join("\n"))
    }
}

/// Locates section headers and spans.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    keywords: Vec<(SectionKind, Vec<String>)>,
}

impl SectionSegmenter {
    /// Create a segmenter from the dictionary's section keywords.
    pub fn new(dicts: &Dictionaries) -> Self {
        let keywords = SectionKind::ALL
            .iter()
            .map(|&kind| {
                let words = dicts
                    .keywords_for(kind)
                    .iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (kind, words)
            })
            .collect();
        Self { keywords }
    }

    /// Section family whose keyword appears in `line`.
    ///
    /// When keywords of several families match, the one starting latest in
    /// the line wins ("Professional Certifications" is a certifications
    /// header); remaining ties go to the earlier family.
    pub fn keyword_kind(&self, line: &str) -> Option<SectionKind> {
        let lower = line.to_lowercase();
        let mut best: Option<(usize, SectionKind)> = None;
        for (kind, words) in &self.keywords {
            let pos = words.iter().filter_map(|w| lower.rfind(w.as_str())).max();
            if let Some(pos) = pos {
                if best.map_or(true, |(p, _)| pos > p) {
                    best = Some((pos, *kind));
                }
            }
        }
        best.map(|(_, kind)| kind)
    }

    /// Classify one line.
    pub fn header_kind(
        &self,
        line: &str,
        style: Option<LineStyle>,
        median_height: Option<f64>,
    ) -> Option<SectionKind> {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.chars().count() >= MAX_HEADER_CHARS
            || trimmed.split_whitespace().count() > MAX_HEADER_WORDS
        {
            return None;
        }

        let looks_like_header = match style {
            Some(style) => style.bold || median_height.is_some_and(|m| style.height > m),
            None => !trimmed.ends_with(['.', ',', ';']),
        };
        if !looks_like_header {
            return None;
        }

        self.keyword_kind(trimmed)
    }

    /// Segment a document.
    pub fn segment<'t>(&self, text: &'t StructuredText) -> Segmentation<'t> {
        let median = text.median_line_height();
        let lines: Vec<ScannedLine<'t>> = text
            .lines()
            .iter()
            .map(|l| {
                let line = text.line_text(l);
                ScannedLine {
                    text: line,
                    start: l.start,
                    end: l.end,
                    header: self.header_kind(line, l.style, median),
                }
            })
            .collect();

        let mut sections = Vec::new();
        let mut spans = Vec::new();
        let mut close = |open: OpenSection, end_line: usize, end_offset: usize| {
            let header = &lines[open.header_line];
            log::debug!("section {} at offset {}: {:?}", open.kind, header.start, header.text);
            sections.push(Section {
                name: open.kind,
                header: header.text.trim().to_string(),
                start_offset: header.start,
                content_start: (header.end + 1).min(end_offset),
                end_offset,
            });
            spans.push(open.header_line + 1..end_line);
        };

        let mut state = SegmentState::Idle;
        for (index, line) in lines.iter().enumerate() {
            let (next, closed) = step(state, index, line.header);
            if let Some(open) = closed {
                close(open, index, line.start);
            }
            state = next;
        }
        if let SegmentState::InSection(open) = state {
            close(open, lines.len(), text.len());
        }

        Segmentation {
            text: text.as_str(),
            lines,
            sections,
            spans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextLine;

    fn segmenter() -> SectionSegmenter {
        SectionSegmenter::new(&Dictionaries::default())
    }

    #[test]
    fn test_step_transitions() {
        let (state, closed) = step(SegmentState::Idle, 0, None);
        assert_eq!(state, SegmentState::Idle);
        assert!(closed.is_none());

        let (state, closed) = step(state, 2, Some(SectionKind::Skills));
        assert!(closed.is_none());
        let (state, closed) = step(state, 5, Some(SectionKind::Education));
        assert_eq!(
            closed,
            Some(OpenSection {
                kind: SectionKind::Skills,
                header_line: 2
            })
        );
        assert_eq!(
            state,
            SegmentState::InSection(OpenSection {
                kind: SectionKind::Education,
                header_line: 5
            })
        );
    }

    #[test]
    fn test_header_rules_on_flow_text() {
        let s = segmenter();
        assert_eq!(s.header_kind("EXPERIENCE", None, None), Some(SectionKind::Experience));
        assert_eq!(s.header_kind("Work Experience:", None, None), Some(SectionKind::Experience));
        assert_eq!(s.header_kind("  Technical Skills  ", None, None), Some(SectionKind::Skills));
        // Too many words.
        assert_eq!(s.header_kind("My work at the bank", None, None), None);
        // Sentence punctuation.
        assert_eq!(s.header_kind("Loves teamwork.", None, None), None);
        // Too long.
        assert_eq!(s.header_kind("Educationalinstitutionsandmore", None, None), None);
        assert_eq!(s.header_kind("Jane Doe", None, None), None);
    }

    #[test]
    fn test_latest_keyword_wins() {
        let s = segmenter();
        assert_eq!(
            s.keyword_kind("Professional Certifications"),
            Some(SectionKind::Certifications)
        );
        assert_eq!(s.keyword_kind("Academic Projects"), Some(SectionKind::Projects));
        assert_eq!(s.keyword_kind("Work Experience"), Some(SectionKind::Experience));
    }

    #[test]
    fn test_header_rules_with_style() {
        let s = segmenter();
        let plain = LineStyle { bold: false, height: 10.0 };
        let bold = LineStyle { bold: true, height: 10.0 };
        let large = LineStyle { bold: false, height: 14.0 };
        assert_eq!(s.header_kind("Skills", Some(plain), Some(10.0)), None);
        assert_eq!(s.header_kind("Skills", Some(bold), Some(10.0)), Some(SectionKind::Skills));
        assert_eq!(s.header_kind("Skills", Some(large), Some(10.0)), Some(SectionKind::Skills));
    }

    #[test]
    fn test_sections_tile_text() {
        let text = StructuredText::from_plain(
            "Jane Doe\nSKILLS\nRust, Python\nEDUCATION\nB.Tech 2019\nEXPERIENCE\nDev at Acme",
        );
        let seg = segmenter().segment(&text);
        let sections = seg.sections();
        assert_eq!(sections.len(), 3);
        for pair in sections.windows(2) {
            assert_eq!(pair[0].end_offset, pair[1].start_offset);
        }
        assert_eq!(sections.last().unwrap().end_offset, text.len());
        assert_eq!(sections[0].header, "SKILLS");
        assert_eq!(sections[0].content(text.as_str()), "Rust, Python\n");
        assert_eq!(sections[2].content(text.as_str()), "Dev at Acme");

        let skill_lines: Vec<&str> = seg.lines_of(SectionKind::Skills).map(|l| l.text).collect();
        assert_eq!(skill_lines, vec!["Rust, Python"]);
    }

    #[test]
    fn test_no_headers_no_sections() {
        let text = StructuredText::from_plain("Jane Doe\njane@example.com");
        let seg = segmenter().segment(&text);
        assert!(seg.sections().is_empty());
        assert!(!seg.has(SectionKind::Skills));
        assert_eq!(seg.content_of(SectionKind::Skills), None);
    }

    #[test]
    fn test_repeated_kind_content_joined() {
        let text = StructuredText::from_plain("Skills\nRust\nProjects\nDemo\nSkills\nGo");
        let seg = segmenter().segment(&text);
        assert_eq!(seg.content_of(SectionKind::Skills).unwrap(), "Rust\n\nGo");
    }

    #[test]
    fn test_header_at_end_has_empty_content() {
        let text = StructuredText::from_plain("Intro line\nSkills");
        let seg = segmenter().segment(&text);
        let section = &seg.sections()[0];
        assert!(section.is_empty());
        assert_eq!(section.content(text.as_str()), "");
    }

    #[test]
    fn test_styled_segmentation_uses_median() {
        let bold = Some(LineStyle { bold: true, height: 10.0 });
        let body = Some(LineStyle { bold: false, height: 10.0 });
        let text = StructuredText::from_parts(
            "Skills\nRust\nskills".to_string(),
            vec![
                TextLine { start: 0, end: 6, style: bold },
                TextLine { start: 7, end: 11, style: body },
                TextLine { start: 12, end: 18, style: body },
            ],
        );
        let seg = segmenter().segment(&text);
        assert_eq!(seg.sections().len(), 1);
        assert_eq!(seg.sections()[0].end_offset, 18);
    }
}
