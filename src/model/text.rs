//! Reading-order text with per-line style signals.

use serde::{Deserialize, Serialize};

/// Style of a reconstructed line, available only for page-description input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// More than half of the line's characters come from bold runs.
    pub bold: bool,
    /// Character-weighted average run height.
    pub height: f64,
}

/// Byte range of one line inside [`StructuredText`], newline excluded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    pub start: usize,
    pub end: usize,
    pub style: Option<LineStyle>,
}

/// The engine's primary text artifact: a single string with inserted
/// separators plus the line table the segmenter walks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredText {
    text: String,
    lines: Vec<TextLine>,
}

impl StructuredText {
    /// Wrap flow text; every `\n`-delimited line is unstyled.
    pub fn from_plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                lines.push(TextLine {
                    start,
                    end: i,
                    style: None,
                });
                start = i + 1;
            }
        }
        lines.push(TextLine {
            start,
            end: text.len(),
            style: None,
        });
        Self { text, lines }
    }

    pub(crate) fn from_parts(text: String, lines: Vec<TextLine>) -> Self {
        debug_assert!(lines.iter().all(|l| l.start <= l.end && l.end <= text.len()));
        Self { text, lines }
    }

    /// Append another page, separated by a paragraph break.
    pub fn append_page(&mut self, page: StructuredText) {
        if page.text.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push('\n');
            let blank = self.text.len();
            self.lines.push(TextLine {
                start: blank,
                end: blank,
                style: None,
            });
            self.text.push('\n');
        }
        let offset = self.text.len();
        self.text.push_str(&page.text);
        self.lines.extend(page.lines.into_iter().map(|l| TextLine {
            start: l.start + offset,
            end: l.end + offset,
            style: l.style,
        }));
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// Text of a line.
    pub fn line_text(&self, line: &TextLine) -> &str {
        &self.text[line.start..line.end]
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Median height over styled, non-blank lines.
    pub fn median_line_height(&self) -> Option<f64> {
        let mut heights: Vec<f64> = self
            .lines
            .iter()
            .filter(|l| l.end > l.start)
            .filter_map(|l| l.style.map(|s| s.height))
            .collect();
        if heights.is_empty() {
            return None;
        }
        heights.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = heights.len() / 2;
        Some(if heights.len() % 2 == 0 {
            (heights[mid - 1] + heights[mid]) / 2.0
        } else {
            heights[mid]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_plain_lines() {
        let text = StructuredText::from_plain("Jane Doe\n\nSkills");
        let lines: Vec<&str> = text.lines().iter().map(|l| text.line_text(l)).collect();
        assert_eq!(lines, vec!["Jane Doe", "", "Skills"]);
        assert!(text.lines().iter().all(|l| l.style.is_none()));
        assert_eq!(text.median_line_height(), None);
    }

    #[test]
    fn test_append_page_shifts_offsets() {
        let mut doc = StructuredText::from_plain("page one");
        doc.append_page(StructuredText::from_plain("page two"));

        assert_eq!(doc.as_str(), "page one\n\npage two");
        let last = doc.lines().last().unwrap();
        assert_eq!(doc.line_text(last), "page two");
        assert_eq!(doc.lines().len(), 3);
    }

    #[test]
    fn test_append_to_empty_has_no_leading_break() {
        let mut doc = StructuredText::default();
        doc.append_page(StructuredText::from_plain("only"));
        assert_eq!(doc.as_str(), "only");
    }

    #[test]
    fn test_median_line_height() {
        let style = |h| Some(LineStyle { bold: false, height: h });
        let text = StructuredText::from_parts(
            "a\nb\nc".to_string(),
            vec![
                TextLine { start: 0, end: 1, style: style(10.0) },
                TextLine { start: 2, end: 3, style: style(14.0) },
                TextLine { start: 4, end: 5, style: style(10.0) },
            ],
        );
        assert_eq!(text.median_line_height(), Some(10.0));
    }
}
