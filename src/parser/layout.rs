//! Layout reconstruction for positioned text runs.
//!
//! Runs are walked in reading order (descending `y`, ascending `x`) and the
//! gap to the previous run decides which separator goes between them:
//!
//! | transition | condition                               | separator |
//! |------------|-----------------------------------------|-----------|
//! | paragraph  | `|dy| > paragraph_factor × height`      | `"\n\n"`  |
//! | line       | `|dy| > line_factor × height`           | `"\n"`    |
//! | column     | `x > previous right edge + column_gap`  | `"  "`    |
//! | word       | otherwise                               | `" "`     |
//!
//! `height` is the current run's height. While building the text the
//! reconstructor also records, per line, whether most of its characters are
//! bold and their average height; the segmenter uses both as header signals.

use crate::model::{LineStyle, PageRuns, RunArena, StructuredText, TextLine, TextRun};

/// Gap thresholds for break classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutThresholds {
    /// Vertical gap, in run heights, that starts a new line.
    pub line_factor: f64,
    /// Vertical gap, in run heights, that starts a new paragraph.
    pub paragraph_factor: f64,
    /// Horizontal gap in points that marks a column jump.
    pub column_gap: f64,
}

impl Default for LayoutThresholds {
    fn default() -> Self {
        Self {
            line_factor: 1.5,
            paragraph_factor: 3.0,
            column_gap: 5.0,
        }
    }
}

/// How one run follows the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Paragraph,
    Line,
    Column,
    Word,
}

impl Transition {
    /// The separator inserted for this transition.
    pub fn separator(self) -> &'static str {
        match self {
            Transition::Paragraph => "\n\n",
            Transition::Line => "\n",
            Transition::Column => "  ",
            Transition::Word => " ",
        }
    }
}

/// Rebuilds reading-order text from positioned runs.
#[derive(Debug, Clone, Default)]
pub struct LayoutReconstructor {
    thresholds: LayoutThresholds,
}

impl LayoutReconstructor {
    /// Create a reconstructor with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconstructor with custom thresholds.
    pub fn with_thresholds(thresholds: LayoutThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &LayoutThresholds {
        &self.thresholds
    }

    /// Classify the gap between `prev` and `run`.
    pub fn classify(&self, prev: &TextRun, run: &TextRun) -> Transition {
        let dy = (run.y - prev.y).abs();
        if dy > self.thresholds.paragraph_factor * run.height {
            Transition::Paragraph
        } else if dy > self.thresholds.line_factor * run.height {
            Transition::Line
        } else if run.x > prev.right() + self.thresholds.column_gap {
            Transition::Column
        } else {
            Transition::Word
        }
    }

    /// Reconstruct one page.
    pub fn reconstruct_page(&self, runs: &[TextRun]) -> StructuredText {
        let arena = RunArena::new(runs);
        let mut builder = LineBuilder::default();
        let mut prev: Option<&TextRun> = None;

        for run in arena.iter() {
            if let Some(prev) = prev {
                match self.classify(prev, run) {
                    Transition::Paragraph => builder.break_paragraph(),
                    Transition::Line => builder.break_line(),
                    t => builder.push_separator(t.separator()),
                }
            }
            builder.push_run(run);
            prev = Some(run);
        }

        builder.finish()
    }

    /// Reconstruct all pages, joined by paragraph breaks.
    pub fn reconstruct(&self, pages: &[PageRuns]) -> StructuredText {
        let mut text = StructuredText::default();
        for page in pages.iter().filter(|p| !p.is_empty()) {
            text.append_page(self.reconstruct_page(&page.runs));
        }
        log::debug!(
            "reconstructed {} pages into {} lines",
            pages.len(),
            text.lines().len()
        );
        text
    }
}

/// Accumulates text and per-line style.
#[derive(Default)]
struct LineBuilder {
    text: String,
    lines: Vec<TextLine>,
    line_start: usize,
    chars: usize,
    bold_chars: usize,
    weighted_height: f64,
}

impl LineBuilder {
    fn push_run(&mut self, run: &TextRun) {
        let n = run.text.chars().count();
        self.text.push_str(&run.text);
        self.chars += n;
        if run.is_bold() {
            self.bold_chars += n;
        }
        self.weighted_height += run.height * n as f64;
    }

    fn push_separator(&mut self, separator: &str) {
        self.text.push_str(separator);
    }

    fn break_line(&mut self) {
        self.close_line();
        self.text.push('\n');
        self.line_start = self.text.len();
    }

    fn break_paragraph(&mut self) {
        self.break_line();
        // The empty line between the two newlines.
        self.close_line();
        self.text.push('\n');
        self.line_start = self.text.len();
    }

    fn close_line(&mut self) {
        let style = (self.chars > 0).then(|| LineStyle {
            bold: self.bold_chars * 2 > self.chars,
            height: self.weighted_height / self.chars as f64,
        });
        self.lines.push(TextLine {
            start: self.line_start,
            end: self.text.len(),
            style,
        });
        self.chars = 0;
        self.bold_chars = 0;
        self.weighted_height = 0.0;
    }

    fn finish(mut self) -> StructuredText {
        if !self.text.is_empty() {
            self.close_line();
        }
        StructuredText::from_parts(self.text, self.lines)
    }
}
