//! Positioned text runs decoded from page-description documents.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Font weight as far as the decoder can tell from the font name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeightHint {
    Normal,
    Bold,
    #[default]
    Unknown,
}

impl FontWeightHint {
    /// Classify a PDF base font name such as `Helvetica-Bold` or `ABCDEE+Calibri`.
    pub fn from_font_name(font_name: &str) -> Self {
        if font_name.is_empty() {
            return FontWeightHint::Unknown;
        }
        let lower = font_name.to_lowercase();
        if ["bold", "black", "heavy", "semibold", "demi"]
            .iter()
            .any(|w| lower.contains(w))
        {
            FontWeightHint::Bold
        } else {
            FontWeightHint::Normal
        }
    }
}

/// A string fragment with its page coordinates.
///
/// Coordinates are in page space: origin bottom-left, `y` grows upward,
/// `y` is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub weight: FontWeightHint,
}

impl TextRun {
    /// Create a run with unknown weight.
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
            weight: FontWeightHint::Unknown,
        }
    }

    /// Build a run from a decoded show-text operation.
    ///
    /// Glyph widths are not resolved, so width is estimated at half the font
    /// size per character, the same fallback the line builder uses for spacing.
    pub fn from_font(text: String, x: f64, y: f64, font_size: f64, font_name: &str) -> Self {
        let chars = text.chars().count() as f64;
        Self {
            width: chars * font_size * 0.5,
            height: font_size,
            weight: FontWeightHint::from_font_name(font_name),
            text,
            x,
            y,
        }
    }

    /// Set the weight hint.
    pub fn with_weight(mut self, weight: FontWeightHint) -> Self {
        self.weight = weight;
        self
    }

    /// Right edge of the run.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeightHint::Bold
    }
}

/// All runs of one decoded page plus its geometry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRuns {
    /// 1-based page number.
    pub number: u32,
    pub width: f64,
    pub height: f64,
    pub runs: Vec<TextRun>,
}

impl PageRuns {
    pub fn new(number: u32, width: f64, height: f64) -> Self {
        Self {
            number,
            width,
            height,
            runs: Vec::new(),
        }
    }

    pub fn push(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Runs of a page held in place with a separately sorted index.
///
/// Reconstruction and table detection walk `order` instead of moving runs
/// around, so both passes can borrow the same page without cloning.
#[derive(Debug)]
pub struct RunArena<'a> {
    runs: &'a [TextRun],
    order: Vec<usize>,
}

impl<'a> RunArena<'a> {
    /// Index `runs` in reading order: descending `y`, then ascending `x`.
    pub fn new(runs: &'a [TextRun]) -> Self {
        let mut order: Vec<usize> = (0..runs.len()).collect();
        order.sort_by(|&a, &b| reading_order(&runs[a], &runs[b]));
        Self { runs, order }
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Run by arena index.
    pub fn get(&self, index: usize) -> &'a TextRun {
        &self.runs[index]
    }

    /// Sorted arena indices.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Runs in reading order.
    pub fn iter(&self) -> impl Iterator<Item = &'a TextRun> + '_ {
        self.order.iter().map(move |&i| &self.runs[i])
    }
}

/// Top-to-bottom, left-to-right comparison of two runs.
pub fn reading_order(a: &TextRun, b: &TextRun) -> Ordering {
    b.y.partial_cmp(&a.y)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}
