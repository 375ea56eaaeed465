//! Table detection from run alignment.
//!
//! Runs are bucketed into rows by rounding `y` to a fixed tolerance. Inside
//! a row, runs that nearly touch are merged into one cell. A stretch of at
//! least `min_rows` consecutive rows that all have the same number of cells
//! (at least `min_columns`) and a left-aligned first cell is reported as a
//! table. Detection is advisory: the runs still go to the reconstructor.

use std::collections::BTreeMap;

use crate::model::{PageRuns, RunArena, Table, TextRun};

/// Table detector configuration.
#[derive(Debug, Clone)]
pub struct TableDetectorConfig {
    /// Bucket size in points for grouping runs into rows
    pub row_tolerance: f64,
    /// Minimum number of consecutive rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Horizontal gap (points) below which adjacent runs share a cell
    pub cell_gap: f64,
    /// Maximum drift (points) of the first cell's x across rows
    pub align_tolerance: f64,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 3.0,
            min_rows: 3,
            min_columns: 2,
            cell_gap: 10.0,
            align_tolerance: 5.0,
        }
    }
}

/// A row of merged cells.
#[derive(Debug, Clone)]
struct RowData {
    y: f64,
    /// `(x, text)` sorted by x.
    cells: Vec<(f64, String)>,
}

impl RowData {
    fn first_x(&self) -> f64 {
        self.cells.first().map_or(0.0, |(x, _)| *x)
    }
}

/// Detects tables in positioned runs.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect tables on every page.
    pub fn detect_all(&self, pages: &[PageRuns]) -> Vec<Table> {
        pages.iter().flat_map(|page| self.detect(page)).collect()
    }

    /// Detect tables on one page.
    pub fn detect(&self, page: &PageRuns) -> Vec<Table> {
        let min_runs = self.config.min_rows * self.config.min_columns;
        if page.runs.len() < min_runs {
            return vec![];
        }

        let rows = self.group_into_rows(&page.runs);
        let mut tables = Vec::new();
        for region in self.find_regions(&rows) {
            let rows = &rows[region];
            if is_list_pattern(rows) {
                log::debug!("TableDetector: page {}: rejecting list-like region", page.number);
                continue;
            }
            log::debug!(
                "TableDetector: page {}: {} x {} table at y={:.1}",
                page.number,
                rows.len(),
                rows[0].cells.len(),
                rows[0].y
            );
            tables.push(Table {
                page: page.number,
                top_y: rows[0].y,
                bottom_y: rows[rows.len() - 1].y,
                rows: rows
                    .iter()
                    .map(|r| r.cells.iter().map(|(_, text)| text.clone()).collect())
                    .collect(),
            });
        }
        tables
    }

    /// Rows in descending y, each with cells in ascending x.
    fn group_into_rows(&self, runs: &[TextRun]) -> Vec<RowData> {
        let arena = RunArena::new(runs);
        let mut buckets: BTreeMap<i64, Vec<&TextRun>> = BTreeMap::new();
        for run in arena.iter() {
            let key = (run.y / self.config.row_tolerance).round() as i64;
            buckets.entry(key).or_default().push(run);
        }

        buckets
            .into_iter()
            .rev()
            .map(|(_, mut members)| {
                members.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
                let y = members.iter().map(|r| r.y).sum::<f64>() / members.len() as f64;
                RowData {
                    y,
                    cells: self.merge_cells(&members),
                }
            })
            .collect()
    }

    fn merge_cells(&self, members: &[&TextRun]) -> Vec<(f64, String)> {
        let mut cells: Vec<(f64, String)> = Vec::new();
        let mut right = f64::NEG_INFINITY;
        for run in members {
            let text = run.text.trim();
            if text.is_empty() {
                continue;
            }
            match cells.last_mut() {
                Some((_, cell)) if run.x - right <= self.config.cell_gap => {
                    cell.push(' ');
                    cell.push_str(text);
                }
                _ => cells.push((run.x, text.to_string())),
            }
            right = right.max(run.right());
        }
        cells
    }

    /// Index ranges of consecutive rows with a consistent grid.
    fn find_regions(&self, rows: &[RowData]) -> Vec<std::ops::Range<usize>> {
        let mut regions = Vec::new();
        let mut start = 0;
        while start < rows.len() {
            let columns = rows[start].cells.len();
            if columns < self.config.min_columns {
                start += 1;
                continue;
            }
            let mut end = start + 1;
            while end < rows.len()
                && rows[end].cells.len() == columns
                && (rows[end].first_x() - rows[start].first_x()).abs() <= self.config.align_tolerance
            {
                end += 1;
            }
            if end - start >= self.config.min_rows {
                regions.push(start..end);
            }
            start = end;
        }
        regions
    }
}

/// Rows whose first cell is a bullet or number marker are a list, not a grid.
fn is_list_pattern(rows: &[RowData]) -> bool {
    let markers = rows
        .iter()
        .filter(|r| r.cells.first().is_some_and(|(_, t)| is_list_marker(t)))
        .count();
    markers * 2 >= rows.len()
}

/// Check if a text string looks like a list marker (number, bullet, etc.).
pub(crate) fn is_list_marker(text: &str) -> bool {
    is_bullet_marker(text) || is_number_marker(text)
}

/// Check if text is a bullet marker (•, -, etc.).
pub(crate) fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "►" | "■" | "●" | "◆" | "➤"
    )
}

/// Check if text is a number-style list marker (1., 2), a., etc.).
fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }

    if let Some(pos) = cleaned.find(|c: char| !c.is_ascii_digit()) {
        let (prefix, suffix) = cleaned.split_at(pos);
        if !prefix.is_empty() && (suffix == "." || suffix == ")") {
            return true;
        }
    }

    let chars: Vec<char> = cleaned.chars().collect();
    chars.len() == 2 && chars[0].is_alphabetic() && (chars[1] == '.' || chars[1] == ')')
}
