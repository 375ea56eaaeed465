//! Table types.

use serde::{Deserialize, Serialize};

/// A grid recovered from aligned runs. Row-major; cells in ascending `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Page the table was found on (1-based).
    pub page: u32,
    /// Baseline of the first row.
    pub top_y: f64,
    /// Baseline of the last row.
    pub bottom_y: f64,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("  "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table {
            page: 1,
            top_y: 500.0,
            bottom_y: 470.0,
            rows: vec![
                vec!["Languages".into(), "Rust".into(), "Go".into()],
                vec!["Databases".into(), "PostgreSQL".into()],
            ],
        }
    }

    #[test]
    fn test_table_dimensions() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_table_plain_text() {
        assert_eq!(
            sample().plain_text(),
            "Languages  Rust  Go\nDatabases  PostgreSQL"
        );
        assert_eq!(sample().cells().count(), 5);
    }
}
