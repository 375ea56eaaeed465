//! Parsing options and configuration.

use chrono::NaiveDate;

/// Options for parsing resumes.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to run the table detector over positioned runs
    pub detect_tables: bool,

    /// Maximum number of pages to decode (0 = all)
    pub max_pages: u32,

    /// Whether batch helpers parse documents in parallel
    pub parallel: bool,

    /// Reference date for open-ended tenure (defaults to today)
    pub as_of: Option<NaiveDate>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages that fail to decode).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Limit the number of decoded pages.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Pin the reference date used for current roles.
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Whether a 1-based page number should be decoded.
    pub fn includes_page(&self, page: u32) -> bool {
        self.max_pages == 0 || page <= self.max_pages
    }

    /// The reference date, falling back to the local date.
    pub fn reference_date(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            detect_tables: true,
            max_pages: 0,
            parallel: true,
            as_of: None,
        }
    }
}

/// Error handling mode during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    #[default]
    Strict,
    /// Skip undecodable pages and continue
    Lenient,
}
