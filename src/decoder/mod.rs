//! Document decoders with a small plugin registry.
//!
//! A decoder turns the bytes of one media family into either positioned
//! runs (page-description documents) or flat flow text. Every failure of
//! the underlying library is converted to a crate [`Error`] before it
//! leaves `decode`.
//!
//! # Example
//!
//! ```no_run
//! use cvparse::decoder::DecoderRegistry;
//! use cvparse::{MediaType, ParseOptions};
//!
//! fn main() -> cvparse::Result<()> {
//!     let registry = DecoderRegistry::with_defaults();
//!     let bytes = std::fs::read("resume.pdf")?;
//!     let decoded = registry.decode(MediaType::Pdf, &bytes, &ParseOptions::default())?;
//!     println!("{} pages", decoded.info.page_count);
//!     Ok(())
//! }
//! ```

mod docx;
mod normalize;
mod pdf;

pub use docx::DocxDecoder;
pub use normalize::normalize_text;
pub use pdf::PdfDecoder;

use std::collections::HashMap;
use std::sync::Arc;

use crate::detect::MediaType;
use crate::error::{Error, Result};
use crate::model::{DocumentInfo, PageRuns};
use crate::parser::ParseOptions;

/// What a decoder produced.
#[derive(Debug, Clone)]
pub enum DecodedContent {
    /// Positioned runs, one entry per decoded page.
    Positioned(Vec<PageRuns>),
    /// Flat text with no geometry.
    Flow(String),
}

/// Decoder output plus document-level information.
#[derive(Debug, Clone)]
pub struct DecodedDocument {
    pub content: DecodedContent,
    pub info: DocumentInfo,
}

impl DecodedDocument {
    /// Total number of runs, or 0 for flow content.
    pub fn run_count(&self) -> usize {
        match &self.content {
            DecodedContent::Positioned(pages) => pages.iter().map(|p| p.runs.len()).sum(),
            DecodedContent::Flow(_) => 0,
        }
    }
}

/// Trait for document decoders.
///
/// Implement this trait to add support for a new document format.
pub trait DocumentDecoder: Send + Sync {
    /// Media types this decoder accepts.
    fn media_types(&self) -> &[MediaType];

    /// Get the name of this decoder.
    fn name(&self) -> &str;

    /// Decode raw bytes.
    fn decode(&self, data: &[u8], options: &ParseOptions) -> Result<DecodedDocument>;

    /// Check if this decoder handles the given media type.
    fn supports(&self, media: MediaType) -> bool {
        self.media_types().contains(&media)
    }
}

/// Registry mapping media types to decoders.
pub struct DecoderRegistry {
    decoders: HashMap<MediaType, Arc<dyn DocumentDecoder>>,
}

impl DecoderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Create a registry with the PDF and Word decoders.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfDecoder::new()));
        registry.register(Arc::new(DocxDecoder::new()));
        registry
    }

    /// Register a decoder for all its media types, replacing earlier ones.
    pub fn register(&mut self, decoder: Arc<dyn DocumentDecoder>) {
        for media in decoder.media_types() {
            self.decoders.insert(*media, decoder.clone());
        }
    }

    /// Get the decoder for a media type.
    pub fn get(&self, media: MediaType) -> Option<Arc<dyn DocumentDecoder>> {
        self.decoders.get(&media).cloned()
    }

    /// Check if a media type can be decoded.
    pub fn supports(&self, media: MediaType) -> bool {
        self.decoders.contains_key(&media)
    }

    /// Decode bytes with the decoder registered for `media`.
    pub fn decode(
        &self,
        media: MediaType,
        data: &[u8],
        options: &ParseOptions,
    ) -> Result<DecodedDocument> {
        let decoder = self
            .get(media)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no decoder for {}", media)))?;
        log::debug!("decoding {} bytes with {} decoder", data.len(), decoder.name());
        decoder.decode(data, options)
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
