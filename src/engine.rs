//! The resume parser: decode, reconstruct, segment, extract, validate.

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::Dictionaries;
use crate::decoder::{normalize_text, DecodedContent, DecoderRegistry, DocumentDecoder};
use crate::detect::{resolve_media_type, MediaType};
use crate::error::Result;
use crate::extract::{ExtractionInput, ProfileExtractor};
use crate::model::{DocumentInfo, ParsedResume, RawDocument, StructuredText, Table};
use crate::parser::{
    LayoutReconstructor, LayoutThresholds, ParseOptions, SectionSegmenter, TableDetector,
    TableDetectorConfig,
};
use crate::validate::Validator;

/// Turns resume documents into profiles.
///
/// A parser holds only read-only state (options, compiled patterns and
/// decoders), so one instance can serve any number of threads.
///
/// # Example
///
/// ```no_run
/// use cvparse::{RawDocument, ResumeParser};
///
/// let parser = ResumeParser::new();
/// let raw = RawDocument::from_path("resume.pdf")?;
/// let parsed = parser.parse(&raw)?;
/// println!("{:?} ({})", parsed.profile.personal_info.name, parsed.validation.confidence);
/// # Ok::<(), cvparse::Error>(())
/// ```
pub struct ResumeParser {
    options: ParseOptions,
    registry: DecoderRegistry,
    layout: LayoutReconstructor,
    tables: TableDetector,
    segmenter: SectionSegmenter,
    extractor: ProfileExtractor,
    validator: Validator,
}

impl ResumeParser {
    /// Create a new parser with default options and the built-in dictionaries.
    pub fn new() -> Self {
        Self::build(&Dictionaries::default())
            .expect("built-in dictionaries contain only valid patterns")
    }

    /// Create a parser from custom dictionaries.
    pub fn with_dictionaries(dicts: &Dictionaries) -> Result<Self> {
        Self::build(dicts)
    }

    fn build(dicts: &Dictionaries) -> Result<Self> {
        Ok(Self {
            options: ParseOptions::default(),
            registry: DecoderRegistry::with_defaults(),
            layout: LayoutReconstructor::new(),
            tables: TableDetector::new(),
            segmenter: SectionSegmenter::new(dicts),
            extractor: ProfileExtractor::new(dicts)?,
            validator: Validator::new(dicts),
        })
    }

    /// Set parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Override the geometric thresholds of layout reconstruction.
    pub fn with_layout(mut self, thresholds: LayoutThresholds) -> Self {
        self.layout = LayoutReconstructor::with_thresholds(thresholds);
        self
    }

    /// Override table detection settings.
    pub fn with_table_config(mut self, config: TableDetectorConfig) -> Self {
        self.tables = TableDetector::with_config(config);
        self
    }

    /// Register an additional decoder, replacing the one for its media types.
    pub fn with_decoder(mut self, decoder: Arc<dyn DocumentDecoder>) -> Self {
        self.registry.register(decoder);
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse one document.
    pub fn parse(&self, raw: &RawDocument) -> Result<ParsedResume> {
        let media = resolve_media_type(raw.declared(), raw.data())?;
        let decoded = self.registry.decode(media, raw.data(), &self.options)?;
        log::debug!(
            "Decoded {} as {}: {} pages, {} runs",
            raw.source().map_or_else(|| "<bytes>".into(), |p| p.display().to_string()),
            media,
            decoded.info.page_count,
            decoded.run_count()
        );

        let (text, tables) = match decoded.content {
            DecodedContent::Positioned(pages) => {
                let tables = if self.options.detect_tables {
                    self.tables.detect_all(&pages)
                } else {
                    Vec::new()
                };
                (self.layout.reconstruct(&pages), tables)
            }
            DecodedContent::Flow(text) => (StructuredText::from_plain(text), Vec::new()),
        };

        Ok(self.finish(Some(media), decoded.info, text, tables))
    }

    /// Read and parse a file.
    pub fn parse_path<P: AsRef<Path>>(&self, path: P) -> Result<ParsedResume> {
        self.parse(&RawDocument::from_path(path)?)
    }

    /// Run the text pipeline on already-extracted plain text.
    pub fn parse_text(&self, text: &str) -> ParsedResume {
        let info = DocumentInfo {
            page_count: 1,
            ..Default::default()
        };
        let text = StructuredText::from_plain(normalize_text(text));
        self.finish(None, info, text, Vec::new())
    }

    /// Parse many independent documents; order of results follows `docs`.
    pub fn parse_batch(&self, docs: &[RawDocument]) -> Vec<Result<ParsedResume>> {
        if self.options.parallel {
            docs.par_iter().map(|doc| self.parse(doc)).collect()
        } else {
            docs.iter().map(|doc| self.parse(doc)).collect()
        }
    }

    fn finish(
        &self,
        media_type: Option<MediaType>,
        info: DocumentInfo,
        text: StructuredText,
        tables: Vec<Table>,
    ) -> ParsedResume {
        let segmentation = self.segmenter.segment(&text);
        let input = ExtractionInput::new(&segmentation, &tables);
        let mut profile = self.extractor.extract(&input);
        profile.experience_months =
            profile.total_experience_months(self.options.reference_date());
        let validation = self.validator.validate(text.as_str(), &profile);
        log::debug!(
            "Extracted profile: {} sections, {} tables, confidence {}",
            segmentation.sections().len(),
            tables.len(),
            validation.confidence
        );

        let sections = segmentation.into_sections();
        ParsedResume {
            media_type,
            info,
            text: text.into_string(),
            sections,
            tables,
            profile,
            validation,
        }
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DecodedDocument;
    use crate::error::Error;
    use crate::model::Quality;

    #[test]
    fn test_parse_text_pipeline() {
        let parsed = ResumeParser::new().parse_text(
            "Jane Doe\njane.doe@example.com\n9876543210\nSkills\nRust, Docker",
        );
        assert_eq!(parsed.media_type, None);
        assert_eq!(parsed.info.page_count, 1);
        assert_eq!(parsed.profile.personal_info.name.as_deref(), Some("Jane Doe"));
        assert_eq!(parsed.profile.skills, vec!["Rust", "Docker"]);
        assert_eq!(parsed.sections.len(), 1);
    }

    #[test]
    fn test_experience_months_use_reference_date() {
        let as_of = chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let parser = ResumeParser::new().with_options(ParseOptions::new().with_as_of(as_of));
        let parsed = parser.parse_text("Jane Doe\nExperience\nDeveloper at Acme\n2019 - Present");
        assert_eq!(parsed.profile.experience_months, Some(66));
    }

    #[test]
    fn test_tiny_text_is_low_confidence() {
        let parsed = ResumeParser::new().parse_text("Hi");
        assert!(parsed.validation.confidence <= 70);
        assert!(!parsed.validation.is_valid);
        assert_eq!(parsed.quality(), Quality::LowConfidence);
    }

    #[test]
    fn test_unsupported_bytes() {
        let err = ResumeParser::new()
            .parse(&RawDocument::undeclared(b"just some text".to_vec()))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    /// Hands back fixed flow text for any PDF.
    struct FixedText;

    impl DocumentDecoder for FixedText {
        fn media_types(&self) -> &[MediaType] {
            &[MediaType::Pdf]
        }

        fn name(&self) -> &str {
            "fixed"
        }

        fn decode(&self, _data: &[u8], _options: &ParseOptions) -> Result<DecodedDocument> {
            Ok(DecodedDocument {
                content: DecodedContent::Flow("Ada Lovelace\nada@example.com".into()),
                info: DocumentInfo {
                    page_count: 2,
                    ..Default::default()
                },
            })
        }
    }

    #[test]
    fn test_custom_decoder_and_batch_order() {
        let parser = ResumeParser::new()
            .with_decoder(Arc::new(FixedText))
            .with_options(ParseOptions::new().sequential());
        let docs = vec![
            RawDocument::new(b"%PDF-1.4".to_vec(), MediaType::Pdf),
            RawDocument::undeclared(b"nope".to_vec()),
        ];
        let results = parser.parse_batch(&docs);
        assert_eq!(results.len(), 2);

        let first = results[0].as_ref().unwrap();
        assert_eq!(first.media_type, Some(MediaType::Pdf));
        assert_eq!(first.info.page_count, 2);
        assert_eq!(first.profile.contact.email.as_deref(), Some("ada@example.com"));
        assert!(results[1].is_err());
    }

    #[test]
    fn test_invalid_dictionaries() {
        let dicts = Dictionaries {
            location_labels: vec!["(".into()],
            ..Default::default()
        };
        // Keywords are escaped, so this still builds.
        assert!(ResumeParser::with_dictionaries(&dicts).is_ok());

        let dicts = Dictionaries {
            degrees: vec![crate::config::DegreePattern {
                label: "X".into(),
                pattern: "[".into(),
            }],
            ..Default::default()
        };
        assert!(matches!(
            ResumeParser::with_dictionaries(&dicts),
            Err(Error::Config(_))
        ));
    }
}
