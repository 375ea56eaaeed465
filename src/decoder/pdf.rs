//! PDF decoder producing positioned text runs.
//!
//! Interprets the text operators of each page's content stream and records
//! one run per show-text operation with its text-space origin and effective
//! font size. Graphics state (`cm`, `q`/`Q`) is not tracked.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::{normalize_text, DecodedContent, DecodedDocument, DocumentDecoder};
use crate::detect::MediaType;
use crate::error::{Error, Result};
use crate::model::{DocumentInfo, PageRuns, TextRun};
use crate::parser::{ErrorMode, ParseOptions};

/// Letter size, used when a page has no readable MediaBox.
const DEFAULT_PAGE_SIZE: (f64, f64) = (612.0, 792.0);
/// Leading used by `T*` when the stream never set `TL`.
const DEFAULT_LEADING: f64 = 12.0;
/// TJ adjustment (thousandths of an em) treated as a word space.
const TJ_SPACE_THRESHOLD: f64 = 200.0;

/// Decoder for page-description documents.
#[derive(Debug, Clone, Default)]
pub struct PdfDecoder;

impl PdfDecoder {
    /// Create a new PDF decoder.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for PdfDecoder {
    fn media_types(&self) -> &[MediaType] {
        &[MediaType::Pdf]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn decode(&self, data: &[u8], options: &ParseOptions) -> Result<DecodedDocument> {
        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            log::debug!("PDF has an Encrypt dictionary; relying on empty user password");
        }

        let page_ids = doc.get_pages();
        let mut info = extract_info(&doc);
        info.page_count = page_ids.len() as u32;

        let interpreter = PageInterpreter::new(&doc);
        let mut pages = Vec::with_capacity(page_ids.len());
        for (number, page_id) in page_ids {
            if !options.includes_page(number) {
                break;
            }
            match interpreter.page_runs(number, page_id) {
                Ok(page) => {
                    log::debug!("page {}: {} text runs", number, page.runs.len());
                    pages.push(page);
                }
                Err(e) if options.error_mode == ErrorMode::Lenient => {
                    log::warn!("skipping page {}: {}", number, e);
                }
                Err(e) => return Err(e),
            }
        }

        if pages.iter().all(PageRuns::is_empty) {
            return Err(Error::CorruptDocument("no extractable text".to_string()));
        }

        Ok(DecodedDocument {
            content: DecodedContent::Positioned(pages),
            info,
        })
    }
}

/// Walks page content streams of one loaded document.
struct PageInterpreter<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> PageInterpreter<'a> {
    fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    fn page_runs(&self, number: u32, page_id: ObjectId) -> Result<PageRuns> {
        let (width, height) = self.page_size(page_id);
        let mut page = PageRuns::new(number, width, height);

        let fonts = self.doc.get_page_fonts(page_id)?;
        let Some(content) = self.page_content(page_id)? else {
            return Ok(page);
        };
        page.runs = self.interpret(&content, &fonts)?;
        Ok(page)
    }

    fn page_size(&self, page_id: ObjectId) -> (f64, f64) {
        let media_box = self
            .doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|dict| dict.get(b"MediaBox").ok())
            .and_then(|obj| obj.as_array().ok());
        match media_box {
            Some(array) if array.len() >= 4 => {
                let width = get_number(&array[2]).unwrap_or(DEFAULT_PAGE_SIZE.0);
                let height = get_number(&array[3]).unwrap_or(DEFAULT_PAGE_SIZE.1);
                (width, height)
            }
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    /// Concatenated, decompressed content streams; `None` for a blank page.
    fn page_content(&self, page_id: ObjectId) -> Result<Option<Vec<u8>>> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(None);
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => Ok(Some(s.decompressed_content()?)),
                _ => Err(Error::CorruptDocument("invalid content stream".to_string())),
            },
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(Some(content))
            }
            _ => Err(Error::CorruptDocument("invalid content stream".to_string())),
        }
    }

    fn interpret(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    ) -> Result<Vec<TextRun>> {
        let content = lopdf::content::Content::decode(content)?;

        let mut runs = Vec::new();
        let mut font_key: Vec<u8> = Vec::new();
        let mut font_name = String::new();
        let mut font_size = 12.0;
        let mut leading: Option<f64> = None;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in &content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                }
                "ET" => in_text = false,
                "Tf" if op.operands.len() >= 2 => {
                    if let Object::Name(key) = &op.operands[0] {
                        font_key = key.clone();
                        font_name = fonts
                            .get(key.as_slice())
                            .and_then(|f| f.get(b"BaseFont").ok())
                            .and_then(|o| o.as_name().ok())
                            .map(|n| String::from_utf8_lossy(n).to_string())
                            .unwrap_or_default();
                    }
                    font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                }
                "TL" => leading = op.operands.first().and_then(get_number),
                "Td" | "TD" if op.operands.len() >= 2 => {
                    let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        leading = Some(-ty);
                    }
                    matrix.translate(tx, ty);
                }
                "Tm" if op.operands.len() >= 6 => {
                    let n: Vec<f64> = op.operands.iter().map(|o| get_number(o).unwrap_or(0.0)).collect();
                    matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                }
                "T*" => matrix.translate(0.0, -leading.unwrap_or(DEFAULT_LEADING)),
                "Tj" | "TJ" | "'" | "\"" => {
                    if matches!(op.operator.as_str(), "'" | "\"") {
                        matrix.translate(0.0, -leading.unwrap_or(DEFAULT_LEADING));
                    }
                    if !in_text {
                        continue;
                    }
                    let text = match op.operator.as_str() {
                        "TJ" => match op.operands.first() {
                            Some(Object::Array(items)) => self.decode_array(fonts, &font_key, items),
                            _ => String::new(),
                        },
                        "\"" => self.decode_operand(fonts, &font_key, op.operands.get(2)),
                        _ => self.decode_operand(fonts, &font_key, op.operands.first()),
                    };
                    if text.trim().is_empty() {
                        continue;
                    }
                    let (x, y) = matrix.position();
                    let size = font_size * matrix.scale();
                    let run = TextRun::from_font(normalize_text(&text), x, y, size, &font_name);
                    matrix.advance(run.width);
                    runs.push(run);
                }
                _ => {}
            }
        }

        Ok(runs)
    }

    fn decode_operand(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font_key: &[u8],
        operand: Option<&Object>,
    ) -> String {
        match operand {
            Some(Object::String(bytes, _)) => self.decode_bytes(fonts, font_key, bytes),
            _ => String::new(),
        }
    }

    /// TJ arrays: strings interleaved with kerning adjustments. Large
    /// negative adjustments are word gaps.
    fn decode_array(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font_key: &[u8],
        items: &[Object],
    ) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    combined.push_str(&self.decode_bytes(fonts, font_key, bytes));
                }
                other => {
                    let adjustment = -get_number(other).unwrap_or(0.0);
                    let needs_space = combined
                        .chars()
                        .last()
                        .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if adjustment > TJ_SPACE_THRESHOLD && needs_space {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }

    fn decode_bytes(
        &self,
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
        font_key: &[u8],
        bytes: &[u8],
    ) -> String {
        let encoding = fonts
            .get(font_key)
            .and_then(|f| f.get_font_encoding(self.doc).ok());
        match encoding {
            Some(enc) => LopdfDocument::decode_text(&enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }
}

/// Text matrix plus the start of the current line.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    line_e: f64,
    line_f: f64,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_e: 0.0,
            line_f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        *self = Self {
            a,
            b,
            c,
            d,
            e,
            f,
            line_e: e,
            line_f: f,
        };
    }

    /// Move to the start of the next line, offset from the current line start.
    fn translate(&mut self, tx: f64, ty: f64) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    /// Advance along the line after showing text.
    fn advance(&mut self, width: f64) {
        self.e += width;
    }

    fn position(&self) -> (f64, f64) {
        (self.e, self.f)
    }

    fn scale(&self) -> f64 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// Scripts written without word spaces (Han, kana).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x3000..=0x303F | 0x3040..=0x30FF | 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0x20000..=0x2EBEF)
}

/// Decoding when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn extract_info(doc: &LopdfDocument) -> DocumentInfo {
    let mut info = DocumentInfo::default();
    let dict = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|o| o.as_reference().ok())
        .and_then(|r| doc.get_dictionary(r).ok());
    if let Some(dict) = dict {
        info.title = get_string_from_dict(dict, b"Title");
        info.author = get_string_from_dict(dict, b"Author");
        info.created = get_string_from_dict(dict, b"CreationDate").and_then(|s| parse_pdf_date(&s));
    }
    info
}

fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => {
            let text = decode_text_simple(bytes);
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        _ => None,
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);
    let year: i32 = s.get(0..4)?.parse().ok()?;
    let field = |range: std::ops::Range<usize>, default: u32| {
        s.get(range).and_then(|v| v.parse().ok()).unwrap_or(default)
    };

    chrono::NaiveDate::from_ymd_opt(year, field(4..6, 1), field(6..8, 1))
        .and_then(|date| date.and_hms_opt(field(8..10, 0), field(10..12, 0), field(12..14, 0)))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}
