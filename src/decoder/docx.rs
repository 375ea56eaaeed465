//! Word decoder producing flow text.
//!
//! DOCX files are ZIP archives; the body lives in `word/document.xml` and
//! the title/author in `docProps/core.xml`. Legacy binary `.doc` files are
//! routed here as well so they get a precise error instead of a generic
//! unsupported-format one.

use std::io::{Cursor, Read, Seek};

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::{normalize_text, DecodedContent, DecodedDocument, DocumentDecoder};
use crate::detect::MediaType;
use crate::error::{Error, Result};
use crate::model::DocumentInfo;
use crate::parser::ParseOptions;

/// OLE2 compound file signature.
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
/// Separator between table cells, matching the column break of positioned text.
const CELL_SEPARATOR: &str = "  ";

/// Decoder for word-processing documents.
#[derive(Debug, Clone, Default)]
pub struct DocxDecoder;

impl DocxDecoder {
    /// Create a new Word decoder.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for DocxDecoder {
    fn media_types(&self) -> &[MediaType] {
        &[MediaType::Docx, MediaType::Doc]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn decode(&self, data: &[u8], _options: &ParseOptions) -> Result<DecodedDocument> {
        if data.starts_with(OLE_MAGIC) {
            return Err(Error::CorruptDocument(
                "legacy binary .doc files cannot be decoded; save as .docx".to_string(),
            ));
        }

        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let body = read_entry(&mut archive, "word/document.xml")?.ok_or_else(|| {
            Error::CorruptDocument("missing word/document.xml".to_string())
        })?;
        let text = normalize_text(&body_text(&body)?);
        if text.trim().is_empty() {
            return Err(Error::CorruptDocument("no extractable text".to_string()));
        }
        log::debug!("docx body: {} chars", text.chars().count());

        let mut info = match read_entry(&mut archive, "docProps/core.xml")? {
            Some(core) => core_properties(&core),
            None => DocumentInfo::default(),
        };
        info.page_count = read_entry(&mut archive, "docProps/app.xml")?
            .and_then(|app| element_text(&app, b"Pages"))
            .and_then(|pages| pages.trim().parse().ok())
            .unwrap_or(1);

        Ok(DecodedDocument {
            content: DecodedContent::Flow(text),
            info,
        })
    }
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::CorruptDocument(format!("{}: {}", name, e)))?;
    Ok(Some(content))
}

/// Flatten `word/document.xml` into lines: one per paragraph, one per table row.
fn body_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut cell: Option<String> = None;
    let mut row: Option<Vec<String>> = None;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_text = in_run,
                b"tr" => row = Some(Vec::new()),
                b"tc" => cell = Some(String::new()),
                _ => {}
            },
            Event::Empty(ref e) if in_run => match e.local_name().as_ref() {
                b"tab" => paragraph.push('\t'),
                b"br" | b"cr" => paragraph.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text => {
                paragraph.push_str(&e.unescape()?);
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"r" => in_run = false,
                b"t" => in_text = false,
                b"p" => {
                    let text = std::mem::take(&mut paragraph);
                    match cell.as_mut() {
                        Some(cell) => {
                            if !cell.is_empty() && !text.is_empty() {
                                cell.push(' ');
                            }
                            cell.push_str(text.trim());
                        }
                        None => lines.push(text),
                    }
                }
                b"tc" => {
                    if let (Some(text), Some(row)) = (cell.take(), row.as_mut()) {
                        row.push(text);
                    }
                }
                b"tr" => {
                    if let Some(row) = row.take() {
                        lines.push(row.join(CELL_SEPARATOR));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(lines.join("\n"))
}

fn core_properties(xml: &str) -> DocumentInfo {
    DocumentInfo {
        title: element_text(xml, b"title").filter(|t| !t.trim().is_empty()),
        author: element_text(xml, b"creator").filter(|t| !t.trim().is_empty()),
        created: element_text(xml, b"created")
            .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
            .map(|d| d.with_timezone(&Utc)),
        ..Default::default()
    }
}

/// Text of the first element with the given local name.
fn element_text(xml: &str, local_name: &[u8]) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut inside = false;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == local_name => inside = true,
            Ok(Event::End(ref e)) if e.local_name().as_ref() == local_name => inside = false,
            Ok(Event::Text(e)) if inside => {
                return e.unescape().ok().map(|t| t.into_owned());
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}
