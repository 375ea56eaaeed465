//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use zip::write::SimpleFileOptions;

/// One show-text operation: font resource (`F1` regular, `F2` bold), size, x, y, text.
pub type Line<'a> = (&'a str, i64, i64, i64, &'a str);

/// Build a one-page PDF with Helvetica and Helvetica-Bold.
pub fn build_pdf(lines: &[Line<'_>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => regular, "F2" => bold },
    });

    let operations: Vec<_> = lines
        .iter()
        .flat_map(|&(font, size, x, y, text)| {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![font.into(), size.into()]),
                Operation::new("Td", vec![x.into(), y.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ]
        })
        .collect();
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Build a DOCX whose body has one paragraph per entry.
pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|text| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", text))
        .collect();

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    )
    .unwrap();
    zip.finish().unwrap().into_inner()
}

/// The contact header plus an experience section, laid out the way a word
/// processor would: bold name, bold section header after a paragraph gap.
pub fn sample_pdf() -> Vec<u8> {
    build_pdf(&[
        ("F2", 16, 72, 760, "Jane Doe"),
        ("F1", 10, 72, 740, "jane.doe@example.com"),
        ("F1", 10, 72, 724, "9876543210"),
        ("F2", 12, 72, 680, "EXPERIENCE"),
        ("F1", 10, 72, 660, "Senior Developer at TechCorp Inc."),
        ("F1", 10, 72, 644, "2020 - Present"),
        ("F1", 10, 72, 628, "Built scalable web tools."),
    ])
}

/// The same resume as [`sample_pdf`], as Word paragraphs.
pub fn sample_docx() -> Vec<u8> {
    build_docx(&[
        "Jane Doe",
        "jane.doe@example.com",
        "9876543210",
        "EXPERIENCE",
        "Senior Developer at TechCorp Inc.",
        "2020 - Present",
        "Built scalable web tools.",
    ])
}
