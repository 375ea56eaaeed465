//! Benchmarks for cvparse parsing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use a synthetic resume, as text, as positioned runs and
//! as a generated PDF.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use cvparse::model::{PageRuns, TextRun};
use cvparse::parser::LayoutReconstructor;
use cvparse::{Dictionaries, MediaType, RawDocument, ResumeParser};

const RESUME_LINES: &[&str] = &[
    "Jane Doe",
    "jane.doe@example.com | +91 98765 43210 | Pune, Maharashtra",
    "linkedin.com/in/janedoe | github.com/janedoe",
    "Experience",
    "Senior Developer at TechCorp Inc. (Jan 2020 - Present)",
    "• Built scalable web tools for recruiters and hiring managers",
    "• Migrated billing to event sourcing with Rust and PostgreSQL",
    "Software Engineer - Acme Corp (Jun 2016 - Dec 2019)",
    "• Maintained the Django monolith and its Redis caches",
    "Education",
    "B.Tech in Computer Science, Pune Institute of Technology, 2016",
    "Skills",
    "Rust, Python, Django, PostgreSQL, Redis, Docker, Kubernetes, AWS",
    "Projects",
    "Resume Parser | Rust, Regex",
    "Extracts candidate profiles from PDF and Word documents",
    "Certifications",
    "AWS Certified Solutions Architect",
];

/// Positioned runs for `pages` copies of the sample, one line per run.
fn sample_runs(pages: u32) -> Vec<PageRuns> {
    (1..=pages)
        .map(|number| {
            let mut page = PageRuns::new(number, 595.0, 842.0);
            page.runs = RESUME_LINES
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let font = if i == 0 { "Helvetica-Bold" } else { "Helvetica" };
                    TextRun::from_font(line.to_string(), 72.0, 780.0 - 16.0 * i as f64, 10.0, font)
                })
                .collect();
            page
        })
        .collect()
}

/// A PDF with `pages` copies of the sample.
fn create_test_pdf(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages);
    for _ in 0..pages {
        let operations = RESUME_LINES
            .iter()
            .enumerate()
            .flat_map(|(i, line)| {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 10.into()]),
                    Operation::new("Td", vec![72.into(), (780 - 16 * i as i64).into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ]
            })
            .collect();
        let content = Content { operations };
        let Ok(encoded) = content.encode() else {
            continue;
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    let _ = doc.save_to(&mut buf);
    buf
}

/// Benchmark media type sniffing.
fn bench_format_detection(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);
    let non_pdf_data = b"Not a resume file at all, just random text content";

    c.bench_function("detect_pdf", |b| {
        b.iter(|| cvparse::detect_from_bytes(black_box(&pdf_data)));
    });

    c.bench_function("detect_unknown", |b| {
        b.iter(|| cvparse::detect_from_bytes(black_box(non_pdf_data)));
    });
}

/// Benchmark layout reconstruction alone.
fn bench_layout(c: &mut Criterion) {
    let reconstructor = LayoutReconstructor::new();
    let mut group = c.benchmark_group("layout");

    for pages in [1, 5, 10] {
        let runs = sample_runs(pages);
        group.bench_function(format!("{}_pages", pages), |b| {
            b.iter(|| reconstructor.reconstruct(black_box(&runs)));
        });
    }

    group.finish();
}

/// Benchmark the text pipeline: segmentation, extraction and validation.
fn bench_text_pipeline(c: &mut Criterion) {
    let parser = ResumeParser::new();
    let text = RESUME_LINES.join("\n");

    c.bench_function("parse_text", |b| {
        b.iter(|| parser.parse_text(black_box(&text)));
    });
}

/// Benchmark full PDF parsing at various sizes.
fn bench_pdf_parsing(c: &mut Criterion) {
    let parser = ResumeParser::new();
    let mut group = c.benchmark_group("pdf_parsing");

    for pages in [1, 5, 10] {
        let raw = RawDocument::new(create_test_pdf(pages), MediaType::Pdf);
        group.bench_function(format!("{}_pages", pages), |b| {
            b.iter(|| {
                let _ = parser.parse(black_box(&raw));
            });
        });
    }

    group.finish();
}

/// Benchmark compiling the dictionaries into a parser.
fn bench_parser_creation(c: &mut Criterion) {
    let dicts = Dictionaries::default();
    c.bench_function("parser_creation", |b| {
        b.iter(|| ResumeParser::with_dictionaries(black_box(&dicts)));
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_layout,
    bench_text_pipeline,
    bench_pdf_parsing,
    bench_parser_creation,
);
criterion_main!(benches);
