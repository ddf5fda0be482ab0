use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use thiserror::Error;

use crate::models::SchemeListing;

/// A4 in PostScript points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;
const LINE_HEIGHT: i64 = 16;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LINE_HEIGHT) as usize;

const TITLE_SIZE: i64 = 18;
const BODY_SIZE: i64 = 12;
const NOTE_SIZE: i64 = 10;

/// Errors that can occur while producing a downloadable document
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error while writing document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Renderer unavailable: {0}")]
    Unavailable(String),
}

/// Produces a downloadable document from a scheme listing.
///
/// A failure here never fails the request: callers fall back to the HTML
/// listing.
pub trait DocumentRenderer: Send + Sync {
    /// MIME type of the rendered bytes
    fn content_type(&self) -> &'static str;

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn render(&self, listing: &SchemeListing) -> Result<Vec<u8>, RenderError>;
}

/// Renders listings as a plain multi-page PDF using the built-in Helvetica font
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

struct Line {
    size: i64,
    text: String,
}

impl Line {
    fn new(size: i64, text: impl AsRef<str>) -> Self {
        Self {
            size,
            text: to_pdf_text(text.as_ref()),
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, listing: &SchemeListing) -> Result<Vec<u8>, RenderError> {
        let lines = layout_lines(listing);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut page_ids: Vec<ObjectId> = Vec::new();
        for chunk in lines.chunks(LINES_PER_PAGE) {
            let content = page_content(chunk);
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(to_pdf_text(&format!("Eligible schemes for {}", listing.name))),
            "Producer" => Object::string_literal(concat!("scheme-eligibility ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn layout_lines(listing: &SchemeListing) -> Vec<Line> {
    let mut lines = vec![
        Line::new(TITLE_SIZE, format!("Eligible schemes for {}", listing.name)),
        Line::new(
            NOTE_SIZE,
            format!("Generated {}", chrono::Utc::now().format("%d %B %Y")),
        ),
        Line::new(BODY_SIZE, ""),
    ];

    if listing.schemes.is_empty() {
        lines.push(Line::new(
            BODY_SIZE,
            "No eligible schemes were found for the details you entered.",
        ));
    } else {
        lines.extend(
            listing
                .schemes
                .iter()
                .enumerate()
                .map(|(i, scheme)| Line::new(BODY_SIZE, format!("{}. {}", i + 1, scheme))),
        );
    }

    lines
}

fn page_content(lines: &[Line]) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("TL", vec![LINE_HEIGHT.into()]),
        Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN).into()]),
    ];

    for line in lines {
        operations.push(Operation::new("Tf", vec!["F1".into(), line.size.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.text.as_str())],
        ));
        operations.push(Operation::new("T*", vec![]));
    }

    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

/// The standard Type1 fonts only cover single-byte text; anything outside
/// printable ASCII becomes `?`.
fn to_pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}
