//! Shopping list PDF export.
//!
//! The font is loaded once with [`FontResource::load`] and handed to every
//! render call. A missing font file is an error; there is no fallback font.

use std::{
    io::{Cursor, ErrorKind},
    path::{Path, PathBuf},
};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use crate::{AggregatedLine, ExportError};

/// Attachment name of the downloaded document.
pub const EXPORT_FILE_NAME: &str = "spisok.pdf";
/// Content type of the downloaded document.
pub const EXPORT_CONTENT_TYPE: &str = "application/pdf";

const DOCUMENT_TITLE: &str = "Shopping list";
const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const INCH: f32 = 25.4;
const FONT_SIZE: f32 = 14.0;
const LINE_HEIGHT: f32 = 18.0;

/// A TrueType font read from disk.
#[derive(Debug)]
pub struct FontResource {
    path: PathBuf,
    source: FontSource,
}

#[derive(Debug)]
enum FontSource {
    External(Vec<u8>),
    Builtin(BuiltinFont),
}

impl FontResource {
    /// Read `file_name` from `dir`.
    pub fn load(dir: impl AsRef<Path>, file_name: &str) -> Result<Self, ExportError> {
        let path = dir.as_ref().join(file_name);
        let bytes = std::fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ExportError::FontNotFound(path.clone()),
            _ => ExportError::FontRead {
                path: path.clone(),
                source,
            },
        })?;
        tracing::info!("loaded export font from {}", path.display());

        Ok(Self::from_bytes(path, bytes))
    }

    /// A TrueType font already in memory. `path` only labels it in logs.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            source: FontSource::External(bytes),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One of the standard PDF fonts. These cover Latin-1 only.
    pub fn builtin(font: BuiltinFont) -> Self {
        Self {
            path: PathBuf::from("builtin"),
            source: FontSource::Builtin(font),
        }
    }

    fn register(&self, doc: &PdfDocumentReference) -> Result<IndirectFontRef, ExportError> {
        let font = match &self.source {
            FontSource::External(bytes) => doc.add_external_font(Cursor::new(bytes.as_slice())),
            FontSource::Builtin(font) => doc.add_builtin_font(font.clone()),
        };
        font.map_err(|err| ExportError::Pdf(err.to_string()))
    }
}

/// The text content of a shopping list document, one entry per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShoppingListDocument {
    lines: Vec<String>,
}

impl ShoppingListDocument {
    pub fn new<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = AggregatedLine>,
    {
        Self {
            lines: lines.into_iter().map(|line| line.label()).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Render a single A4 page. Text starts one inch from the left and top
    /// edges and moves down one line per entry; long lists run off the page.
    pub fn render(&self, font: &FontResource) -> Result<Vec<u8>, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(DOCUMENT_TITLE, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
        let font_ref = font.register(&doc)?;
        let layer = doc.get_page(page).get_layer(layer);

        layer.begin_text_section();
        layer.set_font(&font_ref, FONT_SIZE);
        layer.set_line_height(LINE_HEIGHT);
        layer.set_text_cursor(Mm(INCH), Mm(PAGE_HEIGHT.0 - INCH));
        for line in &self.lines {
            layer.write_text(line.clone(), &font_ref);
            layer.add_line_break();
        }
        layer.end_text_section();

        tracing::debug!("rendered shopping list with {} lines", self.lines.len());
        doc.save_to_bytes()
            .map_err(|err| ExportError::Pdf(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sugar_and_salt() -> Vec<AggregatedLine> {
        vec![
            AggregatedLine {
                name: "Sugar".to_string(),
                unit: "g".to_string(),
                total: 150,
            },
            AggregatedLine {
                name: "Salt".to_string(),
                unit: "g".to_string(),
                total: 5,
            },
        ]
    }

    #[test]
    fn formats_one_line_per_ingredient() {
        let document = ShoppingListDocument::new(sugar_and_salt());
        assert_eq!(document.lines(), ["Sugar: 150 g", "Salt: 5 g"]);
    }

    #[test]
    fn renders_pdf_bytes() {
        let font = FontResource::builtin(BuiltinFont::Helvetica);
        let bytes = ShoppingListDocument::new(sugar_and_salt())
            .render(&font)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_list_renders_valid_document() {
        let font = FontResource::builtin(BuiltinFont::Helvetica);
        let document = ShoppingListDocument::new(Vec::new());
        assert!(document.lines().is_empty());

        let bytes = document.render(&font).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn missing_font_is_reported_with_path() {
        let dir = std::env::temp_dir().join("foodgram-missing-fonts");
        let err = FontResource::load(&dir, "Nope.ttf").unwrap_err();
        match err {
            ExportError::FontNotFound(path) => assert_eq!(path, dir.join("Nope.ttf")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
