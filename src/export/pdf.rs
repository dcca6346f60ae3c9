use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::Report;

use super::{document_lines, prepare_target};

/// A4 portrait.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const FIRST_LINE_Y: f32 = 280.0;
const LINE_HEIGHT: f32 = 10.0;
const FONT_SIZE: f32 = 12.0;
const LAYER_NAME: &str = "Layer 1";

/// Write the report as a paginated PDF inside `dir` and return the file path.
pub fn export_pdf(report: &Report, dir: &Path) -> Result<PathBuf> {
    let path = prepare_target(dir, report, "pdf")?;
    let lines = document_lines(report);

    let (doc, page, layer) = PdfDocument::new(
        report.title(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        LAYER_NAME,
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| Error::export(&path, err))?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = FIRST_LINE_Y;
    for line in lines {
        if y < MARGIN {
            current = new_page(&doc);
            y = FIRST_LINE_Y;
        }
        current.use_text(line, FONT_SIZE, Mm(MARGIN), Mm(y), &font);
        y -= LINE_HEIGHT;
    }

    let file = File::create(&path).map_err(|err| Error::export(&path, err))?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|err| Error::export(&path, err))?;

    info!(path = %path.display(), "Exported PDF report");
    Ok(path)
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
    doc.get_page(page).get_layer(layer)
}
