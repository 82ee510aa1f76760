//! PDF clinical report export.
//!
//! The report is a single A4 page carrying fixed text. It does not include any assessment
//! output.

use crate::constants::{REPORT_CONTENT_TYPE, REPORT_FILE_NAME};
use crate::{CareError, CareResult};
use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use std::io::BufWriter;
use std::path::Path;

const REPORT_TITLE: &str = "DiaBP-CareAI Clinical Report";

/// Lines drawn on the page, with their baseline position in points from the bottom-left.
const REPORT_LINES: [(&str, f32, f32); 3] = [
    ("DiaBP-CareAI Clinical Report", 100.0, 800.0),
    ("Diabetes & Hypertension Screening", 100.0, 780.0),
    ("This system supports clinical monitoring.", 100.0, 760.0),
];

const FONT_SIZE: f32 = 12.0;

/// A rendered report ready to be downloaded or written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
}

impl RenderedReport {
    pub fn file_name(&self) -> &'static str {
        REPORT_FILE_NAME
    }

    pub fn content_type(&self) -> &'static str {
        REPORT_CONTENT_TYPE
    }

    /// Writes the PDF bytes to `path`.
    ///
    /// # Errors
    ///
    /// Returns `CareError::FileWrite` if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> CareResult<()> {
        std::fs::write(path, &self.bytes).map_err(|source| CareError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "report written");
        Ok(())
    }
}

/// Text lines of the report, in drawing order.
#[cfg(test)]
fn report_lines() -> impl Iterator<Item = &'static str> {
    REPORT_LINES.iter().map(|(text, _, _)| *text)
}

/// Renders the clinical report as PDF bytes.
///
/// # Errors
///
/// Returns `CareError::Pdf` if the font cannot be embedded or the document fails to save.
pub fn render_report() -> CareResult<RenderedReport> {
    let (doc, page, layer) = PdfDocument::new(REPORT_TITLE, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| CareError::Pdf(format!("font error: {e}")))?;

    for (text, x, y) in REPORT_LINES {
        layer.use_text(text, FONT_SIZE, Mm::from(Pt(x)), Mm::from(Pt(y)), &font);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| CareError::Pdf(format!("save error: {e}")))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| CareError::Pdf(format!("buffer error: {e}")))?;

    Ok(RenderedReport { bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_pdf_document() {
        let report = render_report().unwrap();
        assert!(report.bytes.starts_with(b"%PDF"));
        assert_eq!(report.file_name(), "DiaBP_Report.pdf");
        assert_eq!(report.content_type(), "application/pdf");
    }

    #[test]
    fn report_lines_are_fixed() {
        let lines: Vec<&str> = report_lines().collect();
        assert_eq!(
            lines,
            vec![
                "DiaBP-CareAI Clinical Report",
                "Diabetes & Hypertension Screening",
                "This system supports clinical monitoring.",
            ]
        );
    }

    #[test]
    fn writes_report_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REPORT_FILE_NAME);
        let report = render_report().unwrap();
        report.write_to(&path).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, report.bytes);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(REPORT_FILE_NAME);
        let err = render_report().unwrap().write_to(&path).unwrap_err();
        assert!(matches!(err, CareError::FileWrite { .. }));
    }
}
