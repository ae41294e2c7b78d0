//! Document layout: letterhead, title, item table, invoice totals.

use std::path::{Path, PathBuf};

use thiserror::Error;

use atelier_core::{DomainError, Money};

use crate::fonts::Face;
use crate::pdf::{Align, Canvas};

/// Which document to produce from the same table template.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// Workshop copy: no pricing column, no totals.
    PullList,
    /// Customer copy: per-line totals, grand total, thank-you footer.
    Invoice,
}

/// Fixed business-identity block rendered at the top right of every page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letterhead {
    pub business_name: String,
    pub address: String,
    pub email: String,
}

/// One row of the item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub part_number: String,
    pub name: String,
    pub color: String,
    pub qty: u32,
    /// Line total; printed (and summed) in invoice mode only.
    pub total: Money,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

const SKU_W: f64 = 30.0;
const NAME_W: f64 = 70.0;
const COL_W: f64 = 30.0;
const ROW_H: f64 = 10.0;

const FOOTER: &str = "Thank you for supporting my handmade business!";

/// Render the document to PDF bytes.
///
/// Column text is not wrapped; overlong values keep their single line and
/// may overrun the cell (known edge case of the template).
pub fn render(
    lines: &[ReportLine],
    title: &str,
    letterhead: &Letterhead,
    kind: DocumentKind,
) -> Result<Vec<u8>, ReportError> {
    let mut canvas = Canvas::new();
    canvas.add_page();

    // Business identity, right-aligned.
    canvas.set_font(Face::Bold, 20.0);
    canvas.cell(0.0, 10.0, &letterhead.business_name, false, false, Align::Right);
    canvas.ln(10.0);
    canvas.set_font(Face::Regular, 10.0);
    canvas.cell(0.0, 5.0, &letterhead.address, false, false, Align::Right);
    canvas.ln(5.0);
    canvas.cell(0.0, 5.0, &format!("Email: {}", letterhead.email), false, false, Align::Right);
    canvas.ln(5.0);
    canvas.ln(10.0);

    // Title.
    canvas.set_font(Face::Bold, 16.0);
    canvas.cell(0.0, 10.0, title, false, false, Align::Left);
    canvas.ln(10.0);
    canvas.ln(5.0);

    // Table header.
    canvas.set_font(Face::Bold, 10.0);
    canvas.set_fill_color(240, 240, 240);
    canvas.cell(SKU_W, ROW_H, "SKU", true, true, Align::Left);
    canvas.cell(NAME_W, ROW_H, "Item Name", true, true, Align::Left);
    canvas.cell(COL_W, ROW_H, "Color", true, true, Align::Left);
    canvas.cell(COL_W, ROW_H, "Qty", true, true, Align::Left);
    if kind == DocumentKind::Invoice {
        canvas.cell(COL_W, ROW_H, "Total", true, true, Align::Left);
    }
    canvas.ln(ROW_H);

    // Rows.
    canvas.set_font(Face::Regular, 10.0);
    let mut grand_total = Money::ZERO;
    for line in lines {
        canvas.cell(SKU_W, ROW_H, &line.part_number, true, false, Align::Left);
        canvas.cell(NAME_W, ROW_H, &line.name, true, false, Align::Left);
        canvas.cell(COL_W, ROW_H, &line.color, true, false, Align::Left);
        canvas.cell(COL_W, ROW_H, &line.qty.to_string(), true, false, Align::Left);
        if kind == DocumentKind::Invoice {
            canvas.cell(COL_W, ROW_H, &line.total.to_string(), true, false, Align::Left);
            grand_total = grand_total.checked_add(line.total)?;
        }
        canvas.ln(ROW_H);
    }

    if kind == DocumentKind::Invoice {
        canvas.ln(5.0);
        canvas.set_font(Face::Bold, 12.0);
        canvas.cell(160.0, ROW_H, "GRAND TOTAL: ", false, false, Align::Right);
        canvas.cell(COL_W, ROW_H, &grand_total.to_string(), false, false, Align::Left);
        canvas.ln(ROW_H);

        canvas.ln(20.0);
        canvas.set_font(Face::Oblique, 10.0);
        canvas.cell(0.0, 10.0, FOOTER, false, false, Align::Center);
        canvas.ln(10.0);
    }

    Ok(canvas.finish())
}

/// Render and write the document, returning the path it was written to.
///
/// A file of the same name is overwritten; an I/O failure propagates to the
/// caller and aborts the current action.
pub fn write_document(
    path: &Path,
    lines: &[ReportLine],
    title: &str,
    letterhead: &Letterhead,
    kind: DocumentKind,
) -> Result<PathBuf, ReportError> {
    let bytes = render(lines, title, letterhead, kind)?;
    std::fs::write(path, bytes)?;
    Ok(path.to_path_buf())
}
