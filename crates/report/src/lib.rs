//! `atelier-report` — paginated PDF documents for pull lists and invoices.
//!
//! The writer emits PDF 1.4 directly over `std::io::Write` using the base-14
//! Helvetica family, so the crate carries no platform or rendering
//! dependencies.

mod fonts;
mod pdf;
pub mod report;

pub use report::{
    render, write_document, DocumentKind, Letterhead, ReportError, ReportLine,
};
