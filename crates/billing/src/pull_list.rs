use serde::{Deserialize, Serialize};

use atelier_core::{DomainError, DomainResult, Money, PartId};
use atelier_inventory::{Color, Part};

use crate::invoice::InvoiceArtifact;

/// One line of the pull list.
///
/// `unit_price` is a snapshot taken when the line is added; a later price
/// edit on the part does not change an already-added line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullLine {
    pub part_id: PartId,
    pub part_number: String,
    pub name: String,
    pub color: Color,
    pub qty: u32,
    pub unit_price: Money,
}

impl PullLine {
    /// `qty × unit_price`, checked.
    pub fn line_total(&self) -> DomainResult<Money> {
        self.unit_price.checked_mul(self.qty)
    }
}

/// The in-memory pull list accumulated before finalize, plus the pointer to
/// the most recently generated invoice document.
///
/// Created once at session start and mutated only through the methods here;
/// handlers receive it by reference from application state.
#[derive(Debug, Default)]
pub struct PullListSession {
    lines: Vec<PullLine>,
    current_invoice: Option<InvoiceArtifact>,
}

impl PullListSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line for `part`, snapshotting its current price.
    ///
    /// Duplicate parts are not merged: adding the same part twice yields two
    /// separate lines.
    pub fn add(&mut self, part: &Part, qty: u32) -> DomainResult<()> {
        if qty < 1 {
            return Err(DomainError::validation("quantity to pull must be at least 1"));
        }
        self.lines.push(PullLine {
            part_id: part.id,
            part_number: part.part_number.clone(),
            name: part.name.clone(),
            color: part.color,
            qty,
            unit_price: part.price,
        });
        Ok(())
    }

    /// Empty the list. The current invoice pointer is untouched.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[PullLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Checked sum of all line totals.
    pub fn grand_total(&self) -> DomainResult<Money> {
        let mut total = Money::ZERO;
        for line in &self.lines {
            total = total.checked_add(line.line_total()?)?;
        }
        Ok(total)
    }

    /// Record a freshly generated invoice, replacing any prior artifact.
    pub fn record_generated(&mut self, artifact: InvoiceArtifact) {
        self.current_invoice = Some(artifact);
    }

    pub fn current_invoice(&self) -> Option<&InvoiceArtifact> {
        self.current_invoice.as_ref()
    }

    /// Advance the current invoice to sent after a successful transmission.
    pub fn mark_sent(&mut self) -> DomainResult<()> {
        match self.current_invoice.as_mut() {
            Some(artifact) => artifact.mark_sent(),
            None => Err(DomainError::not_found()),
        }
    }
}
