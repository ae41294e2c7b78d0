use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::{DomainError, DomainResult, InvoiceId, Money};

/// Invoice artifact status lifecycle.
///
/// `Generated → Sent` only; a failed send leaves the artifact at
/// `Generated` so the send can be retried without regenerating. There is no
/// way back from `Sent` — a new finalize produces a fresh artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Generated,
    Sent,
}

/// A generated invoice document on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceArtifact {
    pub id: InvoiceId,
    pub customer: String,
    pub path: PathBuf,
    pub grand_total: Money,
    pub status: InvoiceStatus,
    pub generated_at: DateTime<Utc>,
}

impl InvoiceArtifact {
    pub fn generated(customer: impl Into<String>, path: PathBuf, grand_total: Money) -> Self {
        Self {
            id: InvoiceId::new(),
            customer: customer.into(),
            path,
            grand_total,
            status: InvoiceStatus::Generated,
            generated_at: Utc::now(),
        }
    }

    /// Advance `Generated → Sent`.
    pub fn mark_sent(&mut self) -> DomainResult<()> {
        match self.status {
            InvoiceStatus::Generated => {
                self.status = InvoiceStatus::Sent;
                Ok(())
            }
            InvoiceStatus::Sent => Err(DomainError::conflict("invoice already sent")),
        }
    }
}

/// Filename for an invoice document: `invoice_<customer>.pdf`, spaces
/// replaced by underscores. Regenerating for the same customer overwrites.
pub fn invoice_file_name(customer: &str) -> String {
    format!("invoice_{}.pdf", customer.replace(' ', "_"))
}

/// Fixed filename for the workshop pull-list document.
pub const PULL_LIST_FILE_NAME: &str = "pull_list.pdf";

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> InvoiceArtifact {
        InvoiceArtifact::generated(
            "Retail Customer",
            PathBuf::from("invoice_Retail_Customer.pdf"),
            Money::from_cents(750),
        )
    }

    #[test]
    fn generated_artifact_can_be_sent_once() {
        let mut a = artifact();
        assert_eq!(a.status, InvoiceStatus::Generated);
        a.mark_sent().unwrap();
        assert_eq!(a.status, InvoiceStatus::Sent);

        let err = a.mark_sent().unwrap_err();
        match err {
            DomainError::Conflict(msg) => assert!(msg.contains("already sent")),
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn invoice_file_name_replaces_spaces() {
        assert_eq!(
            invoice_file_name("Retail Customer"),
            "invoice_Retail_Customer.pdf"
        );
        assert_eq!(invoice_file_name("Acme"), "invoice_Acme.pdf");
    }
}
