//! Application services: the session object and the orchestration that ties
//! store, report generator and mailer together.

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::Mutex;

use atelier_billing::invoice::{invoice_file_name, PULL_LIST_FILE_NAME};
use atelier_billing::{InvoiceArtifact, InvoiceStatus, PullLine, PullListSession};
use atelier_core::{DomainError, Money, PartId};
use atelier_infra::export::ExportError;
use atelier_infra::{parts_to_csv, SqlitePartStore};
use atelier_inventory::{NewPart, Part, PartStore, StoreError};
use atelier_notify::{EmailConfig, Mailer, NotifyError};
use atelier_report::{DocumentKind, Letterhead, ReportError, ReportLine};

/// Unified error surface for the route layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Shared application state.
///
/// The pull-list session is an explicit object with a defined lifecycle:
/// created here at startup, mutated only through the methods below, read by
/// the notification step. Handlers receive the whole bundle by `Extension`.
pub struct AppServices {
    store: SqlitePartStore,
    session: Mutex<PullListSession>,
    letterhead: Letterhead,
    docs_dir: PathBuf,
}

const INVOICE_BODY: &str = "Hello, please find your parts invoice attached.";

impl AppServices {
    pub fn new(store: SqlitePartStore, letterhead: Letterhead, docs_dir: PathBuf) -> Self {
        Self {
            store,
            session: Mutex::new(PullListSession::new()),
            letterhead,
            docs_dir,
        }
    }

    // ---- inventory manager ----

    pub async fn create_part(&self, part: NewPart) -> Result<Part, ServiceError> {
        Ok(self.store.create(part).await?)
    }

    pub async fn list_parts(&self) -> Result<Vec<Part>, ServiceError> {
        Ok(self.store.list().await?)
    }

    /// Parts at or below the reorder threshold.
    pub async fn low_stock(&self) -> Result<Vec<Part>, ServiceError> {
        let mut parts = self.store.list().await?;
        parts.retain(Part::is_low_stock);
        Ok(parts)
    }

    pub async fn update_part(
        &self,
        id: PartId,
        qty: i64,
        cost: Money,
        price: Money,
    ) -> Result<(), ServiceError> {
        Ok(self.store.update_levels(id, qty, cost, price).await?)
    }

    pub async fn export_csv(&self) -> Result<String, ServiceError> {
        let parts = self.store.list().await?;
        Ok(parts_to_csv(&parts)?)
    }

    // ---- pull list & invoice ----

    pub async fn pull_list(&self) -> Vec<PullLine> {
        self.session.lock().await.lines().to_vec()
    }

    /// Snapshot the part's current price into a new line.
    pub async fn add_to_pull_list(&self, id: PartId, qty: u32) -> Result<(), ServiceError> {
        let part = self
            .store
            .get(id)
            .await?
            .ok_or_else(DomainError::not_found)?;

        let mut session = self.session.lock().await;
        session.add(&part, qty)?;
        Ok(())
    }

    pub async fn clear_pull_list(&self) {
        self.session.lock().await.clear();
    }

    /// Write the workshop copy (fixed filename, no pricing).
    pub async fn generate_pull_list_document(&self) -> Result<PathBuf, ServiceError> {
        let session = self.session.lock().await;
        if session.is_empty() {
            return Err(DomainError::validation("pull list is empty").into());
        }

        let lines = to_report_lines(session.lines())?;
        let path = self.docs_dir.join(PULL_LIST_FILE_NAME);
        let path = atelier_report::write_document(
            &path,
            &lines,
            "WORKSHOP PULL LIST",
            &self.letterhead,
            DocumentKind::PullList,
        )?;
        Ok(path)
    }

    /// Commit the pull list: deduct stock in one transaction, write the
    /// invoice document, record the artifact, clear the list.
    ///
    /// An empty session is a no-op (`None`): no decrements, no document.
    pub async fn finalize(&self, customer: &str) -> Result<Option<InvoiceArtifact>, ServiceError> {
        let mut session = self.session.lock().await;
        if session.is_empty() {
            return Ok(None);
        }

        let lines = session.lines().to_vec();
        let deductions: Vec<(PartId, i64)> = lines
            .iter()
            .map(|line| (line.part_id, i64::from(line.qty)))
            .collect();
        self.store.deduct_all(&deductions).await?;

        let report_lines = to_report_lines(&lines)?;
        let grand_total = session.grand_total()?;
        let path = self.docs_dir.join(invoice_file_name(customer));
        let title = format!("INVOICE: {customer}");
        let path = atelier_report::write_document(
            &path,
            &report_lines,
            &title,
            &self.letterhead,
            DocumentKind::Invoice,
        )?;

        let artifact = InvoiceArtifact::generated(customer, path, grand_total);
        session.record_generated(artifact.clone());
        session.clear();

        tracing::info!(customer, total = %artifact.grand_total, "invoice finalized");
        Ok(Some(artifact))
    }

    pub async fn current_invoice(&self) -> Option<InvoiceArtifact> {
        self.session.lock().await.current_invoice().cloned()
    }

    /// Email the current invoice. On success the artifact advances to
    /// `Sent`; on failure it stays `Generated` so the send can be retried
    /// without regenerating the document.
    pub async fn send_invoice(
        &self,
        recipient: &str,
        config: EmailConfig,
    ) -> Result<InvoiceArtifact, ServiceError> {
        let mut session = self.session.lock().await;
        let artifact = session
            .current_invoice()
            .cloned()
            .ok_or_else(DomainError::not_found)?;
        if artifact.status == InvoiceStatus::Sent {
            return Err(DomainError::conflict("invoice already sent").into());
        }

        let subject = format!("Invoice for {}", artifact.customer);
        Mailer::new(config)
            .send_document(recipient, &subject, INVOICE_BODY, &artifact.path)
            .await?;

        session.mark_sent()?;
        session
            .current_invoice()
            .cloned()
            .ok_or_else(|| DomainError::not_found().into())
    }
}

fn to_report_lines(lines: &[PullLine]) -> Result<Vec<ReportLine>, ServiceError> {
    lines
        .iter()
        .map(|line| {
            Ok(ReportLine {
                part_number: line.part_number.clone(),
                name: line.name.clone(),
                color: line.color.label().to_string(),
                qty: line.qty,
                total: line.line_total()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use atelier_inventory::{Category, Color};
    use secrecy::SecretString;

    async fn services(dir: &std::path::Path) -> AppServices {
        let store = SqlitePartStore::in_memory().await.unwrap();
        let letterhead = Letterhead {
            business_name: "Atelier Workshop".to_string(),
            address: "12 Workshop Lane, Edgemoor, SC 29712".to_string(),
            email: "orders@atelier.example".to_string(),
        };
        AppServices::new(store, letterhead, dir.to_path_buf())
    }

    fn zipper_pull() -> NewPart {
        NewPart {
            part_number: "Z-100".to_string(),
            name: "Zipper pull".to_string(),
            category: Category::Zipper,
            color: Color::Black,
            qty: 10,
            cost: Money::from_cents(100),
            price: Money::from_cents(250),
        }
    }

    fn dead_end_config() -> EmailConfig {
        // Nothing listens on the discard port; the send fails fast.
        let mut config =
            EmailConfig::new("workshop@example.com", SecretString::new("wrong".into()));
        config.smtp_host = "127.0.0.1".to_string();
        config.smtp_port = 9;
        config
    }

    #[tokio::test]
    async fn finalize_deducts_stock_and_writes_the_invoice() {
        let dir = tempfile::tempdir().unwrap();
        let services = services(dir.path()).await;

        let part = services.create_part(zipper_pull()).await.unwrap();
        services.add_to_pull_list(part.id, 3).await.unwrap();

        let artifact = services.finalize("Retail Customer").await.unwrap().unwrap();

        assert_eq!(artifact.status, InvoiceStatus::Generated);
        assert_eq!(artifact.grand_total, Money::from_cents(750));
        assert_eq!(
            artifact.path,
            dir.path().join("invoice_Retail_Customer.pdf")
        );

        let bytes = std::fs::read(&artifact.path).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("($7.50) Tj"));

        let remaining = services.list_parts().await.unwrap();
        assert_eq!(remaining[0].qty, 7);
        assert!(services.pull_list().await.is_empty());
    }

    #[tokio::test]
    async fn finalize_with_empty_session_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let services = services(dir.path()).await;
        services.create_part(zipper_pull()).await.unwrap();

        let outcome = services.finalize("Retail Customer").await.unwrap();

        assert!(outcome.is_none());
        assert_eq!(services.list_parts().await.unwrap()[0].qty, 10);
        assert!(!dir.path().join("invoice_Retail_Customer.pdf").exists());
    }

    #[tokio::test]
    async fn two_adds_of_the_same_part_stay_separate_lines() {
        let dir = tempfile::tempdir().unwrap();
        let services = services(dir.path()).await;
        let part = services.create_part(zipper_pull()).await.unwrap();

        services.add_to_pull_list(part.id, 2).await.unwrap();
        services.add_to_pull_list(part.id, 1).await.unwrap();

        let lines = services.pull_list().await;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].qty, 2);
        assert_eq!(lines[1].qty, 1);
    }

    #[tokio::test]
    async fn add_to_pull_list_requires_an_existing_part() {
        let dir = tempfile::tempdir().unwrap();
        let services = services(dir.path()).await;

        let err = services
            .add_to_pull_list(PartId::from_raw(9999), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn pull_list_document_uses_the_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let services = services(dir.path()).await;
        let part = services.create_part(zipper_pull()).await.unwrap();
        services.add_to_pull_list(part.id, 3).await.unwrap();

        let path = services.generate_pull_list_document().await.unwrap();

        assert_eq!(path, dir.path().join("pull_list.pdf"));
        // The workshop copy never deducts stock.
        assert_eq!(services.list_parts().await.unwrap()[0].qty, 10);
        let text = String::from_utf8_lossy(&std::fs::read(&path).unwrap()).into_owned();
        assert!(!text.contains("GRAND TOTAL"));
    }

    #[tokio::test]
    async fn pull_list_document_requires_lines() {
        let dir = tempfile::tempdir().unwrap();
        let services = services(dir.path()).await;

        let err = services.generate_pull_list_document().await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn failed_send_leaves_the_invoice_generated() {
        let dir = tempfile::tempdir().unwrap();
        let services = services(dir.path()).await;
        let part = services.create_part(zipper_pull()).await.unwrap();
        services.add_to_pull_list(part.id, 3).await.unwrap();
        services.finalize("Retail Customer").await.unwrap().unwrap();

        let err = services
            .send_invoice("customer@example.com", dead_end_config())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Notify(_)));

        // Retry stays possible: the artifact never left Generated.
        let artifact = services.current_invoice().await.unwrap();
        assert_eq!(artifact.status, InvoiceStatus::Generated);
    }

    #[tokio::test]
    async fn send_without_an_invoice_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let services = services(dir.path()).await;

        let err = services
            .send_invoice("customer@example.com", dead_end_config())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound)));
    }
}
