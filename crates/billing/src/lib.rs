//! `atelier-billing` — the pull-list session and the invoice artifact lifecycle.

pub mod invoice;
pub mod pull_list;

pub use invoice::{InvoiceArtifact, InvoiceStatus};
pub use pull_list::{PullLine, PullListSession};
