//! `atelier-notify` — emails a generated document to a customer.

pub mod mailer;

pub use mailer::{EmailConfig, Mailer, NotifyError};
