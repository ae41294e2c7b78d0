//! SMTP transmission of generated documents.

use std::path::Path;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, info};

/// Mail submission settings.
///
/// Credentials are resolved from the environment at send time; the password
/// stays wrapped until the transport is built.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: SecretString,
}

impl EmailConfig {
    pub const DEFAULT_HOST: &'static str = "smtp.gmail.com";
    pub const DEFAULT_PORT: u16 = 587;

    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            smtp_host: Self::DEFAULT_HOST.to_string(),
            smtp_port: Self::DEFAULT_PORT,
            username: username.into(),
            password,
        }
    }

    /// Read `EMAIL_USER` / `EMAIL_PASS` from the environment.
    pub fn from_env() -> Result<Self, NotifyError> {
        let username = std::env::var("EMAIL_USER")
            .map_err(|_| NotifyError::config("EMAIL_USER is not set"))?;
        let password = std::env::var("EMAIL_PASS")
            .map_err(|_| NotifyError::config("EMAIL_PASS is not set"))?;
        Ok(Self::new(username, SecretString::new(password)))
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    /// Missing or malformed mail configuration.
    #[error("mail configuration error: {0}")]
    Config(String),

    /// The recipient or sender address failed to parse.
    #[error("invalid address: {0}")]
    Address(String),

    /// The attachment could not be read.
    #[error("failed to read attachment: {0}")]
    Attachment(#[from] std::io::Error),

    /// Transport-level failure: connect, STARTTLS, auth or submission.
    #[error("smtp failure: {0}")]
    Smtp(String),
}

impl NotifyError {
    fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Sends a previously generated document as a PDF attachment.
///
/// One attempt per call: any failure is returned to the caller, which keeps
/// the invoice artifact in its `generated` state so the user can retry.
#[derive(Debug, Clone)]
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Attach the file at `document` and submit the message.
    pub async fn send_document(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        document: &Path,
    ) -> Result<(), NotifyError> {
        debug!(to = %recipient, subject = %subject, "sending document");

        let bytes = std::fs::read(document)?;
        let message = build_message(&self.config, recipient, subject, body, document, bytes)?;
        let transport = build_transport(&self.config)?;

        // The smtp transport is synchronous; keep it off the async runtime.
        tokio::task::spawn_blocking(move || {
            transport
                .send(&message)
                .map(drop)
                .map_err(|e| NotifyError::Smtp(e.to_string()))
        })
        .await
        .map_err(|e| NotifyError::Smtp(format!("send task failed: {e}")))??;

        info!(to = %recipient, "document sent");
        Ok(())
    }
}

fn build_transport(config: &EmailConfig) -> Result<SmtpTransport, NotifyError> {
    let credentials = Credentials::new(
        config.username.clone(),
        config.password.expose_secret().clone(),
    );

    let transport = SmtpTransport::starttls_relay(&config.smtp_host)
        .map_err(|e| NotifyError::Smtp(format!("failed to create transport: {e}")))?
        .port(config.smtp_port)
        .credentials(credentials)
        .build();

    Ok(transport)
}

fn build_message(
    config: &EmailConfig,
    recipient: &str,
    subject: &str,
    body: &str,
    document: &Path,
    bytes: Vec<u8>,
) -> Result<Message, NotifyError> {
    let from = config
        .username
        .parse()
        .map_err(|e| NotifyError::Address(format!("sender: {e}")))?;
    let to = recipient
        .parse()
        .map_err(|e| NotifyError::Address(format!("recipient: {e}")))?;

    let filename = document
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());

    let attachment = Attachment::new(filename).body(
        bytes,
        ContentType::parse("application/pdf")
            .map_err(|e| NotifyError::Config(format!("attachment content type: {e}")))?,
    );

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(body.to_string()),
                )
                .singlepart(attachment),
        )
        .map_err(|e| NotifyError::Smtp(format!("failed to build message: {e}")))
}
