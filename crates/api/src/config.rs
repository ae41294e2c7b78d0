//! Environment-driven application configuration.

use std::path::PathBuf;

use atelier_report::Letterhead;

/// Settings read once at startup. Email credentials are deliberately not
/// here; they are resolved from the environment at send time.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub docs_dir: PathBuf,
    pub bind_addr: String,
    pub letterhead: Letterhead,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let db_path = std::env::var("ATELIER_DB").unwrap_or_else(|_| "atelier.db".to_string());
        let docs_dir = std::env::var("ATELIER_DOCS_DIR").unwrap_or_else(|_| ".".to_string());
        let bind_addr =
            std::env::var("ATELIER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let letterhead = Letterhead {
            business_name: std::env::var("ATELIER_BUSINESS_NAME")
                .unwrap_or_else(|_| "Atelier Workshop".to_string()),
            address: std::env::var("ATELIER_BUSINESS_ADDRESS")
                .unwrap_or_else(|_| "12 Workshop Lane, Edgemoor, SC 29712".to_string()),
            email: std::env::var("ATELIER_BUSINESS_EMAIL")
                .unwrap_or_else(|_| "orders@atelier.example".to_string()),
        };

        Self {
            db_path: PathBuf::from(db_path),
            docs_dir: PathBuf::from(docs_dir),
            bind_addr,
            letterhead,
        }
    }
}
