use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

/// Monetary fields are integer cents throughout the API.
#[derive(Debug, Deserialize)]
pub struct CreatePartRequest {
    pub part_number: String,
    pub name: String,
    /// Category label, e.g. `"Fabric"`; empty or absent means unspecified.
    #[serde(default)]
    pub category: String,
    /// Color label, e.g. `"Antique Brass"`; empty or absent means unspecified.
    #[serde(default)]
    pub color: String,
    pub qty: i64,
    pub cost: u64,
    pub price: u64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePartRequest {
    pub qty: i64,
    pub cost: u64,
    pub price: u64,
}

#[derive(Debug, Deserialize)]
pub struct AddPullLineRequest {
    pub part_id: i64,
    pub qty: u32,
}

#[derive(Debug, Deserialize)]
pub struct FinalizeRequest {
    #[serde(default = "default_customer")]
    pub customer: String,
}

fn default_customer() -> String {
    "Retail Customer".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SendInvoiceRequest {
    pub recipient: String,
}
