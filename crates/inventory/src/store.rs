//! Repository port for the parts table.
//!
//! The domain layer speaks only this trait; the SQLite adapter lives in
//! `atelier-infra` so storage technology stays swappable.

use async_trait::async_trait;
use thiserror::Error;

use atelier_core::{Money, PartId};

use crate::part::{NewPart, Part};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error, detached from any particular backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend rejected or failed an operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A batched decrement referenced a part that does not exist; the whole
    /// batch is rolled back.
    #[error("part {0} does not exist")]
    MissingPart(PartId),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// The four inventory operations plus the transactional finalize decrement.
///
/// Semantics the implementations must preserve:
/// - `create` performs no SKU uniqueness check.
/// - `list` returns rows in insertion (id) order.
/// - `update_levels` on an absent id is silently a no-op.
/// - `deduct_quantity` applies `qty = qty - delta` with no lower bound.
/// - `deduct_all` applies every decrement or none of them; a decrement
///   against a missing part fails the whole batch with `MissingPart`.
#[async_trait]
pub trait PartStore: Send + Sync {
    /// Insert a new part and return the row with its assigned id.
    async fn create(&self, part: NewPart) -> StoreResult<Part>;

    /// All parts in insertion order.
    async fn list(&self) -> StoreResult<Vec<Part>>;

    /// Single-row lookup.
    async fn get(&self, id: PartId) -> StoreResult<Option<Part>>;

    /// Overwrite the three mutable numeric fields of a part.
    async fn update_levels(
        &self,
        id: PartId,
        qty: i64,
        cost: Money,
        price: Money,
    ) -> StoreResult<()>;

    /// Subtract `delta` from a part's quantity; the result may go negative.
    async fn deduct_quantity(&self, id: PartId, delta: i64) -> StoreResult<()>;

    /// Apply a batch of decrements inside one transaction (all-or-nothing).
    async fn deduct_all(&self, deductions: &[(PartId, i64)]) -> StoreResult<()>;
}
