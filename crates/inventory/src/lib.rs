//! `atelier-inventory` — parts catalog domain and the storage port.

pub mod part;
pub mod store;

pub use part::{Category, Color, NewPart, Part, LOW_STOCK_THRESHOLD};
pub use store::{PartStore, StoreError, StoreResult};
