//! Inventory store: the in-memory product collection plus its file-backed
//! persistence layer (load, crash-safe resave, corruption handling).

pub mod format;
pub mod store;

pub use store::{DEFAULT_PATH, InventoryStore, Outcome, PersistError};
