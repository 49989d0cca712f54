//! Storage layer: persisted key-value store of analysis result records.

mod error;
mod result_store;

pub use error::StoreError;
pub use result_store::ResultStore;
