//! In-memory persistence adapters.
//!
//! `InMemoryStudioStore` implements the credit ledger, project store, and
//! account directory ports over one shared state, for development and tests.

mod studio_store;

pub use studio_store::InMemoryStudioStore;
