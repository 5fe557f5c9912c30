//! Remote document store adapter.
//!
//! Implements the credit ledger, project store, and account directory ports
//! against a hosted document store's REST endpoints.

mod http_store;

pub use http_store::{DocumentStoreConfig, HttpDocumentStore};
