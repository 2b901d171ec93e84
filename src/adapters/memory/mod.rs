//! In-memory adapters for testing and single-process deployments.

mod usage_store;

pub use usage_store::InMemoryUsageStore;
