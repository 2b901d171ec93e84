//! PostgreSQL adapters.

mod usage_store;

pub use usage_store::PgUsageStore;
