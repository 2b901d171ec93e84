//! Ports - trait seams between the ledgers and the outside world.
//!
//! Each port owns its error type. Implementations live under
//! `crate::adapters`.

mod clock;
mod plan_catalog;
mod usage_store;

pub use clock::Clock;
pub use plan_catalog::PlanCatalog;
pub use usage_store::{StoreError, UsageStore};
