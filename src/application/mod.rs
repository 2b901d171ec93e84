//! Application layer: the ledgers and the admission facade.
//!
//! `QuotaLedger` meters daily-reset free features, `TrialLedger` meters the
//! rolling premium-trial allowance, and `AccessGate` composes the two with
//! the admin/premium bypass into the single entry point every feature
//! handler calls.

mod access_gate;
mod quota_ledger;
mod trial_ledger;

pub use access_gate::AccessGate;
pub use quota_ledger::{FeatureUsage, QuotaLedger};
pub use trial_ledger::{TrialFeatureStatus, TrialLedger, TrialStatus};
