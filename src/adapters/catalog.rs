//! Static, in-process plan catalog.
//!
//! Plans are immutable reference data; this catalog holds one record per
//! plan code and refuses to construct if any is missing or duplicated, so a
//! misconfigured deployment fails at startup rather than at first lookup.

use crate::domain::access::{Plan, PlanCode};
use crate::ports::PlanCatalog;

/// In-process catalog holding every plan.
#[derive(Debug, Clone)]
pub struct StaticPlanCatalog {
    free: Plan,
    premium: Plan,
}

impl StaticPlanCatalog {
    /// Builds the catalog from a list of plan records.
    ///
    /// Every `PlanCode` must appear exactly once.
    pub fn new(plans: Vec<Plan>) -> Result<Self, CatalogError> {
        let mut free = None;
        let mut premium = None;

        for plan in plans {
            let slot = match plan.code {
                PlanCode::Free => &mut free,
                PlanCode::Premium => &mut premium,
            };
            if slot.is_some() {
                return Err(CatalogError::DuplicatePlan(plan.code));
            }
            *slot = Some(plan);
        }

        Ok(Self {
            free: free.ok_or(CatalogError::MissingPlan(PlanCode::Free))?,
            premium: premium.ok_or(CatalogError::MissingPlan(PlanCode::Premium))?,
        })
    }
}

impl PlanCatalog for StaticPlanCatalog {
    fn plan(&self, code: PlanCode) -> &Plan {
        match code {
            PlanCode::Free => &self.free,
            PlanCode::Premium => &self.premium,
        }
    }
}

/// Fatal configuration errors raised while building the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("no plan configured for code '{0}'")]
    MissingPlan(PlanCode),

    #[error("plan code '{0}' configured more than once")]
    DuplicatePlan(PlanCode),
}
