use crate::engine::{SavingsSchedule, SavingsScheduleCalculator};
use crate::error::{Result, SavingsScheduleError};
use crate::overrides::AdjustmentModification;
use crate::schema::{PlanHolder, SavingsPlanInput};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPlan {
    pub id: u64,
    pub holder: PlanHolder,
    pub input: SavingsPlanInput,
    pub created_on: NaiveDate,
}

/// In-memory registry of savings plans. Only inputs are kept; ledgers are
/// recomputed from scratch every time they are requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanStore {
    plans: BTreeMap<u64, StoredPlan>,
    next_id: u64,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a plan after checking that it computes. Ids start at 1 and are never reused.
    pub fn create(
        &mut self,
        holder: PlanHolder,
        input: SavingsPlanInput,
        as_of: NaiveDate,
    ) -> Result<u64> {
        SavingsScheduleCalculator::new().build_ledger(&input, as_of)?;

        self.next_id += 1;
        let id = self.next_id;

        info!(
            "Stored savings plan #{} '{}' for {}",
            id, holder.plan_name, holder.customer_name
        );

        self.plans.insert(
            id,
            StoredPlan {
                id,
                holder,
                input,
                created_on: as_of,
            },
        );

        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&StoredPlan> {
        self.plans.get(&id)
    }

    pub fn list(&self) -> impl Iterator<Item = &StoredPlan> {
        self.plans.values()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn remove(&mut self, id: u64) -> Option<StoredPlan> {
        let removed = self.plans.remove(&id);
        if removed.is_some() {
            info!("Removed savings plan #{}", id);
        }
        removed
    }

    pub fn schedule(&self, id: u64, as_of: NaiveDate) -> Result<SavingsSchedule> {
        let plan = self
            .plans
            .get(&id)
            .ok_or(SavingsScheduleError::PlanNotFound(id))?;

        debug!("Recomputing schedule for plan #{} as of {}", id, as_of);
        SavingsScheduleCalculator::new().compute(&plan.input, as_of)
    }

    /// Applies adjustment edits to a stored plan. The plan is left unchanged if
    /// the edited version no longer validates.
    pub fn update_adjustments(
        &mut self,
        id: u64,
        modifications: &[AdjustmentModification],
        as_of: NaiveDate,
    ) -> Result<&StoredPlan> {
        let plan = self
            .plans
            .get_mut(&id)
            .ok_or(SavingsScheduleError::PlanNotFound(id))?;

        let updated = plan.input.with_modifications(modifications);
        SavingsScheduleCalculator::new().build_ledger(&updated, as_of)?;

        debug!(
            "Plan #{} now has {} adjustment(s)",
            id,
            updated.adjustments.len()
        );
        plan.input = updated;

        Ok(&*plan)
    }
}
