use crate::schema::{adjustments_from_entries, AdjustmentEntry, AdjustmentMap, SavingsPlanInput};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One edit to a plan's per-period overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AdjustmentModification {
    /// Override the contribution of a single period. Replaces any earlier override for it.
    Set {
        #[schemars(description = "1-based installment number.")]
        period: u32,
        #[schemars(description = "Contribution for that installment in the smallest currency unit.")]
        amount: i64,
    },

    /// Drop the override for a period, restoring the default monthly amount.
    Remove { period: u32 },

    /// Drop every override.
    Clear,
}

/// Adjustments in the order they were entered, duplicates included.
///
/// Mirrors how the entry form accumulates "add adjustment" actions; the
/// effective map is only resolved by [`AdjustmentSet::to_map`].
///
/// Serializes as a bare list of `{ period, amount }` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AdjustmentSet {
    pub entries: Vec<AdjustmentEntry>,
}

impl AdjustmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: &AdjustmentMap) -> Self {
        Self {
            entries: map
                .iter()
                .map(|(&period, &amount)| AdjustmentEntry::new(period, amount))
                .collect(),
        }
    }

    pub fn push(&mut self, period: u32, amount: i64) {
        self.entries.push(AdjustmentEntry::new(period, amount));
    }

    pub fn remove_at(&mut self, index: usize) -> Option<AdjustmentEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn apply(&mut self, modification: &AdjustmentModification) {
        match modification {
            AdjustmentModification::Set { period, amount } => {
                self.entries.retain(|e| e.period != *period);
                self.push(*period, *amount);
            }
            AdjustmentModification::Remove { period } => {
                self.entries.retain(|e| e.period != *period);
            }
            AdjustmentModification::Clear => self.clear(),
        }
    }

    /// Resolves to one amount per period; the last entry for a period wins.
    pub fn to_map(&self) -> AdjustmentMap {
        adjustments_from_entries(&self.entries)
    }
}

impl SavingsPlanInput {
    /// Returns a copy of the plan with the modifications applied in order.
    /// The original plan is left untouched.
    pub fn with_modifications(&self, modifications: &[AdjustmentModification]) -> SavingsPlanInput {
        let mut set = AdjustmentSet::from_map(&self.adjustments);
        for modification in modifications {
            set.apply(modification);
        }

        let mut plan = self.clone();
        plan.adjustments = set.to_map();
        plan
    }
}
