use crate::error::{Result, SavingsScheduleError};
use crate::overrides::AdjustmentSet;
use crate::schema::{PlanHolder, SavingsPlanInput};
use crate::utils::validate_plan_input;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the monthly contribution was entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContributionSpec {
    Fixed {
        amount: i64,
    },
    /// Contribution bought as a number of units at a unit price.
    Units {
        unit_price: i64,
        units: i64,
    },
}

impl ContributionSpec {
    pub fn monthly_amount(&self) -> Result<i64> {
        match *self {
            ContributionSpec::Fixed { amount } => Ok(amount),
            ContributionSpec::Units { unit_price, units } => {
                if unit_price <= 0 || units <= 0 {
                    return Err(SavingsScheduleError::InvalidUnitPricing { unit_price, units });
                }
                unit_price
                    .checked_mul(units)
                    .ok_or(SavingsScheduleError::InvalidUnitPricing { unit_price, units })
            }
        }
    }
}

/// Raw values collected by a plan entry form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlanForm {
    #[serde(default)]
    pub holder: PlanHolder,
    pub contribution: ContributionSpec,
    pub period_years: u32,
    pub annual_interest_rate: f64,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub adjustments: AdjustmentSet,
}

impl PlanForm {
    /// Normalizes the form into a validated plan. Repeated adjustments for the
    /// same period collapse to the last one entered.
    pub fn into_plan(self) -> Result<(PlanHolder, SavingsPlanInput)> {
        let input = SavingsPlanInput {
            monthly_amount: self.contribution.monthly_amount()?,
            period_years: self.period_years,
            annual_interest_rate: self.annual_interest_rate,
            start_date: self.start_date,
            adjustments: self.adjustments.to_map(),
        };

        validate_plan_input(&input)?;

        Ok((self.holder, input))
    }
}
