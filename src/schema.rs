use crate::error::Result;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Sparse per-period contribution overrides, keyed by 1-based period index.
pub type AdjustmentMap = BTreeMap<u32, i64>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct AdjustmentEntry {
    #[serde(alias = "month")]
    #[schemars(
        description = "1-based installment number this override applies to (1 = the month of the start date)."
    )]
    pub period: u32,

    #[schemars(
        description = "Contribution for that installment only, in the smallest currency unit. Replaces the default monthly amount."
    )]
    pub amount: i64,
}

impl AdjustmentEntry {
    pub fn new(period: u32, amount: i64) -> Self {
        Self { period, amount }
    }
}

/// Collapses a list of entered adjustments into a lookup map. Later entries for
/// the same period replace earlier ones.
pub fn adjustments_from_entries(entries: &[AdjustmentEntry]) -> AdjustmentMap {
    entries.iter().map(|e| (e.period, e.amount)).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct SavingsPlanInput {
    #[schemars(
        description = "Default contribution per month in the smallest currency unit (e.g. yen). Must be greater than 0."
    )]
    pub monthly_amount: i64,

    #[schemars(description = "Plan duration in whole years. The schedule has period_years * 12 installments.")]
    pub period_years: u32,

    #[schemars(
        description = "Nominal annual interest rate as a percentage (2.5 means 2.5% per year). Divided by 12 for the monthly rate."
    )]
    pub annual_interest_rate: f64,

    #[schemars(description = "Date of the first installment in YYYY-MM-DD format.")]
    pub start_date: NaiveDate,

    #[serde(default)]
    #[schemars(
        description = "Map of installment number (1-based) to override amount. Installment numbers outside the plan are ignored."
    )]
    pub adjustments: AdjustmentMap,
}

impl SavingsPlanInput {
    pub fn new(
        monthly_amount: i64,
        period_years: u32,
        annual_interest_rate: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            monthly_amount,
            period_years,
            annual_interest_rate,
            start_date,
            adjustments: BTreeMap::new(),
        }
    }

    pub fn with_adjustment(mut self, period: u32, amount: i64) -> Self {
        self.adjustments.insert(period, amount);
        self
    }

    /// Total number of monthly installments, or `None` if it does not fit in a `u32`.
    pub fn total_periods(&self) -> Option<u32> {
        self.period_years.checked_mul(12)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(SavingsPlanInput)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// Who a plan belongs to. Carried next to the plan; never affects the numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct PlanHolder {
    #[schemars(description = "Display name of the savings plan (e.g. 'Regular Savings').")]
    pub plan_name: String,

    #[schemars(description = "Customer name as entered on the form.")]
    pub customer_name: String,

    #[schemars(description = "Employee number of the customer.")]
    pub employee_number: String,

    #[schemars(description = "Account the contributions are drawn from.")]
    pub account_number: String,
}
