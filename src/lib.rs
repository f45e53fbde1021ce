//! # Installment Savings Builder
//!
//! A library for turning an installment savings plan (a default monthly contribution,
//! a term in years, a nominal annual rate, a start date and a few per-month overrides)
//! into a dense month-by-month ledger with aggregate totals.
//!
//! ## Core Concepts
//!
//! - **Period**: One monthly installment, numbered from 1. Period `n` is paid
//!   `n - 1` calendar months after the start date.
//! - **Adjustment**: A replacement contribution for a single period.
//! - **Ledger**: One row per period with contribution, interest, running balance and status.
//! - **Interest timing**: Each period earns `balance * rate / 12` on the balance carried
//!   in from the previous period, rounded to a whole currency unit before it is added.
//! - **Nominal total**: `monthly_amount * total_periods`, reported as-is even when
//!   adjustments make the ledger's real contributions differ.
//!
//! ## Example
//!
//! ```rust,ignore
//! use installment_savings_builder::*;
//! use chrono::NaiveDate;
//!
//! let plan = SavingsPlanInput::new(3000, 1, 2.5, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
//!     .with_adjustment(3, 1000);
//!
//! let schedule = process_savings_plan(&plan, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()).unwrap();
//! assert_eq!(schedule.ledger.len(), 12);
//! assert_eq!(schedule.summary.total_contributions_scheduled, 36_000);
//! ```

pub mod clock;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod overrides;
pub mod schema;
pub mod store;
pub mod summary;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{compute_schedule, LedgerRow, PaymentStatus, SavingsSchedule, SavingsScheduleCalculator};
pub use error::{Result, SavingsScheduleError};
pub use ingestion::*;
pub use overrides::*;
pub use schema::*;
pub use store::{PlanStore, StoredPlan};
pub use summary::SavingsScheduleSummary;
pub use utils::*;

use chrono::NaiveDate;
use log::{debug, info, warn};

pub struct SavingsScheduleProcessor;

impl SavingsScheduleProcessor {
    pub fn process(input: &SavingsPlanInput, as_of: NaiveDate) -> Result<SavingsSchedule> {
        let total_periods = validate_plan_input(input)?;

        info!(
            "Processing savings plan: {} x {} periods at {}% from {}",
            input.monthly_amount, total_periods, input.annual_interest_rate, input.start_date
        );
        debug!(
            "Plan has {} adjustment(s), status evaluated as of {}",
            input.adjustments.len(),
            as_of
        );

        let schedule = SavingsScheduleCalculator::new().compute(input, as_of)?;

        if schedule.summary.has_adjustment_divergence() {
            warn!(
                "Scheduled contributions ({}) differ from ledger contributions ({}) due to adjustments",
                schedule.summary.total_contributions_scheduled,
                schedule.summary.total_contributions_actual
            );
        }

        Ok(schedule)
    }

    pub fn process_with_clock<C: Clock>(input: &SavingsPlanInput, clock: &C) -> Result<SavingsSchedule> {
        Self::process(input, clock.today())
    }

    /// Uses the local calendar date to classify installments.
    pub fn process_today(input: &SavingsPlanInput) -> Result<SavingsSchedule> {
        Self::process_with_clock(input, &SystemClock)
    }

    pub fn process_form(form: PlanForm, as_of: NaiveDate) -> Result<(PlanHolder, SavingsSchedule)> {
        let (holder, input) = form.into_plan()?;
        let schedule = Self::process(&input, as_of)?;
        Ok((holder, schedule))
    }
}

pub fn process_savings_plan(input: &SavingsPlanInput, as_of: NaiveDate) -> Result<SavingsSchedule> {
    SavingsScheduleProcessor::process(input, as_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_processing() {
        let input = SavingsPlanInput::new(3000, 3, 2.5, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
            .with_adjustment(2, 0)
            .with_adjustment(36, 10_000);

        let schedule =
            process_savings_plan(&input, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()).unwrap();

        assert_eq!(schedule.ledger.len(), 36);
        assert_eq!(schedule.summary.total_periods, 36);
        assert_eq!(schedule.summary.total_contributions_scheduled, 108_000);
        assert_eq!(schedule.summary.total_contributions_actual, 108_000 - 3000 + 7000);
        assert_eq!(schedule.summary.completed_periods, 12);
        assert_eq!(schedule.summary.today_periods, 1);
        assert_eq!(schedule.ledger[1].contribution_amount, 0);
        assert_eq!(schedule.ledger[35].note, "Adjusted: ¥10,000");
    }

    #[test]
    fn test_process_with_fixed_clock() {
        let input = SavingsPlanInput::new(3000, 1, 2.5, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let clock = FixedClock(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());

        let a = SavingsScheduleProcessor::process_with_clock(&input, &clock).unwrap();
        let b = process_savings_plan(&input, clock.today()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_process_today_runs() {
        let input = SavingsPlanInput::new(3000, 1, 2.5, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let schedule = SavingsScheduleProcessor::process_today(&input).unwrap();
        assert_eq!(schedule.ledger.len(), 12);
    }

    #[test]
    fn test_process_form() {
        let form = PlanForm {
            holder: PlanHolder {
                plan_name: "Regular Savings".to_string(),
                ..PlanHolder::default()
            },
            contribution: ContributionSpec::Units {
                unit_price: 1000,
                units: 3,
            },
            period_years: 1,
            annual_interest_rate: 2.5,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            adjustments: AdjustmentSet::new(),
        };

        let (holder, schedule) =
            SavingsScheduleProcessor::process_form(form, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
                .unwrap();
        assert_eq!(holder.plan_name, "Regular Savings");
        assert_eq!(schedule.ledger[1].balance_after, 6006);
    }
}
