use crate::clock::Clock;
use crate::error::{Result, SavingsScheduleError};
use crate::schema::SavingsPlanInput;
use crate::summary::SavingsScheduleSummary;
use crate::utils::{format_amount, payment_date_for_period, validate_plan_input};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// Where an installment stands relative to the as-of date.
///
/// Variants are ordered along the only transition real time allows:
/// `Scheduled -> Today -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Scheduled,
    Today,
    Completed,
}

impl PaymentStatus {
    pub fn classify(payment_date: NaiveDate, as_of: NaiveDate) -> Self {
        if payment_date < as_of {
            Self::Completed
        } else if payment_date == as_of {
            Self::Today
        } else {
            Self::Scheduled
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub period_index: u32,
    pub payment_date: NaiveDate,
    pub contribution_amount: i64,
    /// Interest on the balance carried in from the previous period, rounded to a whole unit.
    pub interest_accrued: i64,
    pub balance_after: i64,
    pub status: PaymentStatus,
    /// Empty unless an adjustment replaced the default contribution.
    pub note: String,
}

impl LedgerRow {
    pub fn is_adjusted(&self) -> bool {
        !self.note.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsSchedule {
    pub ledger: Vec<LedgerRow>,
    pub summary: SavingsScheduleSummary,
}

impl SavingsSchedule {
    /// The first `count` rows, as shown in condensed listings.
    pub fn preview(&self, count: usize) -> &[LedgerRow] {
        &self.ledger[..count.min(self.ledger.len())]
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Upper bound on the up-front ledger reservation; longer terms grow as they go.
const MAX_PREALLOCATED_PERIODS: usize = 1200;

#[derive(Debug, Clone, Copy, Default)]
pub struct SavingsScheduleCalculator;

impl SavingsScheduleCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Builds the full ledger from period 1. `as_of` only affects each row's status.
    pub fn compute(&self, input: &SavingsPlanInput, as_of: NaiveDate) -> Result<SavingsSchedule> {
        let ledger = self.build_ledger(input, as_of)?;
        let summary = SavingsScheduleSummary::from_ledger(input, &ledger)?;

        Ok(SavingsSchedule { ledger, summary })
    }

    pub fn compute_with_clock<C: Clock>(
        &self,
        input: &SavingsPlanInput,
        clock: &C,
    ) -> Result<SavingsSchedule> {
        self.compute(input, clock.today())
    }

    pub fn build_ledger(&self, input: &SavingsPlanInput, as_of: NaiveDate) -> Result<Vec<LedgerRow>> {
        let total_periods = validate_plan_input(input)?;
        let monthly_rate = input.annual_interest_rate / 100.0 / 12.0;

        let ignored = input
            .adjustments
            .keys()
            .filter(|&&p| p == 0 || p > total_periods)
            .count();
        if ignored > 0 {
            debug!(
                "Ignoring {} adjustment(s) outside periods 1..={}",
                ignored, total_periods
            );
        }

        let mut ledger = Vec::with_capacity((total_periods as usize).min(MAX_PREALLOCATED_PERIODS));
        let mut balance: i64 = 0;

        for period_index in 1..=total_periods {
            let payment_date = payment_date_for_period(input.start_date, period_index)?;

            let (contribution, note) = match input.adjustments.get(&period_index) {
                Some(&amount) => (amount, format!("Adjusted: ¥{}", format_amount(amount))),
                None => (input.monthly_amount, String::new()),
            };

            // Accrues on last period's closing balance, before this period's deposit.
            let interest = round_interest(balance, monthly_rate, period_index)?;

            balance = balance
                .checked_add(contribution)
                .and_then(|b| b.checked_add(interest))
                .ok_or(SavingsScheduleError::AmountOverflow {
                    period: period_index,
                })?;

            ledger.push(LedgerRow {
                period_index,
                payment_date,
                contribution_amount: contribution,
                interest_accrued: interest,
                balance_after: balance,
                status: PaymentStatus::classify(payment_date, as_of),
                note,
            });
        }

        debug!(
            "Built ledger with {} periods from {} (as of {})",
            ledger.len(),
            input.start_date,
            as_of
        );

        Ok(ledger)
    }
}

/// Half-to-even rounding of one period's interest, no fractional carry.
fn round_interest(balance: i64, monthly_rate: f64, period: u32) -> Result<i64> {
    let interest = (balance as f64 * monthly_rate).round_ties_even();

    if !interest.is_finite() || interest >= i64::MAX as f64 || interest <= i64::MIN as f64 {
        return Err(SavingsScheduleError::AmountOverflow { period });
    }

    Ok(interest as i64)
}

pub fn compute_schedule(input: &SavingsPlanInput, as_of: NaiveDate) -> Result<SavingsSchedule> {
    SavingsScheduleCalculator::new().compute(input, as_of)
}
