use crate::engine::{LedgerRow, PaymentStatus};
use crate::error::Result;
use crate::schema::SavingsPlanInput;
use crate::utils::nominal_contributions;
use serde::{Deserialize, Serialize};

/// Headline figures for one computed schedule.
///
/// `total_contributions_scheduled` is the nominal `monthly_amount * total_periods`
/// and ignores adjustments; `total_contributions_actual` is the ledger's column sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsScheduleSummary {
    pub total_periods: u32,
    pub total_contributions_scheduled: i64,
    pub total_contributions_actual: i64,
    pub total_interest_accrued: i64,
    pub final_balance: i64,
    pub completed_periods: u32,
    pub today_periods: u32,
    pub scheduled_periods: u32,
    /// Percentage of periods already paid (status `Completed`).
    pub completion_rate: f64,
}

impl SavingsScheduleSummary {
    pub fn from_ledger(input: &SavingsPlanInput, ledger: &[LedgerRow]) -> Result<Self> {
        let total_periods = ledger.len() as u32;

        let mut completed_periods = 0;
        let mut today_periods = 0;
        let mut scheduled_periods = 0;
        for row in ledger {
            match row.status {
                PaymentStatus::Completed => completed_periods += 1,
                PaymentStatus::Today => today_periods += 1,
                PaymentStatus::Scheduled => scheduled_periods += 1,
            }
        }

        let completion_rate = if total_periods == 0 {
            0.0
        } else {
            completed_periods as f64 / total_periods as f64 * 100.0
        };

        Ok(Self {
            total_periods,
            total_contributions_scheduled: nominal_contributions(input.monthly_amount, total_periods)?,
            total_contributions_actual: ledger.iter().map(|r| r.contribution_amount).sum(),
            total_interest_accrued: ledger.iter().map(|r| r.interest_accrued).sum(),
            final_balance: ledger.last().map(|r| r.balance_after).unwrap_or(0),
            completed_periods,
            today_periods,
            scheduled_periods,
            completion_rate,
        })
    }

    /// Final balance minus the nominal contribution total. Equals
    /// `total_interest_accrued` only when no adjustment changed the contributions.
    pub fn balance_over_nominal(&self) -> i64 {
        self.final_balance - self.total_contributions_scheduled
    }

    pub fn has_adjustment_divergence(&self) -> bool {
        self.total_contributions_actual != self.total_contributions_scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SavingsScheduleCalculator;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seed_summary() {
        let input = SavingsPlanInput::new(3000, 1, 2.5, date(2025, 1, 1));
        let ledger = SavingsScheduleCalculator::new()
            .build_ledger(&input, date(2025, 6, 15))
            .unwrap();
        let summary = SavingsScheduleSummary::from_ledger(&input, &ledger).unwrap();

        assert_eq!(summary.total_periods, 12);
        assert_eq!(summary.total_contributions_scheduled, 36000);
        assert_eq!(summary.total_contributions_actual, 36000);
        assert_eq!(summary.completed_periods, 6);
        assert_eq!(summary.today_periods, 0);
        assert_eq!(summary.scheduled_periods, 6);
        assert!((summary.completion_rate - 50.0).abs() < 1e-9);
        assert_eq!(summary.final_balance, ledger[11].balance_after);
        assert_eq!(
            summary.final_balance,
            summary.total_contributions_actual + summary.total_interest_accrued
        );
        assert_eq!(summary.balance_over_nominal(), summary.total_interest_accrued);
        assert!(!summary.has_adjustment_divergence());
    }

    #[test]
    fn test_nominal_total_ignores_adjustments() {
        let input = SavingsPlanInput::new(3000, 1, 2.5, date(2025, 1, 1)).with_adjustment(3, 1000);
        let ledger = SavingsScheduleCalculator::new()
            .build_ledger(&input, date(2025, 6, 15))
            .unwrap();
        let summary = SavingsScheduleSummary::from_ledger(&input, &ledger).unwrap();

        assert_eq!(summary.total_contributions_scheduled, 36000);
        assert_eq!(summary.total_contributions_actual, 35000);
        assert!(summary.has_adjustment_divergence());
        assert_eq!(
            summary.balance_over_nominal(),
            summary.total_interest_accrued - 2000
        );
    }

    #[test]
    fn test_nominal_overflow_is_not_clamped() {
        let input = SavingsPlanInput::new(i64::MAX / 4, 1, 0.0, date(2025, 1, 1));
        let ledger: Vec<LedgerRow> = (1..=12)
            .map(|period_index| LedgerRow {
                period_index,
                payment_date: date(2025, period_index, 1),
                contribution_amount: 0,
                interest_accrued: 0,
                balance_after: 0,
                status: PaymentStatus::Scheduled,
                note: "Adjusted: ¥0".to_string(),
            })
            .collect();

        let result = SavingsScheduleSummary::from_ledger(&input, &ledger);
        assert!(matches!(
            result,
            Err(crate::error::SavingsScheduleError::AmountOverflow { period: 12 })
        ));
    }

    #[test]
    fn test_empty_ledger() {
        let input = SavingsPlanInput::new(3000, 1, 2.5, date(2025, 1, 1));
        let summary = SavingsScheduleSummary::from_ledger(&input, &[]).unwrap();

        assert_eq!(summary.total_periods, 0);
        assert_eq!(summary.final_balance, 0);
        assert_eq!(summary.completion_rate, 0.0);
    }
}
