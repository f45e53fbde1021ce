use crate::error::{Result, SavingsScheduleError};
use crate::schema::SavingsPlanInput;
use chrono::{Datelike, Months, NaiveDate};

/// Adds whole calendar months, keeping the day of month where it exists and
/// clamping to the month end otherwise (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months)).ok_or_else(|| {
        SavingsScheduleError::DateError(format!(
            "{} + {} months is outside the supported calendar range",
            date, months
        ))
    })
}

/// Payment date of a 1-based installment.
pub fn payment_date_for_period(start_date: NaiveDate, period_index: u32) -> Result<NaiveDate> {
    add_months(start_date, period_index.saturating_sub(1))
}

pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let year_diff = end.year() - start.year();
    let month_diff = end.month() as i32 - start.month() as i32;
    year_diff * 12 + month_diff
}

/// Checks the calculator preconditions and returns the number of installments.
pub fn validate_plan_input(input: &SavingsPlanInput) -> Result<u32> {
    if input.monthly_amount <= 0 {
        return Err(SavingsScheduleError::InvalidMonthlyAmount(input.monthly_amount));
    }

    let total_periods = match input.total_periods() {
        Some(total) if total > 0 => total,
        _ => return Err(SavingsScheduleError::InvalidPeriodYears(input.period_years)),
    };

    if !input.annual_interest_rate.is_finite() || input.annual_interest_rate < 0.0 {
        return Err(SavingsScheduleError::InvalidInterestRate(
            input.annual_interest_rate,
        ));
    }

    // Out-of-range keys are never visited, so their amounts don't matter.
    for (&period, &amount) in input.adjustments.range(1..=total_periods) {
        if amount < 0 {
            return Err(SavingsScheduleError::InvalidAdjustmentAmount { period, amount });
        }
    }

    nominal_contributions(input.monthly_amount, total_periods)?;

    // The whole term must be representable before any row is built.
    payment_date_for_period(input.start_date, total_periods)?;

    Ok(total_periods)
}

/// `monthly_amount * total_periods`, failing instead of clamping on overflow.
pub fn nominal_contributions(monthly_amount: i64, total_periods: u32) -> Result<i64> {
    monthly_amount
        .checked_mul(i64::from(total_periods))
        .ok_or(SavingsScheduleError::AmountOverflow {
            period: total_periods,
        })
}

/// Formats an amount with comma thousands separators (e.g. `1234567` -> `1,234,567`).
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
