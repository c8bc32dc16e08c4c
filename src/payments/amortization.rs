use chrono::NaiveDate;
use log::{debug, trace, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar::add_month_clamped;
use crate::decimal::{Money, Rate};
use crate::errors::{PayoffError, Result};

/// safety bound on schedule length (100 years)
pub const MAX_SCHEDULE_PERIODS: u32 = 1200;

/// remaining balance at or below which a debt counts as paid off
pub const PAYOFF_EPSILON: Decimal = dec!(0.005);

/// one month of an amortization schedule, every amount rounded to cents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based
    pub month_index: u32,
    pub date: NaiveDate,
    pub starting_balance: Money,
    /// payment actually applied; the final one may be below the nominal payment
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub ending_balance: Money,
}

/// complete payoff projection for one debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub months: u32,
    /// calendar month following the final payment
    pub payoff_date: NaiveDate,
    /// unrounded sum of period interest
    pub total_interest: Money,
    pub schedule: Vec<ScheduleEntry>,
}

impl AmortizationResult {
    fn paid_off(start_date: NaiveDate) -> Self {
        Self {
            months: 0,
            payoff_date: start_date,
            total_interest: Money::ZERO,
            schedule: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// get entry for a 1-based month
    pub fn get_entry(&self, month_index: u32) -> Option<&ScheduleEntry> {
        let index = month_index.checked_sub(1)?;
        self.schedule.get(index as usize)
    }

    /// sum of the cent-rounded payments
    pub fn total_paid(&self) -> Money {
        self.schedule.iter().map(|e| e.payment).sum()
    }

    pub fn final_balance(&self) -> Money {
        self.schedule
            .last()
            .map(|e| e.ending_balance)
            .unwrap_or(Money::ZERO)
    }
}

/// project a fixed monthly payment against a balance until it reaches zero
///
/// Fails before producing any schedule when the payment is not positive or
/// does not exceed the first month's interest. Entries are dated from
/// `start_date`, advancing one month at a time with the day clamped to 28.
pub fn amortize(
    balance: Money,
    apr: Rate,
    payment: Money,
    start_date: NaiveDate,
) -> Result<AmortizationResult> {
    if !balance.is_positive() {
        return Ok(AmortizationResult::paid_off(start_date));
    }

    if !payment.is_positive() {
        warn!("rejected schedule for balance {}: payment {} is not positive", balance, payment);
        return Err(PayoffError::NonPositivePayment { payment });
    }

    let rate = apr.monthly_rate();
    let first_interest = balance.interest_at(rate);
    if !rate.is_zero() && payment <= first_interest {
        warn!(
            "rejected schedule for balance {}: payment {} does not cover interest {}",
            balance, payment, first_interest
        );
        return Err(PayoffError::PaymentTooLow {
            payment,
            interest: first_interest.round_cents(),
        });
    }

    let mut remaining = balance;
    let mut total_interest = Money::ZERO;
    let mut date = start_date;
    let mut schedule = Vec::new();
    let mut month_index = 0u32;

    while remaining.as_decimal() > PAYOFF_EPSILON && month_index < MAX_SCHEDULE_PERIODS {
        month_index += 1;

        let interest = remaining.interest_at(rate);
        let mut principal = payment - interest;
        let mut applied = payment;
        if principal > remaining {
            principal = remaining;
            applied = interest + principal;
        }
        let ending = remaining - principal;
        total_interest = total_interest.saturating_add(interest);

        trace!(
            "month {} ({}): start {}, paid {}, interest {}, end {}",
            month_index,
            date,
            remaining.round_cents(),
            applied.round_cents(),
            interest.round_cents(),
            ending.round_cents()
        );

        schedule.push(ScheduleEntry {
            month_index,
            date,
            starting_balance: remaining.round_cents(),
            payment: applied.round_cents(),
            principal: principal.round_cents(),
            interest: interest.round_cents(),
            ending_balance: ending.round_cents(),
        });

        remaining = ending;
        date = add_month_clamped(date);
    }

    if remaining.as_decimal() > PAYOFF_EPSILON {
        warn!(
            "schedule for balance {} at payment {} still owes {} after {} periods",
            balance, payment, remaining, MAX_SCHEDULE_PERIODS
        );
        return Err(PayoffError::ScheduleDidNotConverge {
            periods: MAX_SCHEDULE_PERIODS,
            remaining: remaining.round_cents(),
        });
    }

    debug!(
        "balance {} at {} per month: {} months, interest {}, paid off {}",
        balance,
        payment,
        month_index,
        total_interest.round_cents(),
        date
    );

    Ok(AmortizationResult {
        months: month_index,
        payoff_date: date,
        total_interest,
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_rate_schedule() {
        let result = amortize(
            Money::from_major(1_000),
            Rate::ZERO,
            Money::from_major(100),
            ymd(2024, 1, 1),
        )
        .unwrap();

        assert_eq!(result.months, 10);
        assert_eq!(result.total_interest, Money::ZERO);
        assert_eq!(result.schedule.len(), 10);
        assert_eq!(result.get_entry(10).unwrap().ending_balance, Money::ZERO);
        assert_eq!(result.get_entry(1).unwrap().date, ymd(2024, 1, 1));
        assert_eq!(result.get_entry(10).unwrap().date, ymd(2024, 10, 1));
        assert_eq!(result.payoff_date, ymd(2024, 11, 1));
        assert_eq!(result.total_paid(), Money::from_major(1_000));
        assert!(result.get_entry(0).is_none());
    }

    #[test]
    fn test_payment_equal_to_interest_is_rejected() {
        let err = amortize(
            Money::from_major(5_000),
            Rate::from_apr(dec!(20)),
            Money::from_cents(8_333),
            ymd(2024, 1, 1),
        )
        .unwrap_err();

        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("payment too low to ever amortize"));
    }

    #[test]
    fn test_non_positive_payment_is_rejected() {
        for payment in [Money::ZERO, Money::from_major(-10)] {
            let err = amortize(Money::from_major(100), Rate::ZERO, payment, ymd(2024, 1, 1)).unwrap_err();
            assert!(matches!(err, PayoffError::NonPositivePayment { .. }));
            assert!(err.to_string().contains("payment must be greater than 0"));
        }
    }

    #[test]
    fn test_paid_off_balance_yields_empty_schedule() {
        let result = amortize(Money::ZERO, Rate::from_apr(dec!(20)), Money::ZERO, ymd(2024, 5, 1)).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.months, 0);
        assert_eq!(result.payoff_date, ymd(2024, 5, 1));
        assert_eq!(result.final_balance(), Money::ZERO);
    }

    #[test]
    fn test_final_payment_is_capped() {
        let result = amortize(
            Money::from_major(250),
            Rate::ZERO,
            Money::from_major(100),
            ymd(2024, 1, 1),
        )
        .unwrap();

        assert_eq!(result.months, 3);
        let last = result.get_entry(3).unwrap();
        assert_eq!(last.payment, Money::from_major(50));
        assert_eq!(last.principal, Money::from_major(50));
        assert_eq!(last.ending_balance, Money::ZERO);
    }

    #[test]
    fn test_interest_bearing_schedule() {
        let balance = Money::from_major(1_000);
        let result = amortize(balance, Rate::from_apr(dec!(12)), Money::from_major(100), ymd(2024, 1, 1)).unwrap();

        assert_eq!(result.months, 11);
        let first = result.get_entry(1).unwrap();
        assert_eq!(first.interest, Money::from_major(10));
        assert_eq!(first.principal, Money::from_major(90));
        assert_eq!(first.ending_balance, Money::from_major(910));

        // rounded principal portions add back up to the balance
        let principal: Money = result.schedule.iter().map(|e| e.principal).sum();
        assert!((principal - balance).abs() <= Money::from_cents(10));
        assert!(result.total_interest.is_positive());
        assert_eq!(result.final_balance(), Money::ZERO);
    }

    #[test]
    fn test_dates_clamp_to_28th() {
        let result = amortize(
            Money::from_major(300),
            Rate::ZERO,
            Money::from_major(100),
            ymd(2024, 1, 31),
        )
        .unwrap();

        let dates: Vec<NaiveDate> = result.schedule.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![ymd(2024, 1, 31), ymd(2024, 2, 28), ymd(2024, 3, 28)]);
        assert_eq!(result.payoff_date, ymd(2024, 4, 28));
    }

    #[test]
    fn test_barely_sufficient_payment_hits_period_cap() {
        // covers interest by a fraction of a cent; needs far more than 100 years
        let err = amortize(
            Money::from_major(100_000),
            Rate::from_apr(dec!(12)),
            Money::from_str_exact("1000.0001").unwrap(),
            ymd(2024, 1, 1),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            PayoffError::ScheduleDidNotConverge { periods: MAX_SCHEDULE_PERIODS, .. }
        ));
        assert!(!err.is_invalid_input());
    }
}
