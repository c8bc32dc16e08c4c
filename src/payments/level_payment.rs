use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};

/// constant monthly payment that retires `balance` in exactly `months` payments
///
/// payment = r * B / (1 - (1 + r)^-n) at the monthly rate r. A zero rate
/// splits the balance evenly. When the denominator degenerates the whole
/// balance is returned, i.e. payoff in one period. A payment too large to
/// represent saturates at `Money::MAX`. The cost is logarithmic in `months`.
pub fn solve_level_payment(balance: Money, apr: Rate, months: u32) -> Money {
    if months == 0 {
        return Money::ZERO;
    }

    let r = apr.monthly_rate().as_decimal();
    if r.is_zero() {
        return balance / Decimal::from(months);
    }

    // (1 + r)^-n, zero once the compound factor outgrows Decimal
    let discount = match compound_factor(r, months) {
        Some(factor) if !factor.is_zero() => Decimal::ONE / factor,
        _ => Decimal::ZERO,
    };

    let denominator = Decimal::ONE - discount;
    if denominator <= Decimal::ZERO {
        return balance;
    }

    r.checked_mul(balance.as_decimal())
        .and_then(|interest| interest.checked_div(denominator))
        .map(Money::from_decimal)
        .unwrap_or(Money::MAX)
}

/// (1 + rate)^periods by repeated squaring, `None` on overflow
fn compound_factor(rate: Decimal, periods: u32) -> Option<Decimal> {
    let mut base = Decimal::ONE.checked_add(rate)?;
    let mut factor = Decimal::ONE;
    let mut remaining = periods;
    while remaining > 0 {
        if remaining & 1 == 1 {
            factor = factor.checked_mul(base)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(factor)
}
