use std::cmp::Reverse;

use chrono::Datelike;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use crate::decimal::{format_percent, format_whole_currency, Money, Rate};

/// due-date ordinal for debts without a due date, later than any real date
pub const FAR_FUTURE_ORDINAL: i32 = 99_999_999;

/// APR (percent) at or above which a debt is flagged for its rate
pub const HIGH_APR_PERCENT: Decimal = dec!(20);

/// balance at or above which a debt is flagged for its size
pub const HIGH_BALANCE: Decimal = dec!(5000);

/// composite "what needs attention first" sort key
///
/// Fields compare in declaration order: severity, APR, balance and minimum
/// payment descending, then due date ascending (absent dates last), then
/// lower-cased name ascending.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriorityKey {
    pub severity: Reverse<u8>,
    pub apr: Reverse<Rate>,
    pub balance: Reverse<Money>,
    pub min_payment: Reverse<Money>,
    pub due_ordinal: i32,
    pub name: String,
}

impl PriorityKey {
    pub fn for_debt(debt: &Debt) -> Self {
        Self {
            severity: Reverse(debt.status.severity()),
            apr: Reverse(debt.apr),
            balance: Reverse(debt.balance),
            min_payment: Reverse(debt.min_payment),
            due_ordinal: debt
                .due_date
                .map(|d| d.num_days_from_ce())
                .unwrap_or(FAR_FUTURE_ORDINAL),
            name: debt.sort_name(),
        }
    }
}

/// a debt annotated with its 1-based priority rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDebt {
    pub priority_rank: usize,
    pub priority_reason: String,
    #[serde(flatten)]
    pub debt: Debt,
}

/// rank debts by urgency, independent of the payoff strategy
pub fn rank_debts(debts: &[Debt]) -> Vec<RankedDebt> {
    let mut sorted: Vec<&Debt> = debts.iter().collect();
    sorted.sort_by_cached_key(|d| PriorityKey::for_debt(d));

    let ranked: Vec<RankedDebt> = sorted
        .into_iter()
        .enumerate()
        .map(|(i, debt)| RankedDebt {
            priority_rank: i + 1,
            priority_reason: priority_reason(debt),
            debt: debt.clone(),
        })
        .collect();

    debug!(
        "ranked {} debts, top: {:?}",
        ranked.len(),
        ranked.first().map(|r| r.debt.name.as_str())
    );
    ranked
}

/// human-readable explanation for a debt's rank; the first matching rule wins
pub fn priority_reason(debt: &Debt) -> String {
    if debt.status.is_past_due() {
        return format!("{} + {} APR", debt.status.label(), format_percent(debt.apr));
    }
    if debt.apr.as_percentage() >= HIGH_APR_PERCENT {
        return format!("High APR {}", format_percent(debt.apr));
    }
    if debt.balance.as_decimal() >= HIGH_BALANCE {
        return format!("High Balance {}", format_whole_currency(debt.balance));
    }
    "Due date / minimum driven".to_string()
}
