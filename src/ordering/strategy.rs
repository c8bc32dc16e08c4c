use std::cmp::Reverse;

use log::debug;

use crate::debt::Debt;
use crate::decimal::{Money, Rate};
use crate::types::Strategy;

/// per-strategy ordering within a severity group
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrategyRank {
    /// APR descending, then balance descending
    Avalanche {
        apr: Reverse<Rate>,
        balance: Reverse<Money>,
    },
    /// balance ascending, then APR descending
    Snowball {
        balance: Money,
        apr: Reverse<Rate>,
    },
    /// custom order number ascending
    Custom { order: i64 },
}

/// payoff-priority sort key
///
/// Compares `group` first (negated severity when status override is on,
/// zero otherwise), then the strategy rank, then lower-cased name. The name
/// makes the order total, so the first debt is always well defined.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrategyKey {
    pub group: i16,
    pub rank: StrategyRank,
    pub name: String,
}

impl StrategyKey {
    pub fn for_debt(debt: &Debt, strategy: Strategy, status_override: bool) -> Self {
        let group = if status_override {
            -(debt.status.severity() as i16)
        } else {
            0
        };

        let rank = match strategy {
            Strategy::Avalanche => StrategyRank::Avalanche {
                apr: Reverse(debt.apr),
                balance: Reverse(debt.balance),
            },
            Strategy::Snowball => StrategyRank::Snowball {
                balance: debt.balance,
                apr: Reverse(debt.apr),
            },
            Strategy::Custom => StrategyRank::Custom {
                order: debt.custom_order,
            },
        };

        Self {
            group,
            rank,
            name: debt.sort_name(),
        }
    }
}

/// debts in payoff-priority order for the given strategy
pub fn order_debts<'a>(debts: &'a [Debt], strategy: Strategy, status_override: bool) -> Vec<&'a Debt> {
    let mut ordered: Vec<&Debt> = debts.iter().collect();
    ordered.sort_by_cached_key(|d| StrategyKey::for_debt(d, strategy, status_override));

    debug!(
        "{} order (status override {}): {:?}",
        strategy,
        status_override,
        ordered.iter().map(|d| d.name.as_str()).collect::<Vec<_>>()
    );
    ordered
}
