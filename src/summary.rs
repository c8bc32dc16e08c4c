use std::cmp::Reverse;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use crate::decimal::{Money, Rate};
use crate::types::DebtId;

/// how many debts the top-balance and top-APR lists keep
pub const TOP_LIST_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopBalance {
    pub id: DebtId,
    pub name: String,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopApr {
    pub id: DebtId,
    pub name: String,
    pub apr: Rate,
}

/// a debt in bill-calendar order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueEntry {
    pub id: DebtId,
    pub name: String,
    pub due_day: Option<u32>,
    pub balance: Money,
    pub min_payment: Money,
}

/// totals and quick insights over a debt list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioOverview {
    pub debt_count: usize,
    pub total_balance: Money,
    pub total_min_payment: Money,
    /// unweighted mean; zero for an empty list
    pub average_apr: Rate,
    pub top_balances: Vec<TopBalance>,
    pub top_aprs: Vec<TopApr>,
    pub by_due_day: Vec<DueEntry>,
}

impl PortfolioOverview {
    /// every debt counts, including excluded and paid-off ones
    pub fn from_debts(debts: &[Debt]) -> Self {
        let debt_count = debts.len();
        let total_balance: Money = debts.iter().map(|d| d.balance).sum();
        let total_min_payment: Money = debts.iter().map(|d| d.min_payment).sum();

        let average_apr = if debts.is_empty() {
            Rate::ZERO
        } else {
            let sum = debts
                .iter()
                .fold(Decimal::ZERO, |acc, d| acc.saturating_add(d.apr.as_decimal()));
            Rate::from_decimal(sum / Decimal::from(debt_count))
        };

        let mut by_balance: Vec<&Debt> = debts.iter().collect();
        by_balance.sort_by_cached_key(|d| (Reverse(d.balance), d.sort_name()));
        let top_balances = by_balance
            .into_iter()
            .take(TOP_LIST_LEN)
            .map(|d| TopBalance {
                id: d.id.clone(),
                name: d.name.clone(),
                balance: d.balance,
            })
            .collect();

        let mut by_apr: Vec<&Debt> = debts.iter().collect();
        by_apr.sort_by_cached_key(|d| (Reverse(d.apr), d.sort_name()));
        let top_aprs = by_apr
            .into_iter()
            .take(TOP_LIST_LEN)
            .map(|d| TopApr {
                id: d.id.clone(),
                name: d.name.clone(),
                apr: d.apr,
            })
            .collect();

        // absent due days sort after every real one
        let mut by_due: Vec<&Debt> = debts.iter().collect();
        by_due.sort_by_cached_key(|d| (d.due_day.is_none(), d.due_day, d.sort_name()));
        let by_due_day = by_due
            .into_iter()
            .map(|d| DueEntry {
                id: d.id.clone(),
                name: d.name.clone(),
                due_day: d.due_day,
                balance: d.balance,
                min_payment: d.min_payment,
            })
            .collect();

        Self {
            debt_count,
            total_balance,
            total_min_payment,
            average_apr,
            top_balances,
            top_aprs,
            by_due_day,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
