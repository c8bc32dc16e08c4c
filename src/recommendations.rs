use log::debug;
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use crate::decimal::format_currency;
use crate::payments::{MonthlyPlan, PlanRow};
use crate::types::{DebtId, RecommendationLevel};

/// one "what to do next" suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub level: RecommendationLevel,
    /// the debt the suggestion is about, if any
    pub debt_id: Option<DebtId>,
    pub title: String,
    pub detail: String,
}

impl Recommendation {
    fn new(level: RecommendationLevel, debt_id: Option<&DebtId>, title: String, detail: impl Into<String>) -> Self {
        Self {
            level,
            debt_id: debt_id.cloned(),
            title,
            detail: detail.into(),
        }
    }

    /// `High priority: Add a minimum payment for Visa.`
    pub fn headline(&self) -> String {
        format!("{}: {}", self.level.label(), self.title)
    }
}

/// suggestions for a debt list and its monthly plan, grouped by rule
///
/// Debt-level rules look at every debt, included in the strategy or not.
/// The closing tip is always present.
pub fn recommend(debts: &[Debt], plan: &MonthlyPlan) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    for debt in debts {
        if debt.apr.is_zero() || !debt.planned_payment.is_positive() {
            continue;
        }
        let interest = debt.monthly_interest();
        if debt.planned_payment <= interest {
            recs.push(Recommendation::new(
                RecommendationLevel::HighPriority,
                Some(&debt.id),
                format!(
                    "Increase payment for {}. Current planned payment may not cover monthly interest.",
                    debt.name
                ),
                format!(
                    "Monthly interest est: {} vs payment {}.",
                    format_currency(interest),
                    format_currency(debt.planned_payment)
                ),
            ));
        }
    }

    for debt in debts {
        if debt.balance.is_positive() && !debt.min_payment.is_positive() {
            recs.push(Recommendation::new(
                RecommendationLevel::HighPriority,
                Some(&debt.id),
                format!("Add a minimum payment for {}.", debt.name),
                "Payoff planning works best with a realistic minimum payment.",
            ));
        }
    }

    for debt in debts.iter().filter(|d| d.status.needs_attention()) {
        recs.push(Recommendation::new(
            RecommendationLevel::Important,
            Some(&debt.id),
            format!("Address {} status = {}.", debt.name, debt.status),
            "Consider contacting the creditor and prioritizing stabilization before aggressive extra payments.",
        ));
    }

    // first row wins a tie, matching plan order
    let top_extra = plan
        .extra_rows()
        .fold(None, |best: Option<&PlanRow>, row| match best {
            Some(b) if b.payment >= row.payment => Some(b),
            _ => Some(row),
        });
    if let Some(row) = top_extra {
        recs.push(Recommendation::new(
            RecommendationLevel::GoodMove,
            Some(&row.debt_id),
            format!("Your strategy targets {} with the most extra payment.", row.name),
            "Stay consistent month to month for best payoff results.",
        ));
    }

    recs.push(Recommendation::new(
        RecommendationLevel::Tip,
        None,
        "Use Avalanche to minimize interest or Snowball for motivation wins.".to_string(),
        "If you choose Custom, set a clear custom order and review it monthly.",
    ));

    debug!("{} recommendations for {} debts", recs.len(), debts.len());
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::payments::build_monthly_plan;
    use crate::types::{DebtStatus, Strategy};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn debt(name: &str, balance: i64, apr: Decimal, min: i64) -> Debt {
        Debt::builder()
            .id(name)
            .name(name)
            .balance(Money::from_major(balance))
            .apr(Rate::from_apr(apr))
            .min_payment(Money::from_major(min))
            .build()
            .unwrap()
    }

    fn levels(recs: &[Recommendation]) -> Vec<RecommendationLevel> {
        recs.iter().map(|r| r.level).collect()
    }

    #[test]
    fn test_healthy_list_gets_only_the_tip() {
        let debts = vec![debt("Visa", 2_400, dec!(19.99), 60)];
        let plan = build_monthly_plan(&debts, Strategy::Avalanche, Money::ZERO, true);
        let recs = recommend(&debts, &plan);
        assert_eq!(levels(&recs), vec![RecommendationLevel::Tip]);
        assert!(recs[0].debt_id.is_none());
        assert_eq!(
            recs[0].headline(),
            "Tip: Use Avalanche to minimize interest or Snowball for motivation wins."
        );
    }

    #[test]
    fn test_interest_only_payment_is_flagged() {
        // 5000 at 24% accrues 100 a month
        let debts = vec![debt("Store Card", 5_000, dec!(24), 100)];
        let plan = build_monthly_plan(&debts, Strategy::Avalanche, Money::ZERO, true);
        let recs = recommend(&debts, &plan);

        assert_eq!(recs[0].level, RecommendationLevel::HighPriority);
        assert!(recs[0].title.starts_with("Increase payment for Store Card."));
        assert_eq!(recs[0].detail, "Monthly interest est: $100.00 vs payment $100.00.");
    }

    #[test]
    fn test_rules_fire_in_order() {
        let mut collections = debt("Old Phone", 400, dec!(0), 20);
        collections.status = DebtStatus::Collections;
        let no_min = debt("Dentist", 800, dec!(0), 0);
        let card = debt("Card", 1_000, dec!(22), 40);
        let debts = vec![collections, no_min, card];

        let plan = build_monthly_plan(&debts, Strategy::Avalanche, Money::from_major(75), true);
        let recs = recommend(&debts, &plan);

        assert_eq!(
            levels(&recs),
            vec![
                RecommendationLevel::HighPriority,
                RecommendationLevel::Important,
                RecommendationLevel::GoodMove,
                RecommendationLevel::Tip,
            ]
        );
        assert_eq!(recs[0].title, "Add a minimum payment for Dentist.");
        assert_eq!(recs[1].title, "Address Old Phone status = Collections.");
        assert_eq!(recs[2].title, "Your strategy targets Card with the most extra payment.");
        assert_eq!(recs[2].debt_id, Some(DebtId::from("Card")));
    }
}
