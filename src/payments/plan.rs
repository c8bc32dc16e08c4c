use log::debug;
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use crate::decimal::Money;
use crate::ordering::order_debts;
use crate::payments::level_payment::solve_level_payment;
use crate::types::{DebtId, PaymentOverride, PlanRowKind, Strategy};

/// where a debt's required payment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PaymentSource {
    Minimum,
    Planned,
    FixedOverride,
    TargetOverride { periods: u32 },
}

impl PaymentSource {
    pub fn describe(&self) -> String {
        match self {
            PaymentSource::Minimum => "minimum payment".to_string(),
            PaymentSource::Planned => "planned payment".to_string(),
            PaymentSource::FixedOverride => "override: fixed monthly payment".to_string(),
            PaymentSource::TargetOverride { periods } => {
                format!("override: payoff in {} payments", periods)
            }
        }
    }
}

/// a debt's resolved monthly payment, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredPayment {
    pub amount: Money,
    pub source: PaymentSource,
}

/// resolve the monthly payment a debt requires on its own
pub fn required_payment(debt: &Debt) -> RequiredPayment {
    let base = debt.min_payment.max(debt.planned_payment);
    let base_source = if debt.planned_payment > debt.min_payment {
        PaymentSource::Planned
    } else {
        PaymentSource::Minimum
    };

    match &debt.payment_override {
        PaymentOverride::FixedMonthlyPayment { amount, extra } => RequiredPayment {
            amount: debt
                .min_payment
                .max(amount.unwrap_or(base))
                .saturating_add(extra.clamp_non_negative()),
            source: PaymentSource::FixedOverride,
        },
        PaymentOverride::TargetDuration { periods, extra } if *periods > 0 => {
            let periods = *periods as u32;
            let solved = solve_level_payment(debt.balance, debt.apr, periods);
            RequiredPayment {
                amount: debt.min_payment.max(solved).saturating_add(extra.clamp_non_negative()),
                source: PaymentSource::TargetOverride { periods },
            }
        }
        _ => RequiredPayment {
            amount: base,
            source: base_source,
        },
    }
}

/// one line of the monthly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRow {
    pub debt_id: DebtId,
    pub name: String,
    /// rounded to cents
    pub payment: Money,
    pub kind: PlanRowKind,
    pub notes: String,
}

/// this month's payments in strategy order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPlan {
    pub strategy: Strategy,
    pub rows: Vec<PlanRow>,
}

impl MonthlyPlan {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn required_total(&self) -> Money {
        self.total_of(PlanRowKind::Required)
    }

    pub fn extra_total(&self) -> Money {
        self.total_of(PlanRowKind::Extra)
    }

    /// required plus extra
    pub fn all_in_total(&self) -> Money {
        self.rows.iter().map(|r| r.payment).sum()
    }

    /// everything the plan pays toward one debt, `None` if it has no row
    pub fn payment_for(&self, id: &DebtId) -> Option<Money> {
        let mut rows = self.rows.iter().filter(|r| &r.debt_id == id).peekable();
        rows.peek()?;
        Some(rows.map(|r| r.payment).sum())
    }

    pub fn extra_rows(&self) -> impl Iterator<Item = &PlanRow> {
        self.rows.iter().filter(|r| r.kind == PlanRowKind::Extra)
    }

    fn total_of(&self, kind: PlanRowKind) -> Money {
        self.rows
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.payment)
            .sum()
    }
}

/// required rows for every active debt in strategy order, then the extra row
pub fn build_monthly_plan(
    debts: &[Debt],
    strategy: Strategy,
    extra_payment: Money,
    status_override: bool,
) -> MonthlyPlan {
    let active: Vec<Debt> = debts.iter().filter(|d| d.is_active()).cloned().collect();
    let ordered = order_debts(&active, strategy, status_override);

    let mut rows: Vec<PlanRow> = ordered
        .iter()
        .map(|debt| {
            let required = required_payment(debt);
            PlanRow {
                debt_id: debt.id.clone(),
                name: debt.name.clone(),
                payment: required.amount.round_cents(),
                kind: PlanRowKind::Required,
                notes: required.source.describe(),
            }
        })
        .collect();

    let extra = extra_payment.clamp_non_negative();
    if let Some(first) = ordered.first().filter(|_| extra.is_positive()) {
        rows.push(PlanRow {
            debt_id: first.id.clone(),
            name: first.name.clone(),
            payment: extra.round_cents(),
            kind: PlanRowKind::Extra,
            notes: format!("{} extra allocation", strategy),
        });
    }

    let plan = MonthlyPlan { strategy, rows };
    debug!(
        "{} plan: {} rows, required {}, extra {}",
        strategy,
        plan.rows.len(),
        plan.required_total(),
        plan.extra_total()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::record::{parse_debts, MAX_RECORD_AMOUNT};
    use rust_decimal::Decimal;
    use serde_json::json;
    use rust_decimal_macros::dec;

    fn debt(id: &str, balance: i64, apr: Decimal, min: i64) -> Debt {
        Debt::builder()
            .id(id)
            .name(id)
            .balance(Money::from_major(balance))
            .apr(Rate::from_apr(apr))
            .min_payment(Money::from_major(min))
            .build()
            .unwrap()
    }

    #[test]
    fn test_avalanche_plan_with_extra() {
        let debts = vec![debt("B", 2_000, dec!(10), 50), debt("A", 500, dec!(25), 25)];
        let plan = build_monthly_plan(&debts, Strategy::Avalanche, Money::from_major(100), true);

        let summary: Vec<(&str, Money, PlanRowKind)> = plan
            .rows
            .iter()
            .map(|r| (r.debt_id.as_str(), r.payment, r.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A", Money::from_major(25), PlanRowKind::Required),
                ("B", Money::from_major(50), PlanRowKind::Required),
                ("A", Money::from_major(100), PlanRowKind::Extra),
            ]
        );
        assert_eq!(plan.rows[2].notes, "Avalanche extra allocation");
        assert_eq!(plan.required_total(), Money::from_major(75));
        assert_eq!(plan.extra_total(), Money::from_major(100));
        assert_eq!(plan.all_in_total(), Money::from_major(175));
        assert_eq!(plan.payment_for(&DebtId::from("A")), Some(Money::from_major(125)));
        assert_eq!(plan.payment_for(&DebtId::from("missing")), None);
    }

    #[test]
    fn test_inactive_debts_are_skipped() {
        let mut excluded = debt("excluded", 900, dec!(30), 40);
        excluded.include_in_strategy = false;
        let paid = debt("paid", 0, dec!(29), 40);
        let kept = debt("kept", 300, dec!(5), 15);

        let plan = build_monthly_plan(&[excluded, paid, kept], Strategy::Avalanche, Money::from_major(50), true);
        assert_eq!(plan.rows.len(), 2);
        assert!(plan.rows.iter().all(|r| r.debt_id.as_str() == "kept"));
    }

    #[test]
    fn test_no_extra_row_without_extra_or_debts() {
        let debts = vec![debt("A", 500, dec!(25), 25)];
        let plan = build_monthly_plan(&debts, Strategy::Snowball, Money::ZERO, false);
        assert_eq!(plan.extra_rows().count(), 0);

        let negative = build_monthly_plan(&debts, Strategy::Snowball, Money::from_major(-20), false);
        assert_eq!(negative.extra_rows().count(), 0);

        let empty = build_monthly_plan(&[], Strategy::Snowball, Money::from_major(100), false);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_base_payment_is_larger_of_min_and_planned() {
        let mut planned = debt("planned", 1_000, dec!(12), 30);
        planned.planned_payment = Money::from_major(80);
        let resolved = required_payment(&planned);
        assert_eq!(resolved.amount, Money::from_major(80));
        assert_eq!(resolved.source.describe(), "planned payment");

        let mut below_min = debt("low", 1_000, dec!(12), 30);
        below_min.planned_payment = Money::from_major(10);
        let resolved = required_payment(&below_min);
        assert_eq!(resolved.amount, Money::from_major(30));
        assert_eq!(resolved.source, PaymentSource::Minimum);
    }

    #[test]
    fn test_fixed_override_respects_minimum_and_adds_extra() {
        let mut d = debt("card", 1_000, dec!(18), 40);
        d.payment_override = PaymentOverride::FixedMonthlyPayment {
            amount: Some(Money::from_major(25)),
            extra: Money::from_major(10),
        };
        assert_eq!(required_payment(&d).amount, Money::from_major(50));

        d.payment_override = PaymentOverride::FixedMonthlyPayment {
            amount: Some(Money::from_major(120)),
            extra: Money::ZERO,
        };
        let resolved = required_payment(&d);
        assert_eq!(resolved.amount, Money::from_major(120));
        assert_eq!(resolved.source.describe(), "override: fixed monthly payment");

        // no amount keeps the base payment
        d.payment_override = PaymentOverride::FixedMonthlyPayment {
            amount: None,
            extra: Money::from_major(5),
        };
        assert_eq!(required_payment(&d).amount, Money::from_major(45));
    }

    #[test]
    fn test_target_override_solves_level_payment() {
        let mut d = debt("loan", 1_200, dec!(0), 10);
        d.payment_override = PaymentOverride::TargetDuration {
            periods: 12,
            extra: Money::from_major(5),
        };
        let resolved = required_payment(&d);
        assert_eq!(resolved.amount.round_cents(), Money::from_major(105));
        assert_eq!(resolved.source.describe(), "override: payoff in 12 payments");

        // non-positive targets fall back to the base payment
        d.payment_override = PaymentOverride::TargetDuration {
            periods: 0,
            extra: Money::from_major(5),
        };
        assert_eq!(required_payment(&d).amount, Money::from_major(10));
    }

    #[test]
    fn test_extreme_records_do_not_overflow() {
        let records = json!([
            {"id": "steep", "balance": 1e15, "apr": "1e20", "min_payment": 10,
             "override": {"enabled": true, "mode": "target_payments", "target_payments": 12, "extra_monthly": 50}},
            {"id": "slow", "balance": 1000, "apr": 0.000001, "min_payment": 25,
             "override": {"enabled": true, "mode": "target_payments", "target_payments": 2000000000}}
        ]);
        let debts = parse_debts(&records).unwrap();
        let plan = build_monthly_plan(&debts, Strategy::Avalanche, Money::from_major(100), true);

        assert_eq!(plan.rows.len(), 3);
        // level payment over two billion months is below the minimum
        assert_eq!(plan.payment_for(&DebtId::from("slow")), Some(Money::from_major(25)));
        // clamped record: a trillion at 10000% accrues more than its balance each month
        let steep = plan.payment_for(&DebtId::from("steep")).unwrap();
        assert!(steep > Money::from_decimal(MAX_RECORD_AMOUNT));
        assert!(plan.all_in_total() >= steep);
    }

    #[test]
    fn test_saturated_level_payment_keeps_extra_bounded() {
        let mut d = debt("huge", 1, dec!(0), 0);
        d.balance = Money::from_decimal(Decimal::MAX);
        d.apr = Rate::from_apr(dec!(1200));
        d.payment_override = PaymentOverride::TargetDuration {
            periods: 6,
            extra: Money::from_major(500),
        };
        assert_eq!(required_payment(&d).amount, Money::MAX);

        let plan = build_monthly_plan(&[d.clone(), d], Strategy::Snowball, Money::ZERO, true);
        assert_eq!(plan.required_total(), Money::MAX);
    }

    #[test]
    fn test_required_total_covers_minimums() {
        let mut debts = vec![
            debt("a", 500, dec!(25), 25),
            debt("b", 2_000, dec!(10), 50),
            debt("c", 7_500, dec!(4.5), 150),
        ];
        debts[0].planned_payment = Money::from_major(10);
        debts[1].payment_override = PaymentOverride::FixedMonthlyPayment {
            amount: Some(Money::from_major(1)),
            extra: Money::ZERO,
        };

        let plan = build_monthly_plan(&debts, Strategy::Custom, Money::ZERO, true);
        let minimums: Money = debts.iter().map(|d| d.min_payment).sum();
        assert!(plan.required_total() >= minimums);
    }
}
