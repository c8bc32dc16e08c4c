use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{PayoffError, Result};
use crate::types::{DebtId, DebtStatus, PaymentOverride};

/// custom order assigned to debts the user never placed
pub const UNORDERED_CUSTOM_ORDER: i64 = 999_999;

/// a debt record, the unit of computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,
    pub name: String,
    pub balance: Money,
    pub apr: Rate,
    pub min_payment: Money,
    pub planned_payment: Money,
    pub include_in_strategy: bool,
    pub status: DebtStatus,
    pub payment_override: PaymentOverride,
    pub custom_order: i64,
    pub due_date: Option<NaiveDate>,
    pub due_day: Option<u32>,
    pub notes: String,
}

impl Debt {
    /// builder for creating debts
    pub fn builder() -> DebtBuilder {
        DebtBuilder::new()
    }

    /// interest accrued on the current balance over one month
    pub fn monthly_interest(&self) -> Money {
        self.balance.interest_at(self.apr.monthly_rate())
    }

    /// takes part in strategy ordering and allocation
    pub fn is_active(&self) -> bool {
        self.include_in_strategy && self.balance.is_positive()
    }

    /// lower-cased name used as the final tie-break of every ordering
    pub fn sort_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// builder with every optional field defaulted at build time
#[derive(Debug, Default)]
pub struct DebtBuilder {
    id: Option<DebtId>,
    name: Option<String>,
    balance: Option<Money>,
    apr: Option<Rate>,
    min_payment: Option<Money>,
    planned_payment: Option<Money>,
    include_in_strategy: Option<bool>,
    status: Option<DebtStatus>,
    payment_override: Option<PaymentOverride>,
    custom_order: Option<i64>,
    due_date: Option<NaiveDate>,
    due_day: Option<u32>,
    notes: Option<String>,
}

impl DebtBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<DebtId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn balance(mut self, balance: Money) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn apr(mut self, apr: Rate) -> Self {
        self.apr = Some(apr);
        self
    }

    pub fn min_payment(mut self, amount: Money) -> Self {
        self.min_payment = Some(amount);
        self
    }

    pub fn planned_payment(mut self, amount: Money) -> Self {
        self.planned_payment = Some(amount);
        self
    }

    pub fn include_in_strategy(mut self, include: bool) -> Self {
        self.include_in_strategy = Some(include);
        self
    }

    pub fn status(mut self, status: DebtStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn payment_override(mut self, payment_override: PaymentOverride) -> Self {
        self.payment_override = Some(payment_override);
        self
    }

    pub fn custom_order(mut self, order: i64) -> Self {
        self.custom_order = Some(order);
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn due_day(mut self, day: u32) -> Self {
        self.due_day = Some(day);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn build(self) -> Result<Debt> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(PayoffError::InvalidDebt {
                message: "name required".to_string(),
            })?;

        let balance = self.balance.unwrap_or(Money::ZERO);
        let apr = self.apr.unwrap_or(Rate::ZERO);
        let min_payment = self.min_payment.unwrap_or(Money::ZERO);
        let planned_payment = self.planned_payment.unwrap_or(min_payment);

        for (field, amount) in [
            ("balance", balance),
            ("min_payment", min_payment),
            ("planned_payment", planned_payment),
        ] {
            if amount.is_negative() {
                return Err(PayoffError::InvalidDebt {
                    message: format!("{} must not be negative for {}: {}", field, name, amount),
                });
            }
        }

        if apr < Rate::ZERO {
            return Err(PayoffError::InvalidDebt {
                message: format!("apr must not be negative for {}: {}", name, apr),
            });
        }

        if let Some(day) = self.due_day {
            if !(1..=31).contains(&day) {
                return Err(PayoffError::InvalidDebt {
                    message: format!("due day must be between 1 and 31 for {}: {}", name, day),
                });
            }
        }

        Ok(Debt {
            id: self.id.unwrap_or_else(DebtId::generate),
            name,
            balance,
            apr,
            min_payment,
            planned_payment,
            include_in_strategy: self.include_in_strategy.unwrap_or(true),
            status: self.status.unwrap_or_default(),
            payment_override: self.payment_override.unwrap_or_default(),
            custom_order: self.custom_order.unwrap_or(UNORDERED_CUSTOM_ORDER),
            due_date: self.due_date,
            due_day: self.due_day,
            notes: self.notes.unwrap_or_default(),
        })
    }
}
