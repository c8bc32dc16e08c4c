use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;

/// opaque identifier for a debt, unique within a working set
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtId(String);

impl DebtId {
    pub fn new(id: impl Into<String>) -> Self {
        DebtId(id.into())
    }

    /// fresh random identifier
    pub fn generate() -> Self {
        DebtId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DebtId {
    fn from(s: &str) -> Self {
        DebtId::new(s)
    }
}

impl From<String> for DebtId {
    fn from(s: String) -> Self {
        DebtId(s)
    }
}

/// account standing of a debt
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum DebtStatus {
    /// paying on time
    #[default]
    Current,
    /// one payment cycle behind
    PastDue30,
    /// more than one payment cycle behind
    PastDueOver30,
    Delinquent,
    Collections,
    Paid,
    /// any other label, kept for display
    Other(String),
}

impl DebtStatus {
    /// delinquency weight used by ranking and status override ordering
    ///
    /// Only the two past-due levels carry weight; `Delinquent`,
    /// `Collections` and `Paid` rank like `Current`.
    pub fn severity(&self) -> u8 {
        match self {
            DebtStatus::PastDue30 => 1,
            DebtStatus::PastDueOver30 => 2,
            _ => 0,
        }
    }

    pub fn is_past_due(&self) -> bool {
        self.severity() > 0
    }

    /// needs creditor contact before aggressive extra payments
    pub fn needs_attention(&self) -> bool {
        matches!(self, DebtStatus::Delinquent | DebtStatus::Collections)
    }

    pub fn label(&self) -> &str {
        match self {
            DebtStatus::Current => "Current",
            DebtStatus::PastDue30 => "30 Days Past Due",
            DebtStatus::PastDueOver30 => ">30 Days Past Due",
            DebtStatus::Delinquent => "Delinquent",
            DebtStatus::Collections => "Collections",
            DebtStatus::Paid => "Paid",
            DebtStatus::Other(label) => label,
        }
    }

    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "current" => DebtStatus::Current,
            "30 days past due" => DebtStatus::PastDue30,
            ">30 days past due" => DebtStatus::PastDueOver30,
            "delinquent" => DebtStatus::Delinquent,
            "collections" => DebtStatus::Collections,
            "paid" => DebtStatus::Paid,
            _ => DebtStatus::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for DebtStatus {
    fn from(s: String) -> Self {
        DebtStatus::parse(&s)
    }
}

impl From<&str> for DebtStatus {
    fn from(s: &str) -> Self {
        DebtStatus::parse(s)
    }
}

impl From<DebtStatus> for String {
    fn from(status: DebtStatus) -> Self {
        status.label().to_string()
    }
}

/// payoff strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Strategy {
    /// highest APR first
    #[default]
    Avalanche,
    /// lowest balance first
    Snowball,
    /// user-assigned order numbers
    Custom,
}

impl Strategy {
    /// unrecognized names select `Custom`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "avalanche" => Strategy::Avalanche,
            "snowball" => Strategy::Snowball,
            _ => Strategy::Custom,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "Avalanche",
            Strategy::Snowball => "Snowball",
            Strategy::Custom => "Custom",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Strategy {
    fn from(s: String) -> Self {
        Strategy::from_name(&s)
    }
}

impl From<&str> for Strategy {
    fn from(s: &str) -> Self {
        Strategy::from_name(s)
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.name().to_string()
    }
}

/// explicit control over a debt's monthly payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PaymentOverride {
    #[default]
    None,
    /// pay a fixed amount (never below the minimum); `None` keeps the base payment
    #[serde(rename = "monthly_payment")]
    FixedMonthlyPayment {
        amount: Option<Money>,
        extra: Money,
    },
    /// pay whatever retires the balance in `periods` payments
    #[serde(rename = "target_payments")]
    TargetDuration {
        periods: i32,
        extra: Money,
    },
}

impl PaymentOverride {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, PaymentOverride::None)
    }
}

/// kind of monthly plan row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanRowKind {
    /// the debt's own monthly payment
    Required,
    /// the strategy's extra allocation
    Extra,
}

/// urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecommendationLevel {
    HighPriority,
    Important,
    GoodMove,
    Tip,
}

impl RecommendationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationLevel::HighPriority => "High priority",
            RecommendationLevel::Important => "Important",
            RecommendationLevel::GoodMove => "Good move",
            RecommendationLevel::Tip => "Tip",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_severity() {
        assert_eq!(DebtStatus::Current.severity(), 0);
        assert_eq!(DebtStatus::parse("30 Days Past Due").severity(), 1);
        assert_eq!(DebtStatus::parse(">30 Days Past Due").severity(), 2);
        assert_eq!(DebtStatus::Delinquent.severity(), 0);
        assert_eq!(DebtStatus::Collections.severity(), 0);
        assert_eq!(DebtStatus::Paid.severity(), 0);
    }

    #[test]
    fn test_status_parse_is_lenient() {
        assert_eq!(DebtStatus::parse("  collections "), DebtStatus::Collections);
        assert_eq!(DebtStatus::parse(""), DebtStatus::Current);
        assert_eq!(
            DebtStatus::parse("Charged Off"),
            DebtStatus::Other("Charged Off".to_string())
        );
        assert_eq!(DebtStatus::Other("Charged Off".to_string()).severity(), 0);
    }

    #[test]
    fn test_status_serde_uses_labels() {
        let json = serde_json::to_string(&DebtStatus::PastDueOver30).unwrap();
        assert_eq!(json, "\">30 Days Past Due\"");
        let back: DebtStatus = serde_json::from_str("\"30 Days Past Due\"").unwrap();
        assert_eq!(back, DebtStatus::PastDue30);
    }

    #[test]
    fn test_unknown_strategy_is_custom() {
        assert_eq!(Strategy::from_name("Avalanche"), Strategy::Avalanche);
        assert_eq!(Strategy::from_name("snowball"), Strategy::Snowball);
        assert_eq!(Strategy::from_name("Custom"), Strategy::Custom);
        assert_eq!(Strategy::from_name("highest-first"), Strategy::Custom);
    }

    #[test]
    fn test_override_serde_shape() {
        let ov = PaymentOverride::TargetDuration {
            periods: 12,
            extra: Money::ZERO,
        };
        let value = serde_json::to_value(&ov).unwrap();
        assert_eq!(value["mode"], "target_payments");
        assert_eq!(value["periods"], 12);
        assert!(ov.is_enabled());
        assert!(!PaymentOverride::None.is_enabled());
    }
}
