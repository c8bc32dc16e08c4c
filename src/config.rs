use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decimal::Money;
use crate::errors::{PayoffError, Result};
use crate::types::Strategy;

/// plan configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub strategy: Strategy,
    /// monthly amount on top of every required payment
    pub extra_payment: Money,
    /// let delinquency severity pre-empt the strategy order
    pub status_override: bool,
    /// fixed projection start; `None` means today
    pub start_date: Option<NaiveDate>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Avalanche,
            extra_payment: Money::ZERO,
            status_override: true,
            start_date: None,
        }
    }
}

impl PlanConfig {
    /// highest APR first
    pub fn avalanche() -> Self {
        Self::default()
    }

    /// lowest balance first
    pub fn snowball() -> Self {
        Self {
            strategy: Strategy::Snowball,
            ..Self::default()
        }
    }

    /// user-assigned order
    pub fn custom() -> Self {
        Self {
            strategy: Strategy::Custom,
            ..Self::default()
        }
    }

    /// negative amounts are treated as zero
    pub fn with_extra_payment(mut self, extra: Money) -> Self {
        self.extra_payment = extra.clamp_non_negative();
        self
    }

    pub fn with_status_override(mut self, enabled: bool) -> Self {
        self.status_override = enabled;
        self
    }

    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// projection start: the configured date, otherwise today per the time provider
    pub fn start_date(&self, time_provider: &SafeTimeProvider) -> NaiveDate {
        self.start_date
            .unwrap_or_else(|| time_provider.now().date_naive())
    }

    /// parse a configuration object; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        if !document.is_object() {
            return Err(PayoffError::InvalidDocument {
                message: "plan configuration must be an object".to_string(),
            });
        }
        let config: PlanConfig = serde_json::from_value(document)?;
        let extra = config.extra_payment;
        Ok(config.with_extra_payment(extra))
    }
}
