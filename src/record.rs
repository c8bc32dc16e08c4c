use std::str::FromStr;

use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Map, Value};

use crate::calendar::parse_iso_date;
use crate::debt::{Debt, UNORDERED_CUSTOM_ORDER};
use crate::decimal::{Money, Rate};
use crate::errors::{PayoffError, Result};
use crate::types::{DebtId, DebtStatus, PaymentOverride};

/// largest balance or payment a record can carry; larger values clamp to it
pub const MAX_RECORD_AMOUNT: Decimal = dec!(1000000000000);

/// largest APR, in percent, a record can carry
pub const MAX_RECORD_APR_PERCENT: Decimal = dec!(10000);

/// parse a debt-list document: a bare array, or an object wrapping one
/// under `items` or `bills`
pub fn debts_from_json_str(json: &str) -> Result<Vec<Debt>> {
    let document: Value = serde_json::from_str(json)?;
    parse_debts(&document)
}

/// normalize every record of a debt-list document
///
/// Records that are not objects, or that still fail validation after
/// coercion, are skipped with a warning.
pub fn parse_debts(document: &Value) -> Result<Vec<Debt>> {
    let records = match document {
        Value::Array(records) => records,
        Value::Object(wrapper) => match wrapper.get("items").or_else(|| wrapper.get("bills")) {
            Some(Value::Array(records)) => records,
            Some(Value::Null) | None => return Ok(Vec::new()),
            Some(_) => {
                return Err(PayoffError::InvalidDocument {
                    message: "debt list must be an array".to_string(),
                })
            }
        },
        _ => {
            return Err(PayoffError::InvalidDocument {
                message: "expected an array of debts or an object with `items`".to_string(),
            })
        }
    };

    let debts: Vec<Debt> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| parse_debt(record, index))
        .collect();

    debug!("parsed {} of {} debt records", debts.len(), records.len());
    Ok(debts)
}

/// normalize one loosely typed record; `index` supplies the fallback id and name
pub fn parse_debt(record: &Value, index: usize) -> Option<Debt> {
    let Some(fields) = record.as_object() else {
        warn!("skipping debt record {}: not an object", index);
        return None;
    };

    let id = match present(fields, "id") {
        Some(Value::String(s)) if !s.trim().is_empty() => DebtId::new(s.trim()),
        Some(Value::Number(n)) => DebtId::new(n.to_string()),
        _ => DebtId::new(index.to_string()),
    };

    let name = present(fields, "name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Debt {}", index + 1));

    let balance = present(fields, "balance").or_else(|| present(fields, "amount"));
    let min_payment = amount(fields.get("min_payment"));
    let planned_payment = match present(fields, "planned_payment") {
        Some(value) => amount(Some(value)),
        None => min_payment,
    };

    let mut builder = Debt::builder()
        .id(id)
        .name(name)
        .balance(amount(balance))
        .apr(Rate::from_apr(bounded(
            coerce_decimal(fields.get("apr")),
            MAX_RECORD_APR_PERCENT,
            "apr",
        )))
        .min_payment(min_payment)
        .planned_payment(planned_payment)
        .include_in_strategy(present(fields, "include_in_strategy").map_or(true, truthy))
        .status(
            present(fields, "status")
                .and_then(Value::as_str)
                .map(DebtStatus::parse)
                .unwrap_or_default(),
        )
        .payment_override(present(fields, "override").map_or(PaymentOverride::None, parse_override))
        .custom_order(coerce_order(fields.get("custom_order")))
        .notes(
            present(fields, "notes")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim(),
        );

    if let Some(date) = present(fields, "due_date").and_then(Value::as_str).and_then(parse_iso_date) {
        builder = builder.due_date(date);
    }
    if let Some(day) = present(fields, "due_day")
        .map(|v| coerce_decimal(Some(v)))
        .and_then(|d| d.trunc().to_u32())
        .filter(|d| (1..=31).contains(d))
    {
        builder = builder.due_day(day);
    }

    match builder.build() {
        Ok(debt) => Some(debt),
        Err(e) => {
            warn!("skipping debt record {}: {}", index, e);
            None
        }
    }
}

/// normalize an override object, resolving legacy mode aliases
///
/// Only `enabled: true` overrides take effect.
pub fn parse_override(value: &Value) -> PaymentOverride {
    let Some(fields) = value.as_object() else {
        return PaymentOverride::None;
    };
    if !present(fields, "enabled").map_or(false, truthy) {
        return PaymentOverride::None;
    }

    let extra = amount(fields.get("extra_monthly"));
    let mode = present(fields, "mode").and_then(Value::as_str).unwrap_or_default();

    match mode {
        "monthly_payment" | "payment" | "monthly" | "set_payment" => {
            // an explicit null counts as zero, so the minimum applies
            let value = fields
                .get("monthly_payment")
                .or_else(|| present(fields, "target_payment"));
            PaymentOverride::FixedMonthlyPayment {
                amount: value.map(|v| amount(Some(v))),
                extra,
            }
        }
        "target_payments" | "months" | "duration" | "set_months" => {
            let value = present(fields, "target_payments").or_else(|| present(fields, "target_months"));
            PaymentOverride::TargetDuration {
                periods: value
                    .map(|v| coerce_decimal(Some(v)).trunc())
                    .and_then(|d| d.to_i32())
                    .unwrap_or(0),
                extra,
            }
        }
        other => {
            if !other.is_empty() {
                warn!("ignoring payment override with unknown mode {:?}", other);
            }
            PaymentOverride::None
        }
    }
}

/// a field that exists and is not null
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

/// non-negative money, zero when missing or malformed
fn amount(value: Option<&Value>) -> Money {
    Money::from_decimal(bounded(coerce_decimal(value), MAX_RECORD_AMOUNT, "amount"))
}

/// clamp into `0..=ceiling`
fn bounded(value: Decimal, ceiling: Decimal, field: &str) -> Decimal {
    if value > ceiling {
        warn!("{} {} exceeds {}, clamping", field, value, ceiling);
        return ceiling;
    }
    value.max(Decimal::ZERO)
}

/// numbers, numeric strings and booleans; anything else is zero
fn coerce_decimal(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s),
        Some(Value::Bool(b)) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        _ => None,
    };
    parsed.unwrap_or(Decimal::ZERO)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

fn coerce_order(value: Option<&Value>) -> i64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => parse_decimal(s).and_then(|d| d.trunc().to_i64()),
        _ => None,
    };
    parsed.unwrap_or(UNORDERED_CUSTOM_ORDER)
}

/// truthiness of a loosely typed flag
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "" | "false" | "no" | "off" | "0"
        ),
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
