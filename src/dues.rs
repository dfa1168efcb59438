//! Monthly dues for church members: pricing a run of months and splitting a
//! lump sum into one payment per month.

use crate::error::{LedgerError, Result};
use chrono::{Month, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

/// `month_paid` value used for pledge payments.
pub const PLEDGE_LABEL: &str = "Medhane Alem";

/// Longest run of monthly payments a single lump sum may be split into.
pub const MAX_PLANNED_MONTHS: u32 = 1200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuesPayment {
    pub amount: f64,
    pub month_paid: String,
    pub payment_date: NaiveDate,
}

/// Looks up a month by its full English name ("January" .. "December").
pub fn month_from_name(name: &str) -> Option<Month> {
    (1..=12u8)
        .filter_map(|n| Month::try_from(n).ok())
        .find(|m| m.name() == name)
}

fn month_index(month: Month) -> u32 {
    month.number_from_month() - 1
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Price of paying every month from `from` through `to` inclusive.
pub fn amount_for_months(monthly: f64, from: Month, to: Month) -> Option<f64> {
    if !is_positive(monthly) || month_index(to) < month_index(from) {
        return None;
    }
    let count = month_index(to) - month_index(from) + 1;
    Some(monthly * count as f64)
}

/// Whole months paid for by `amount`.
pub fn months_covered(amount: f64, monthly: f64) -> f64 {
    if !is_positive(amount) || !is_positive(monthly) {
        return 0.0;
    }
    (amount / monthly).floor()
}

/// `covered` as a month count, if it lies within `0..=MAX_PLANNED_MONTHS`.
fn planned_month_count(covered: f64) -> Option<u32> {
    (0.0..=f64::from(MAX_PLANNED_MONTHS))
        .contains(&covered)
        .then_some(covered as u32)
}

/// Last month paid for when `amount` is applied starting at `from`.
/// `None` if the amount covers no month or would run past December.
pub fn end_month_for_amount(from: Month, amount: f64, monthly: f64) -> Option<Month> {
    let covered = months_covered(amount, monthly);
    if covered < 1.0 {
        return None;
    }
    let end = f64::from(month_index(from)) + covered - 1.0;
    if end >= 12.0 {
        return None;
    }
    Month::try_from(end as u8 + 1).ok()
}

/// One payment of `monthly` per covered month, starting at `from`. Month
/// names continue past December into January.
pub fn plan_monthly_payments(
    from: Month,
    amount: f64,
    monthly: f64,
    payment_date: NaiveDate,
) -> Result<Vec<DuesPayment>> {
    if !is_positive(amount) || !is_positive(monthly) {
        return Err(LedgerError::InvalidDuesInput(
            "Invalid month or amount.".to_string(),
        ));
    }

    let covered = months_covered(amount, monthly);
    if covered < 1.0 {
        return Err(LedgerError::InvalidDuesInput(
            "Amount is less than one month.".to_string(),
        ));
    }
    let count = planned_month_count(covered).ok_or_else(|| {
        LedgerError::InvalidDuesInput(format!(
            "Amount covers more than {} months.",
            MAX_PLANNED_MONTHS
        ))
    })?;

    let start = month_index(from);
    let payments = (0..count)
        .map(|i| {
            let idx = ((start + i % 12) % 12) as u8;
            let month = Month::try_from(idx + 1).unwrap_or(Month::January);
            DuesPayment {
                amount: monthly,
                month_paid: month.name().to_string(),
                payment_date,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "Planned {} monthly payment(s) of {} starting {}",
        payments.len(),
        monthly,
        from.name()
    );

    Ok(payments)
}

pub fn pledge_payment(pledge: Option<f64>, payment_date: NaiveDate) -> Result<DuesPayment> {
    match pledge {
        Some(amount) if is_positive(amount) => Ok(DuesPayment {
            amount,
            month_paid: PLEDGE_LABEL.to_string(),
            payment_date,
        }),
        _ => Err(LedgerError::InvalidDuesInput(
            "Invalid pledge amount.".to_string(),
        )),
    }
}
