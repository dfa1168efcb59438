//! # Congregation Ledger
//!
//! Reporting logic for a church finance ledger: selecting a reporting period,
//! filtering dated income/expense records into it, and walking them forward
//! to produce running balances and period totals. Also covers the smaller
//! calculations around the ledger: monthly dues planning, pizza-family
//! contribution grouping and form validation.
//!
//! ## Core Concepts
//!
//! - **Reporting Period**: Monthly, Quarterly, Yearly or a Custom date range
//! - **Running Balance**: cumulative income minus expense, reset to zero at the start of each period
//! - **Local Dates**: `YYYY-MM-DD` strings are read as calendar days, never as UTC instants
//! - **Lenient Input**: missing amounts count as zero and undated records are skipped, never rejected
//!
//! ## Example
//!
//! ```rust,ignore
//! use congregation_ledger::*;
//!
//! let records = parse_transactions(r#"[
//!     {"id": 1, "date": "2025-06-01", "income": 100, "expense": null, "description": "Offering"},
//!     {"id": 2, "date": "2025-06-05", "income": null, "expense": 30, "description": "Candles"}
//! ]"#)?;
//!
//! let report = compute_report(&records, ReportingPeriod::Monthly { year: 2025, month: 6 })?;
//! assert_eq!(report.totals.balance, 70.0);
//!
//! let july = report.period.next();
//! ```

pub mod contributions;
pub mod dues;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod navigator;
pub mod period;
pub mod report;
pub mod schema;
pub mod utils;
pub mod validation;

pub use contributions::{
    contributions_for_telephone, family_key, group_families, next_payment_number, ordinal,
    total_amount, FamilyPayment, FamilyQuery, FamilyRow, FamilySortKey, PizzaContribution,
    SortDirection,
};
pub use dues::{
    amount_for_months, end_month_for_amount, month_from_name, months_covered,
    plan_monthly_payments, pledge_payment, DuesPayment,
};
pub use engine::LedgerEngine;
pub use error::{FieldErrors, LedgerError, Result};
pub use ingestion::*;
pub use navigator::Step;
pub use period::{DateRange, PeriodBounds, PeriodKind, ReportingPeriod};
pub use report::{format_money, round2, ReportView};
pub use schema::*;
pub use utils::*;
pub use validation::{ContributionDraft, NewContribution, NewTransaction, TransactionDraft};

use chrono::NaiveDate;
use log::{debug, info};

/// Computes ledger reports under a fixed presentation configuration.
pub struct LedgerReporter {
    config: ReportConfig,
}

impl LedgerReporter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn report(
        &self,
        records: &[FinancialRecord],
        period: ReportingPeriod,
    ) -> Result<LedgerReport> {
        info!(
            "Computing {} report for {} over {} record(s)",
            period.label(),
            if self.config.organization_name.is_empty() {
                "ledger"
            } else {
                self.config.organization_name.as_str()
            },
            records.len()
        );

        let report = LedgerEngine::new(period).build_report(records)?;

        debug!(
            "{} row(s); income {:.2}, expense {:.2}, net {:.2}",
            report.rows.len(),
            report.totals.income,
            report.totals.expense,
            report.totals.balance
        );

        Ok(report)
    }

    /// Report for the configured default period containing `today`.
    pub fn initial_report(
        &self,
        records: &[FinancialRecord],
        today: NaiveDate,
    ) -> Result<LedgerReport> {
        self.report(records, self.config.initial_period(today))
    }

    pub fn view<'a>(&'a self, report: &'a LedgerReport) -> ReportView<'a> {
        ReportView::new(report, &self.config)
    }
}

impl Default for LedgerReporter {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

/// Filters `records` into `period` and derives running balances and totals.
///
/// Pure: the same inputs always give the same report, and `records` is not
/// modified. Fails only for years outside the supported calendar range.
pub fn compute_report(
    records: &[FinancialRecord],
    period: ReportingPeriod,
) -> Result<LedgerReport> {
    LedgerReporter::default().report(records, period)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_records() -> Vec<FinancialRecord> {
        vec![
            FinancialRecord::new(1, "2025-06-01", Some(100.0), Some(0.0), "Offering"),
            FinancialRecord::new(2, "2025-06-05", Some(0.0), Some(30.0), "Candles"),
        ]
    }

    #[test]
    fn test_compute_report_end_to_end() {
        let report = compute_report(
            &june_records(),
            ReportingPeriod::Monthly {
                year: 2025,
                month: 6,
            },
        )
        .unwrap();

        assert_eq!(report.range_label, "June 2025");
        let balances: Vec<f64> = report.rows.iter().map(|r| r.running_balance).collect();
        assert_eq!(balances, vec![100.0, 70.0]);
        assert_eq!(
            report.totals,
            Totals {
                income: 100.0,
                expense: 30.0,
                balance: 70.0
            }
        );
    }

    #[test]
    fn test_compute_report_is_idempotent() {
        let records = june_records();
        let period = ReportingPeriod::Quarterly {
            year: 2025,
            quarter: 2,
        };

        let first = compute_report(&records, period).unwrap();
        let second = compute_report(&records, period).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_initial_report_uses_configured_kind() {
        let reporter = LedgerReporter::new(ReportConfig {
            default_period: PeriodKind::Yearly,
            ..ReportConfig::default()
        });
        let today = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();

        let report = reporter.initial_report(&june_records(), today).unwrap();
        assert_eq!(report.period, ReportingPeriod::Yearly { year: 2025 });
        assert_eq!(report.rows.len(), 2);
    }

    #[test]
    fn test_report_json_shape() {
        let report =
            compute_report(&june_records(), ReportingPeriod::Yearly { year: 2025 }).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["rangeLabel"], "2025");
        assert_eq!(json["invalidRange"], false);
        assert_eq!(json["totals"]["balance"], 70.0);
        assert_eq!(json["rows"][1]["_runningBalance"], 70.0);
        assert_eq!(json["period"]["kind"], "Yearly");
    }
}
