use crate::error::Result;
use crate::period::{DateRange, PeriodBounds, ReportingPeriod};
use crate::schema::{DerivedRow, FinancialRecord, LedgerReport, Totals};
use chrono::NaiveDate;
use log::debug;

/// Turns a flat record list into the ledger view of a single period.
pub struct LedgerEngine {
    period: ReportingPeriod,
}

impl LedgerEngine {
    pub fn new(period: ReportingPeriod) -> Self {
        Self { period }
    }

    pub fn period(&self) -> ReportingPeriod {
        self.period
    }

    pub fn build_report(&self, records: &[FinancialRecord]) -> Result<LedgerReport> {
        let range_label = self.period.label();

        let range = match self.period.resolve()? {
            PeriodBounds::Range(range) => range,
            PeriodBounds::InvalidRange { start, end } => {
                debug!(
                    "Custom range {} .. {} is backwards; returning an empty report",
                    start, end
                );
                return Ok(LedgerReport {
                    range_label,
                    period: self.period,
                    rows: Vec::new(),
                    totals: Totals::default(),
                    invalid_range: true,
                });
            }
        };

        let in_period = filter_records(records, &range);
        let ordered = sort_chronologically(in_period);
        let rows = accumulate_running_balance(&ordered);
        let totals = compute_totals(&rows);

        Ok(LedgerReport {
            range_label,
            period: self.period,
            rows,
            totals,
            invalid_range: false,
        })
    }
}

/// Records whose date lies inside `range`, paired with the parsed date.
/// Records with an unparsable date are dropped. Input order is kept.
pub fn filter_records<'a>(
    records: &'a [FinancialRecord],
    range: &DateRange,
) -> Vec<(NaiveDate, &'a FinancialRecord)> {
    let mut unparsable = 0usize;

    let kept: Vec<_> = records
        .iter()
        .filter_map(|record| match record.parsed_date() {
            Some(date) => Some((date, record)),
            None => {
                unparsable += 1;
                None
            }
        })
        .filter(|(date, _)| range.contains(*date))
        .collect();

    if unparsable > 0 {
        debug!("Excluded {} record(s) with an unparsable date", unparsable);
    }
    debug!("{} of {} record(s) fall inside the period", kept.len(), records.len());

    kept
}

/// Stable sort by date, oldest first. Same-day records keep their input order.
pub fn sort_chronologically(
    mut dated: Vec<(NaiveDate, &FinancialRecord)>,
) -> Vec<(NaiveDate, &FinancialRecord)> {
    dated.sort_by_key(|(date, _)| *date);
    dated
}

/// Walks the ordered records forward, starting from a zero balance.
pub fn accumulate_running_balance(ordered: &[(NaiveDate, &FinancialRecord)]) -> Vec<DerivedRow> {
    let mut running = 0.0;

    ordered
        .iter()
        .map(|(_, record)| {
            let income = record.income_amount();
            let expense = record.expense_amount();
            running += income - expense;

            DerivedRow {
                record: (*record).clone(),
                income,
                expense,
                running_balance: running,
            }
        })
        .collect()
}

/// Full-precision sums; rounding is left to presentation.
pub fn compute_totals(rows: &[DerivedRow]) -> Totals {
    let (income, expense) = rows
        .iter()
        .fold((0.0, 0.0), |(inc, exp), row| (inc + row.income, exp + row.expense));

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}
