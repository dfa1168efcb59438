use crate::schema::{DerivedRow, LedgerReport, ReportConfig};
use crate::utils::format_ymd;

/// Two-decimal rounding, applied only when amounts are shown.
pub fn round2(value: f64) -> f64 {
    // Adding zero turns -0.0 into 0.0.
    (value * 100.0).round() / 100.0 + 0.0
}

pub fn format_money(value: f64, currency_symbol: &str) -> String {
    let rounded = round2(value);
    if rounded < 0.0 {
        format!("-{}{:.2}", currency_symbol, rounded.abs())
    } else {
        format!("{}{:.2}", currency_symbol, rounded)
    }
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

fn markdown_cell(raw: &str) -> String {
    raw.replace(['\r', '\n'], " ").replace('|', "\\|")
}

fn display_date(row: &DerivedRow) -> String {
    row.record
        .parsed_date()
        .map(format_ymd)
        .unwrap_or_else(|| row.record.date.clone())
}

/// A computed report dressed for display under a given configuration.
pub struct ReportView<'a> {
    report: &'a LedgerReport,
    config: &'a ReportConfig,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a LedgerReport, config: &'a ReportConfig) -> Self {
        Self { report, config }
    }

    /// Rows in display order. Balances are unchanged; only the order flips
    /// when `newest_first` is set.
    pub fn display_rows(&self) -> Vec<&'a DerivedRow> {
        let mut rows: Vec<&DerivedRow> = self.report.rows.iter().collect();
        if self.config.newest_first {
            rows.reverse();
        }
        rows
    }

    pub fn money(&self, value: f64) -> String {
        format_money(value, &self.config.currency_symbol)
    }

    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("Date,Income,Expense,Description,Balance\n");

        for row in self.display_rows() {
            output.push_str(&format!(
                "{},{:.2},{:.2},{},{:.2}\n",
                display_date(row),
                round2(row.income),
                round2(row.expense),
                csv_field(&row.record.description),
                round2(row.running_balance)
            ));
        }

        output
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        if self.config.organization_name.is_empty() {
            output.push_str("# Finance Dashboard\n\n");
        } else {
            output.push_str(&format!(
                "# Finance Dashboard - {}\n\n",
                self.config.organization_name
            ));
        }

        if let Some(message) = self.report.validation_message() {
            output.push_str(&format!("> {}\n", message));
            return output;
        }

        output.push_str("| Date | Income | Expense | Description | Balance |\n");
        output.push_str("|------|-------:|--------:|-------------|--------:|\n");

        for row in self.display_rows() {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                display_date(row),
                self.money(row.income),
                self.money(row.expense),
                markdown_cell(&row.record.description),
                self.money(row.running_balance)
            ));
        }

        if self.report.rows.is_empty() {
            output.push_str("\nNo transactions for the selected period.\n");
        }

        output.push_str(&format!("\n## Summary ({})\n\n", self.report.range_label));
        output.push_str(&format!(
            "- **Total Income:** {}\n",
            self.money(self.report.totals.income)
        ));
        output.push_str(&format!(
            "- **Total Expense:** {}\n",
            self.money(self.report.totals.expense)
        ));
        output.push_str(&format!(
            "- **Net Balance:** {}\n",
            self.money(self.report.totals.balance)
        ));

        output
    }
}
