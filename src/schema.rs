use crate::error::Result;
use crate::period::{PeriodKind, ReportingPeriod};
use crate::utils::parse_local_ymd;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

pub const INVALID_RANGE_MESSAGE: &str = "\u{201c}From\u{201d} date must be before or same as \u{201c}To\u{201d} date.";

/// A single ledger line as returned by `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialRecord {
    #[schemars(description = "Unique identifier assigned by the backend")]
    pub id: i64,

    #[schemars(
        description = "Calendar date in YYYY-MM-DD format. Interpreted as a local accounting day, never as a UTC instant."
    )]
    pub date: String,

    #[serde(default, deserialize_with = "lenient_amount")]
    #[schemars(description = "Money received. Null or missing counts as 0.")]
    pub income: Option<f64>,

    #[serde(default, deserialize_with = "lenient_amount")]
    #[schemars(description = "Money paid out. Null or missing counts as 0.")]
    pub expense: Option<f64>,

    #[serde(default)]
    #[schemars(description = "Free text describing the transaction")]
    pub description: String,
}

impl FinancialRecord {
    pub fn new(
        id: i64,
        date: impl Into<String>,
        income: Option<f64>,
        expense: Option<f64>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date: date.into(),
            income,
            expense,
            description: description.into(),
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_local_ymd(&self.date)
    }

    pub fn income_amount(&self) -> f64 {
        coerce_amount(self.income)
    }

    pub fn expense_amount(&self) -> f64 {
        coerce_amount(self.expense)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FinancialRecord)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// Missing and non-finite amounts count as zero.
pub fn coerce_amount(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// Numbers and numeric strings are amounts; anything else is treated as absent.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// A record placed in its period: coerced amounts plus the running balance
/// up to and including this row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    #[serde(flatten)]
    pub record: FinancialRecord,

    #[serde(rename = "_income")]
    pub income: f64,

    #[serde(rename = "_expense")]
    pub expense: f64,

    #[serde(rename = "_runningBalance")]
    pub running_balance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReport {
    pub range_label: String,
    pub period: ReportingPeriod,
    pub rows: Vec<DerivedRow>,
    pub totals: Totals,
    pub invalid_range: bool,
}

impl LedgerReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The notice to show beside the date inputs, if the custom range is backwards.
    pub fn validation_message(&self) -> Option<&'static str> {
        self.invalid_range.then_some(INVALID_RANGE_MESSAGE)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportConfig {
    #[serde(default)]
    #[schemars(description = "Name printed in report headers")]
    pub organization_name: String,

    #[serde(default = "default_currency_symbol")]
    #[schemars(description = "Symbol prefixed to formatted amounts. Defaults to '$'.")]
    pub currency_symbol: String,

    #[serde(default)]
    #[schemars(
        description = "Display rows newest first. Running balances are always accumulated oldest first."
    )]
    pub newest_first: bool,

    #[serde(default)]
    #[schemars(description = "Period kind selected when the ledger is first opened")]
    pub default_period: PeriodKind,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            organization_name: String::new(),
            currency_symbol: default_currency_symbol(),
            newest_first: false,
            default_period: PeriodKind::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// The period of the configured kind that contains `today`.
    pub fn initial_period(&self, today: NaiveDate) -> ReportingPeriod {
        ReportingPeriod::containing(self.default_period, today)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ReportConfig)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
