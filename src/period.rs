use crate::error::Result;
use crate::utils::{
    clamp_month, clamp_quarter, first_day_of_month, format_ymd, last_day_of_month, month_name,
    parse_local_ymd, quarter_of_month, quarter_start_month,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum PeriodKind {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

/// The reporting window selected in the ledger view.
///
/// Months and quarters are 1-based. Values outside their range are clamped
/// when the period is resolved or navigated, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ReportingPeriod {
    Monthly {
        year: i32,
        month: u32,
    },
    Quarterly {
        year: i32,
        quarter: u32,
    },
    Yearly {
        year: i32,
    },
    Custom {
        #[serde(default)]
        start: Option<NaiveDate>,
        #[serde(default)]
        end: Option<NaiveDate>,
    },
}

/// Inclusive date bounds. `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    /// Lower bound at 00:00:00.
    pub fn start_of_day(&self) -> Option<NaiveDateTime> {
        self.start.and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// Upper bound at 23:59:59.999, so the whole last day is inside.
    pub fn end_of_day(&self) -> Option<NaiveDateTime> {
        self.end.and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
    }

    pub fn contains_datetime(&self, at: NaiveDateTime) -> bool {
        self.start_of_day().map_or(true, |s| at >= s) && self.end_of_day().map_or(true, |e| at <= e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodBounds {
    Range(DateRange),
    /// A custom range whose start falls after its end. The bounds are kept
    /// as entered so the user can correct them.
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl PeriodBounds {
    pub fn range(&self) -> Option<DateRange> {
        match self {
            PeriodBounds::Range(range) => Some(*range),
            PeriodBounds::InvalidRange { .. } => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, PeriodBounds::InvalidRange { .. })
    }
}

impl ReportingPeriod {
    pub fn kind(&self) -> PeriodKind {
        match self {
            ReportingPeriod::Monthly { .. } => PeriodKind::Monthly,
            ReportingPeriod::Quarterly { .. } => PeriodKind::Quarterly,
            ReportingPeriod::Yearly { .. } => PeriodKind::Yearly,
            ReportingPeriod::Custom { .. } => PeriodKind::Custom,
        }
    }

    /// The month, quarter or year containing `date`. A custom kind yields an
    /// open range covering all dates.
    pub fn containing(kind: PeriodKind, date: NaiveDate) -> Self {
        match kind {
            PeriodKind::Monthly => ReportingPeriod::Monthly {
                year: date.year(),
                month: date.month(),
            },
            PeriodKind::Quarterly => ReportingPeriod::Quarterly {
                year: date.year(),
                quarter: quarter_of_month(date.month()),
            },
            PeriodKind::Yearly => ReportingPeriod::Yearly { year: date.year() },
            PeriodKind::Custom => ReportingPeriod::Custom {
                start: None,
                end: None,
            },
        }
    }

    /// Builds a custom period from the raw "From"/"To" inputs. Blank or
    /// unparsable inputs leave that side open.
    pub fn custom_from_inputs(from: &str, to: &str) -> Self {
        ReportingPeriod::Custom {
            start: parse_local_ymd(from),
            end: parse_local_ymd(to),
        }
    }

    /// Copy with month/quarter clamped into range.
    pub fn normalized(self) -> Self {
        match self {
            ReportingPeriod::Monthly { year, month } => ReportingPeriod::Monthly {
                year,
                month: clamp_month(month),
            },
            ReportingPeriod::Quarterly { year, quarter } => ReportingPeriod::Quarterly {
                year,
                quarter: clamp_quarter(quarter),
            },
            other => other,
        }
    }

    pub fn resolve(&self) -> Result<PeriodBounds> {
        let bounds = match self.normalized() {
            ReportingPeriod::Monthly { year, month } => PeriodBounds::Range(DateRange::between(
                first_day_of_month(year, month)?,
                last_day_of_month(year, month)?,
            )),
            ReportingPeriod::Quarterly { year, quarter } => {
                let start_month = quarter_start_month(quarter);
                PeriodBounds::Range(DateRange::between(
                    first_day_of_month(year, start_month)?,
                    last_day_of_month(year, start_month + 2)?,
                ))
            }
            ReportingPeriod::Yearly { year } => PeriodBounds::Range(DateRange::between(
                first_day_of_month(year, 1)?,
                last_day_of_month(year, 12)?,
            )),
            ReportingPeriod::Custom {
                start: Some(start),
                end: Some(end),
            } if start > end => PeriodBounds::InvalidRange { start, end },
            ReportingPeriod::Custom { start, end } => {
                PeriodBounds::Range(DateRange::new(start, end))
            }
        };

        debug!("Resolved {} to {:?}", self, bounds);
        Ok(bounds)
    }

    pub fn label(&self) -> String {
        match self.normalized() {
            ReportingPeriod::Monthly { year, month } => {
                format!("{} {}", month_name(month), year)
            }
            ReportingPeriod::Quarterly { year, quarter } => format!("Q{} {}", quarter, year),
            ReportingPeriod::Yearly { year } => year.to_string(),
            ReportingPeriod::Custom { start, end } => match (start, end) {
                (Some(s), Some(e)) => format!("{} \u{2192} {}", format_ymd(s), format_ymd(e)),
                (Some(s), None) => format!("From {}", format_ymd(s)),
                (None, Some(e)) => format!("Through {}", format_ymd(e)),
                (None, None) => "All dates".to_string(),
            },
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range_of(period: ReportingPeriod) -> DateRange {
        period.resolve().unwrap().range().unwrap()
    }

    #[test]
    fn test_monthly_bounds() {
        let range = range_of(ReportingPeriod::Monthly {
            year: 2025,
            month: 6,
        });
        assert_eq!(range, DateRange::between(date(2025, 6, 1), date(2025, 6, 30)));

        let feb = range_of(ReportingPeriod::Monthly {
            year: 2024,
            month: 2,
        });
        assert_eq!(feb.end, Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_quarterly_bounds() {
        let q1 = range_of(ReportingPeriod::Quarterly {
            year: 2025,
            quarter: 1,
        });
        assert_eq!(q1, DateRange::between(date(2025, 1, 1), date(2025, 3, 31)));

        let q4 = range_of(ReportingPeriod::Quarterly {
            year: 2025,
            quarter: 4,
        });
        assert_eq!(q4, DateRange::between(date(2025, 10, 1), date(2025, 12, 31)));
    }

    #[test]
    fn test_yearly_bounds() {
        let year = range_of(ReportingPeriod::Yearly { year: 2025 });
        assert_eq!(year, DateRange::between(date(2025, 1, 1), date(2025, 12, 31)));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        assert_eq!(
            range_of(ReportingPeriod::Monthly {
                year: 2025,
                month: 0
            }),
            range_of(ReportingPeriod::Monthly {
                year: 2025,
                month: 1
            })
        );
        assert_eq!(
            range_of(ReportingPeriod::Monthly {
                year: 2025,
                month: 13
            }),
            range_of(ReportingPeriod::Monthly {
                year: 2025,
                month: 12
            })
        );
        assert_eq!(
            range_of(ReportingPeriod::Quarterly {
                year: 2025,
                quarter: 9
            }),
            range_of(ReportingPeriod::Quarterly {
                year: 2025,
                quarter: 4
            })
        );
        assert_eq!(
            range_of(ReportingPeriod::Quarterly {
                year: 2025,
                quarter: 0
            }),
            range_of(ReportingPeriod::Quarterly {
                year: 2025,
                quarter: 1
            })
        );
    }

    #[test]
    fn test_custom_bounds() {
        let open_end = range_of(ReportingPeriod::Custom {
            start: Some(date(2025, 6, 1)),
            end: None,
        });
        assert!(open_end.contains(date(2030, 1, 1)));
        assert!(!open_end.contains(date(2025, 5, 31)));

        let all = range_of(ReportingPeriod::Custom {
            start: None,
            end: None,
        });
        assert_eq!(all, DateRange::unbounded());

        let same_day = range_of(ReportingPeriod::Custom {
            start: Some(date(2025, 6, 1)),
            end: Some(date(2025, 6, 1)),
        });
        assert!(same_day.contains(date(2025, 6, 1)));
    }

    #[test]
    fn test_backwards_custom_range_is_not_swapped() {
        let bounds = ReportingPeriod::Custom {
            start: Some(date(2025, 6, 10)),
            end: Some(date(2025, 6, 1)),
        }
        .resolve()
        .unwrap();

        assert!(bounds.is_invalid());
        assert_eq!(
            bounds,
            PeriodBounds::InvalidRange {
                start: date(2025, 6, 10),
                end: date(2025, 6, 1)
            }
        );
        assert_eq!(bounds.range(), None);
    }

    #[test]
    fn test_unrepresentable_year_is_an_error() {
        assert!(ReportingPeriod::Yearly { year: i32::MAX }.resolve().is_err());
    }

    #[test]
    fn test_datetime_bounds_cover_whole_days() {
        let range = DateRange::between(date(2025, 6, 1), date(2025, 6, 30));
        let late = date(2025, 6, 30).and_hms_opt(23, 59, 59).unwrap();
        let early = date(2025, 6, 1).and_hms_opt(0, 0, 0).unwrap();
        let after = date(2025, 7, 1).and_hms_opt(0, 0, 0).unwrap();

        assert!(range.contains_datetime(late));
        assert!(range.contains_datetime(early));
        assert!(!range.contains_datetime(after));
    }

    #[test]
    fn test_custom_from_inputs() {
        assert_eq!(
            ReportingPeriod::custom_from_inputs("2025-06-01", ""),
            ReportingPeriod::Custom {
                start: Some(date(2025, 6, 1)),
                end: None
            }
        );
        assert_eq!(
            ReportingPeriod::custom_from_inputs("garbage", "2025-06-30"),
            ReportingPeriod::Custom {
                start: None,
                end: Some(date(2025, 6, 30))
            }
        );
    }

    #[test]
    fn test_containing() {
        let today = date(2025, 8, 14);
        assert_eq!(
            ReportingPeriod::containing(PeriodKind::Quarterly, today),
            ReportingPeriod::Quarterly {
                year: 2025,
                quarter: 3
            }
        );
        assert_eq!(
            ReportingPeriod::containing(PeriodKind::Yearly, today),
            ReportingPeriod::Yearly { year: 2025 }
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            ReportingPeriod::Monthly {
                year: 2025,
                month: 6
            }
            .label(),
            "June 2025"
        );
        assert_eq!(
            ReportingPeriod::Quarterly {
                year: 2025,
                quarter: 2
            }
            .label(),
            "Q2 2025"
        );
        assert_eq!(ReportingPeriod::Yearly { year: 2025 }.label(), "2025");
        assert_eq!(
            ReportingPeriod::custom_from_inputs("2025-06-01", "2025-06-30").label(),
            "2025-06-01 \u{2192} 2025-06-30"
        );
        assert_eq!(
            ReportingPeriod::custom_from_inputs("", "2025-06-30").label(),
            "Through 2025-06-30"
        );
        assert_eq!(ReportingPeriod::custom_from_inputs("", "").label(), "All dates");
    }

    #[test]
    fn test_period_serialization() {
        let json = serde_json::to_string(&ReportingPeriod::Quarterly {
            year: 2025,
            quarter: 3,
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"Quarterly","year":2025,"quarter":3}"#);

        let custom: ReportingPeriod =
            serde_json::from_str(r#"{"kind":"Custom","start":"2025-06-01"}"#).unwrap();
        assert_eq!(
            custom,
            ReportingPeriod::Custom {
                start: Some(date(2025, 6, 1)),
                end: None
            }
        );
    }
}
