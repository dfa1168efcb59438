use crate::period::ReportingPeriod;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Previous,
    Next,
}

fn step_year(year: i32, step: Step) -> i32 {
    match step {
        Step::Previous => year.saturating_sub(1),
        Step::Next => year.saturating_add(1),
    }
}

fn step_quarter(year: i32, quarter: u32, step: Step) -> (i32, u32) {
    match (step, quarter) {
        (Step::Previous, 1) => (year.saturating_sub(1), 4),
        (Step::Previous, q) => (year, q - 1),
        (Step::Next, 4) => (year.saturating_add(1), 1),
        (Step::Next, q) => (year, q + 1),
    }
}

fn step_month(year: i32, month: u32, step: Step) -> (i32, u32) {
    match (step, month) {
        (Step::Previous, 1) => (year.saturating_sub(1), 12),
        (Step::Previous, m) => (year, m - 1),
        (Step::Next, 12) => (year.saturating_add(1), 1),
        (Step::Next, m) => (year, m + 1),
    }
}

impl ReportingPeriod {
    /// Custom ranges have no neighbours.
    pub fn is_navigable(&self) -> bool {
        !matches!(self, ReportingPeriod::Custom { .. })
    }

    /// The adjacent month, quarter or year. Custom periods are returned unchanged.
    pub fn step(&self, step: Step) -> ReportingPeriod {
        match self.normalized() {
            ReportingPeriod::Yearly { year } => ReportingPeriod::Yearly {
                year: step_year(year, step),
            },
            ReportingPeriod::Quarterly { year, quarter } => {
                let (year, quarter) = step_quarter(year, quarter, step);
                ReportingPeriod::Quarterly { year, quarter }
            }
            ReportingPeriod::Monthly { year, month } => {
                let (year, month) = step_month(year, month, step);
                ReportingPeriod::Monthly { year, month }
            }
            custom @ ReportingPeriod::Custom { .. } => custom,
        }
    }

    pub fn next(&self) -> ReportingPeriod {
        self.step(Step::Next)
    }

    pub fn previous(&self) -> ReportingPeriod {
        self.step(Step::Previous)
    }
}
