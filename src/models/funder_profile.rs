//! Funder profile model.
//!
//! A funder profile captures the methodology parameters a funder imposes on
//! staff-cost claims. Profiles are immutable once loaded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a funder expects staff costs to be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunderMethodology {
    /// Effort percentage of contracted hours × monthly salary.
    PercentageOfSalary,
    /// Half-day units at a day rate.
    HalfDayRate,
    /// A single total per quarter.
    QuarterlyTotal,
}

/// Which working time a funder requires researchers to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeCapture {
    /// Only time on the funded project.
    ProjectOnly,
    /// All working time, project or not.
    AllWorkingTime,
}

/// Granularity of timesheet periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodGranularity {
    /// One timesheet per day.
    Daily,
    /// One timesheet per week.
    Weekly,
    /// One timesheet per calendar month.
    Monthly,
}

/// Methodology parameters for one funder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunderProfile {
    /// Registry key, e.g. "ukri".
    pub id: String,
    /// Display name.
    pub name: String,
    /// Fraction of full Economic Cost the funder pays, if it applies one.
    pub fec_rate: Option<Decimal>,
    /// Cost derivation method.
    pub calculation_method: FunderMethodology,
    /// What time must be captured.
    pub time_capture: TimeCapture,
    /// Timesheet granularity.
    pub period_granularity: PeriodGranularity,
    /// Whether the PI must countersign.
    pub requires_pi_signature: bool,
    /// Days after period end by which a timesheet must be submitted.
    pub submission_deadline_days: u32,
    /// Working days per year, for day-rate funders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_days_per_year: Option<u32>,
    /// Free-text guidance.
    #[serde(default)]
    pub notes: String,
}

impl FunderProfile {
    /// The UK Research & Innovation profile: 80% fEC, monthly all-time
    /// timesheets, PI countersignature, 10-day submission deadline.
    pub fn ukri() -> Self {
        Self {
            id: "ukri".to_string(),
            name: "UK Research & Innovation".to_string(),
            fec_rate: Some(Decimal::new(8, 1)),
            calculation_method: FunderMethodology::PercentageOfSalary,
            time_capture: TimeCapture::AllWorkingTime,
            period_granularity: PeriodGranularity::Monthly,
            requires_pi_signature: true,
            submission_deadline_days: 10,
            working_days_per_year: None,
            notes: "UKRI funds at 80% of full Economic Cost (fEC). Researchers must record all \
                    working time, not just project time. Monthly timesheets require researcher \
                    signature and PI countersignature. Salary costs are calculated as a \
                    percentage of contracted hours apportioned to the grant."
                .to_string(),
        }
    }
}
