//! UKRI timesheet compliance validation.
//!
//! Eight independent rules check one timesheet period against the UKRI terms
//! and conditions. Rules never fail: each returns a [`ValidationResult`], using
//! a passing "not applicable" result where a check cannot be made. The
//! orchestrator functions run every rule in the fixed order of
//! [`UKRI_VALIDATION_RULES`].
//!
//! # Example
//!
//! ```
//! use ukri_rules_engine::models::*;
//! use ukri_rules_engine::validation::{ValidationContext, is_compliant, validate_timesheet_period};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let researcher = Researcher {
//!     id: "r1".to_string(),
//!     name: "Dr Sarah Chen".to_string(),
//!     email: String::new(),
//!     department: "Physics".to_string(),
//!     contracted_hours_weekly: Decimal::from(35),
//!     employment_fraction: Decimal::ONE,
//!     annual_salary: Decimal::from(52_000),
//!     salary_effective_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
//!     institution_id: String::new(),
//! };
//! let period = TimesheetPeriod {
//!     id: "tp1".to_string(),
//!     researcher_id: "r1".to_string(),
//!     year: 2025,
//!     month: 10,
//!     status: TimesheetStatus::Draft,
//!     submitted_at: None,
//!     signed_at: None,
//!     countersigned_at: None,
//!     locked_at: None,
//!     entries: vec![],
//!     non_grant_entries: vec![],
//! };
//!
//! let ctx = ValidationContext::new(&period, &researcher, &[]);
//! let results = validate_timesheet_period(&ctx);
//! assert_eq!(results.len(), 8);
//! assert!(!is_compliant(&ctx));
//! ```

mod combined_fte_cap;
mod completeness;
mod fte_consistency;
mod grant_boundary;
mod hours_plausibility;
mod immutability;
mod signature;
mod timeliness;

use serde::{Deserialize, Serialize};

use crate::config::{FunderProfileRegistry, funder_profiles};
use crate::models::{Grant, Researcher, Severity, TimesheetPeriod, ValidationResult};

pub use fte_consistency::FTE_WINDOW_MONTHS;
pub use timeliness::VERY_LATE_DAYS;

/// Everything a rule may inspect.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The period being validated.
    pub period: &'a TimesheetPeriod,
    /// The period's researcher.
    pub researcher: &'a Researcher,
    /// The researcher's grants. Order matters for timeliness, which takes its
    /// deadline from the first grant's funder.
    pub grants: &'a [Grant],
    /// The researcher's other periods, for the rolling FTE window.
    pub all_periods: &'a [TimesheetPeriod],
    /// Funder profiles consulted for submission deadlines.
    pub funder_profiles: &'a FunderProfileRegistry,
}

impl<'a> ValidationContext<'a> {
    /// A context with no history, using the process-wide funder registry.
    pub fn new(
        period: &'a TimesheetPeriod,
        researcher: &'a Researcher,
        grants: &'a [Grant],
    ) -> Self {
        Self {
            period,
            researcher,
            grants,
            all_periods: &[],
            funder_profiles: funder_profiles::global(),
        }
    }

    /// Supplies the researcher's periods for cross-period rules.
    pub fn with_all_periods(mut self, all_periods: &'a [TimesheetPeriod]) -> Self {
        self.all_periods = all_periods;
        self
    }

    /// Uses `registry` instead of the process-wide funder registry.
    pub fn with_funder_profiles(mut self, registry: &'a FunderProfileRegistry) -> Self {
        self.funder_profiles = registry;
        self
    }
}

/// The closed set of UKRI timesheet rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UkriRule {
    /// UKRI-TS-001: every active grant has an entry.
    Completeness,
    /// UKRI-TS-002: researcher signature and PI countersignature.
    Signature,
    /// UKRI-TS-003: submitted within the funder's deadline.
    Timeliness,
    /// UKRI-TS-004: total hours near contracted hours.
    HoursPlausibility,
    /// UKRI-TS-005: no hours outside a grant's dates.
    GrantBoundary,
    /// UKRI-TS-006: rolling effort near funded FTE.
    FteConsistency,
    /// UKRI-TS-007: grant effort within employment fraction.
    CombinedFteCap,
    /// UKRI-TS-008: locked periods are internally consistent.
    Immutability,
}

/// Every rule, in reporting order.
pub const UKRI_VALIDATION_RULES: [UkriRule; 8] = [
    UkriRule::Completeness,
    UkriRule::Signature,
    UkriRule::Timeliness,
    UkriRule::HoursPlausibility,
    UkriRule::GrantBoundary,
    UkriRule::FteConsistency,
    UkriRule::CombinedFteCap,
    UkriRule::Immutability,
];

impl UkriRule {
    /// The rule's identifier, e.g. "UKRI-TS-001".
    pub fn rule_id(&self) -> &'static str {
        match self {
            Self::Completeness => "UKRI-TS-001",
            Self::Signature => "UKRI-TS-002",
            Self::Timeliness => "UKRI-TS-003",
            Self::HoursPlausibility => "UKRI-TS-004",
            Self::GrantBoundary => "UKRI-TS-005",
            Self::FteConsistency => "UKRI-TS-006",
            Self::CombinedFteCap => "UKRI-TS-007",
            Self::Immutability => "UKRI-TS-008",
        }
    }

    /// Human-readable rule name.
    pub fn rule_name(&self) -> &'static str {
        match self {
            Self::Completeness => "Timesheet completeness",
            Self::Signature => "Signature present",
            Self::Timeliness => "Timeliness of submission",
            Self::HoursPlausibility => "Total hours plausibility",
            Self::GrantBoundary => "Grant period boundary",
            Self::FteConsistency => "FTE consistency",
            Self::CombinedFteCap => "Combined FTE cap",
            Self::Immutability => "Immutability verification",
        }
    }

    /// The funder terms the rule enforces.
    pub fn funder_clause(&self) -> &'static str {
        match self {
            Self::Completeness => {
                "UKRI Terms and Conditions of Grant, Section: Expenditure. Staff costs must be \
                 evidenced by contemporaneous time records for all active grants"
            }
            Self::Signature => {
                "UKRI Terms and Conditions of Grant, Section: Expenditure. Time records must be \
                 signed by the researcher and countersigned by the Principal Investigator"
            }
            Self::Timeliness => {
                "UKRI Terms and Conditions of Grant, Section: Expenditure. Time records must be \
                 completed contemporaneously"
            }
            Self::HoursPlausibility => {
                "UKRI Terms and Conditions of Grant, Section: Expenditure. Time records must \
                 accurately reflect actual effort"
            }
            Self::GrantBoundary => {
                "UKRI Terms and Conditions of Grant, Section: Eligible Expenditure. Costs must \
                 fall within the grant period"
            }
            Self::FteConsistency => {
                "UKRI Terms and Conditions of Grant, Section: Expenditure. Effort charged to the \
                 grant should be consistent with the funded FTE allocation"
            }
            Self::CombinedFteCap => {
                "UKRI Terms and Conditions of Grant, Section: Eligible Expenditure. Total effort \
                 charged across all grants must not exceed the researcher's employment fraction"
            }
            Self::Immutability => {
                "UKRI Terms and Conditions of Grant, Section: Record Keeping. Approved time \
                 records must be retained unmodified as audit evidence"
            }
        }
    }

    /// Evaluates the rule.
    pub fn evaluate(&self, ctx: &ValidationContext<'_>) -> ValidationResult {
        match self {
            Self::Completeness => completeness::evaluate(ctx),
            Self::Signature => signature::evaluate(ctx),
            Self::Timeliness => timeliness::evaluate(ctx),
            Self::HoursPlausibility => hours_plausibility::evaluate(ctx),
            Self::GrantBoundary => grant_boundary::evaluate(ctx),
            Self::FteConsistency => fte_consistency::evaluate(ctx),
            Self::CombinedFteCap => combined_fte_cap::evaluate(ctx),
            Self::Immutability => immutability::evaluate(ctx),
        }
    }

    fn result(
        &self,
        severity: Severity,
        passed: bool,
        message: String,
        details: serde_json::Value,
    ) -> ValidationResult {
        ValidationResult {
            rule_id: self.rule_id().to_string(),
            rule_name: self.rule_name().to_string(),
            funder_clause: self.funder_clause().to_string(),
            severity,
            passed,
            message,
            details,
        }
    }
}

/// Runs every rule against the period, in [`UKRI_VALIDATION_RULES`] order.
pub fn validate_timesheet_period(ctx: &ValidationContext<'_>) -> Vec<ValidationResult> {
    UKRI_VALIDATION_RULES
        .iter()
        .map(|rule| rule.evaluate(ctx))
        .collect()
}

/// Runs every rule and keeps only the failures.
pub fn get_validation_errors(ctx: &ValidationContext<'_>) -> Vec<ValidationResult> {
    validate_timesheet_period(ctx)
        .into_iter()
        .filter(|r| !r.passed)
        .collect()
}

/// Returns true if every error-severity result passed.
///
/// Failed warnings and info results never block compliance.
pub fn is_compliant(ctx: &ValidationContext<'_>) -> bool {
    compliant(&validate_timesheet_period(ctx))
}

fn compliant(results: &[ValidationResult]) -> bool {
    results
        .iter()
        .filter(|r| r.severity == Severity::Error)
        .all(|r| r.passed)
}

/// All rule results for a period with a compliance summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// One result per rule, in reporting order.
    pub results: Vec<ValidationResult>,
    /// Number of rules that did not pass, at any severity.
    pub failed_count: usize,
    /// Whether every error-severity rule passed.
    pub compliant: bool,
}

impl ValidationReport {
    /// Runs every rule and summarises the outcome.
    pub fn build(ctx: &ValidationContext<'_>) -> Self {
        let results = validate_timesheet_period(ctx);
        let failed_count = results.iter().filter(|r| !r.passed).count();
        let compliant = compliant(&results);
        Self {
            results,
            failed_count,
            compliant,
        }
    }
}
