//! Request types for the UKRI rules engine API.
//!
//! The domain models deserialize directly, so requests are thin envelopes
//! around them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CalculationResult, Grant, Researcher, TimesheetPeriod, TimesheetStatus};

/// Request body for `POST /calculate/salary-cost`.
///
/// The funder profile is resolved from `grant.funder_profile_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryCostRequest {
    /// The month being claimed.
    pub period: TimesheetPeriod,
    /// Whose time is being charged.
    pub researcher: Researcher,
    /// The grant being charged.
    pub grant: Grant,
}

/// Request body for `POST /calculate/grant-total`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantTotalRequest {
    /// The grant to total.
    pub grant: Grant,
    /// Periods for any of the researchers.
    pub periods: Vec<TimesheetPeriod>,
    /// Researchers on the grant.
    pub researchers: Vec<Researcher>,
}

/// Request body for `POST /calculate/burn-rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnRateRequest {
    /// The grant to project.
    pub grant: Grant,
    /// Monthly calculations claimed so far.
    pub calculation_results: Vec<CalculationResult>,
    /// Projection date. Defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for `POST /validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// The period to validate.
    pub period: TimesheetPeriod,
    /// The period's researcher.
    pub researcher: Researcher,
    /// The researcher's grants.
    pub grants: Vec<Grant>,
    /// The researcher's other periods, for the rolling FTE check.
    #[serde(default)]
    pub all_periods: Vec<TimesheetPeriod>,
}

/// Request body for `POST /timesheets/transition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// The period in its current state.
    pub period: TimesheetPeriod,
    /// The status to move to.
    pub target_status: TimesheetStatus,
}
