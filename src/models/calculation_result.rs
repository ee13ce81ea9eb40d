//! Calculation result models.
//!
//! Every result carries a list of [`CalculationWorking`] steps: the rounded
//! value of each step and the human-readable formula that produced it. A
//! step's rounded value is also the operand shown in the next step's formula,
//! so an auditor can redo the arithmetic from the trail alone.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single step in a calculation's working trail.
///
/// # Example
///
/// ```
/// use ukri_rules_engine::models::CalculationWorking;
/// use rust_decimal::Decimal;
///
/// let working = CalculationWorking {
///     step: "Calculate monthly salary".to_string(),
///     formula: "£52,000 ÷ 12 = £4,333.33".to_string(),
///     result: Decimal::new(433333, 2),
///     notes: None,
/// };
/// assert!(working.formula.ends_with("£4,333.33"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationWorking {
    /// Short description of the step.
    pub step: String,
    /// The arithmetic performed, with rounded operands.
    pub formula: String,
    /// The rounded result of the step.
    pub result: Decimal,
    /// Optional methodology note for auditors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The claimable staff cost for one researcher, grant and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The grant charged.
    pub grant_id: String,
    /// The researcher whose time is charged.
    pub researcher_id: String,
    /// Period year.
    pub period_year: i32,
    /// Period month.
    pub period_month: u32,
    /// Hours recorded against the grant (zero if no entry).
    pub project_hours: Decimal,
    /// Contracted hours per month, 2 d.p.
    pub contracted_monthly_hours: Decimal,
    /// Project hours as a fraction of contracted hours, 4 d.p.
    pub effort_percentage: Decimal,
    /// Annual salary ÷ 12, 2 d.p.
    pub monthly_salary: Decimal,
    /// Salary cost apportioned to the grant, 2 d.p.
    pub salary_cost_charged: Decimal,
    /// The funder's fEC rate, if any.
    pub fec_rate: Option<Decimal>,
    /// Amount claimable from the funder, 2 d.p.
    pub claimable_cost: Decimal,
    /// Step-by-step working trail.
    pub workings: Vec<CalculationWorking>,
    /// Non-fatal issues found during the calculation.
    pub warnings: Vec<String>,
}

/// One researcher's contribution to a grant total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherTotal {
    /// The researcher.
    pub researcher_id: String,
    /// Researcher display name.
    pub researcher_name: String,
    /// Sum of monthly claimable costs, 2 d.p.
    pub total_claimable: Decimal,
    /// The monthly calculations that were summed.
    pub monthly_breakdown: Vec<CalculationResult>,
}

/// The claimable total for one grant across researchers and months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantTotalResult {
    /// The grant.
    pub grant_id: String,
    /// Grant reference.
    pub grant_reference: String,
    /// Sum of the rounded per-researcher totals, 2 d.p.
    pub total_claimable_cost: Decimal,
    /// The grant's staff budget.
    pub total_staff_budget: Decimal,
    /// Total as a percentage of budget, 2 d.p. (zero when budget is zero).
    pub percent_budget_used: Decimal,
    /// Per-researcher breakdown, in input order.
    pub by_researcher: Vec<ResearcherTotal>,
    /// Working trail mirroring the rounding stages.
    pub workings: Vec<CalculationWorking>,
}

/// Spend trajectory relative to budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnRateStatus {
    /// Projected spend within ±10% of budget.
    OnTrack,
    /// Projected spend more than 10% under budget.
    Underspending,
    /// Projected spend more than 10% over budget.
    Overspending,
}

/// Projection of a grant's full-lifetime staff spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnRateResult {
    /// The grant.
    pub grant_id: String,
    /// Grant reference.
    pub grant_reference: String,
    /// The grant's staff budget.
    pub total_staff_budget: Decimal,
    /// Sum of claimable costs so far, 2 d.p.
    pub total_claimed_to_date: Decimal,
    /// Whole months since grant start, at least 1.
    pub months_elapsed: i64,
    /// Whole months left, at least 0.
    pub months_remaining: i64,
    /// Claimed to date ÷ months elapsed, 2 d.p.
    pub average_monthly_burn: Decimal,
    /// Average burn × grant length in months, 2 d.p.
    pub projected_total_cost: Decimal,
    /// Projected total minus budget, 2 d.p. Positive means overspend.
    pub projected_over_under_spend: Decimal,
    /// Classification of the projection.
    pub burn_rate_status: BurnRateStatus,
    /// Working trail.
    pub workings: Vec<CalculationWorking>,
}
