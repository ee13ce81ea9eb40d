//! Grant model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A funded research grant that staff time is charged against.
///
/// Effort is only eligible between `start_date` and `end_date` inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Unique identifier for the grant.
    pub id: String,
    /// The funder profile that governs this grant's methodology (e.g. "ukri").
    pub funder_profile_id: String,
    /// Grant title.
    #[serde(default)]
    pub title: String,
    /// Funder reference, e.g. "EP/T023456/1".
    pub reference: String,
    /// First eligible day.
    pub start_date: NaiveDate,
    /// Last eligible day.
    pub end_date: NaiveDate,
    /// Contractually expected share of effort, between 0 and 1.
    pub funded_fte: Decimal,
    /// Total staff budget in pounds.
    pub total_staff_budget: Decimal,
    /// The PI who countersigns timesheets for this grant.
    #[serde(default)]
    pub principal_investigator_id: String,
    /// Owning institution.
    #[serde(default)]
    pub institution_id: String,
}

impl Grant {
    /// Returns true if the grant's active range overlaps `[from, to]`.
    ///
    /// # Example
    ///
    /// ```
    /// use ukri_rules_engine::models::Grant;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let grant = Grant {
    ///     id: "g1".to_string(),
    ///     funder_profile_id: "ukri".to_string(),
    ///     title: "Test".to_string(),
    ///     reference: "UKRI-001".to_string(),
    ///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    ///     funded_fte: Decimal::new(5, 1),
    ///     total_staff_budget: Decimal::from(25_000),
    ///     principal_investigator_id: "pi1".to_string(),
    ///     institution_id: "inst1".to_string(),
    /// };
    ///
    /// let june_1 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let june_30 = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    /// assert!(grant.overlaps(june_1, june_30));
    /// ```
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && self.end_date >= from
    }
}
