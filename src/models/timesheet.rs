//! Timesheet period, entry and status models.
//!
//! A [`TimesheetPeriod`] is one calendar month of one researcher's time. Grant
//! hours live in [`TimesheetEntry`] records and the rest of the working month
//! (teaching, admin, leave and so on) in [`NonGrantEntry`] records.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a timesheet period.
///
/// Periods move strictly forward:
/// draft → submitted → signed → countersigned → locked.
/// `Locked` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimesheetStatus {
    /// Being filled in by the researcher.
    Draft,
    /// Submitted by the researcher.
    Submitted,
    /// Signed by the researcher.
    Signed,
    /// Countersigned by the Principal Investigator.
    Countersigned,
    /// Frozen as audit evidence.
    Locked,
}

impl TimesheetStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Signed => "signed",
            Self::Countersigned => "countersigned",
            Self::Locked => "locked",
        }
    }

    /// Parses a status from a string, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "signed" => Some(Self::Signed),
            "countersigned" => Some(Self::Countersigned),
            "locked" => Some(Self::Locked),
            _ => None,
        }
    }

    /// Returns true if the period is locked.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }

    /// Returns true while the researcher may still change entries.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hours charged to one grant in one period.
///
/// Zero hours is a valid, complete entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// Unique identifier for the entry.
    #[serde(default)]
    pub id: String,
    /// The grant the hours are charged to.
    pub grant_id: String,
    /// Hours worked on the grant this month.
    pub hours: Decimal,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Category of non-grant working time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonGrantCategory {
    /// Teaching duties.
    Teaching,
    /// Administration.
    Admin,
    /// Research not funded by a tracked grant.
    OtherResearch,
    /// Annual or other leave.
    Leave,
    /// Anything else.
    Other,
}

/// Hours spent on non-grant activity in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonGrantEntry {
    /// Unique identifier for the entry.
    #[serde(default)]
    pub id: String,
    /// What the time was spent on.
    pub category: NonGrantCategory,
    /// Hours spent.
    pub hours: Decimal,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// One calendar month of one researcher's timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetPeriod {
    /// Unique identifier for the period.
    pub id: String,
    /// The researcher this period belongs to.
    pub researcher_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 = January.
    pub month: u32,
    /// Current lifecycle status.
    pub status: TimesheetStatus,
    /// When the researcher submitted the period.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// When the researcher signed the period.
    #[serde(default)]
    pub signed_at: Option<DateTime<Utc>>,
    /// When the PI countersigned the period.
    #[serde(default)]
    pub countersigned_at: Option<DateTime<Utc>>,
    /// When the period was locked.
    #[serde(default)]
    pub locked_at: Option<DateTime<Utc>>,
    /// Grant hours, at most one per grant.
    #[serde(default)]
    pub entries: Vec<TimesheetEntry>,
    /// Non-grant hours.
    #[serde(default)]
    pub non_grant_entries: Vec<NonGrantEntry>,
}

impl TimesheetPeriod {
    /// Months since year 0 for this period. Out-of-range months roll over into
    /// the neighbouring year, so month 13 of 2024 is January 2025.
    pub fn month_index(&self) -> i64 {
        month_index(self.year, self.month)
    }

    /// First day of the period's month.
    pub fn start_date(&self) -> NaiveDate {
        first_day_of_month(self.month_index())
    }

    /// Last day of the period's month.
    ///
    /// # Example
    ///
    /// ```
    /// use ukri_rules_engine::models::{TimesheetPeriod, TimesheetStatus};
    /// use chrono::NaiveDate;
    ///
    /// let period = TimesheetPeriod {
    ///     id: "tp1".to_string(),
    ///     researcher_id: "r1".to_string(),
    ///     year: 2024,
    ///     month: 2,
    ///     status: TimesheetStatus::Draft,
    ///     submitted_at: None,
    ///     signed_at: None,
    ///     countersigned_at: None,
    ///     locked_at: None,
    ///     entries: vec![],
    ///     non_grant_entries: vec![],
    /// };
    /// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    /// ```
    pub fn end_date(&self) -> NaiveDate {
        let next = first_day_of_month(self.month_index() + 1);
        next.pred_opt().unwrap_or(next)
    }

    /// The entry for `grant_id`, if the researcher recorded one.
    pub fn entry_for(&self, grant_id: &str) -> Option<&TimesheetEntry> {
        self.entries.iter().find(|e| e.grant_id == grant_id)
    }

    /// Hours recorded against `grant_id`, or zero when there is no entry.
    pub fn hours_for(&self, grant_id: &str) -> Decimal {
        self.entry_for(grant_id)
            .map(|e| e.hours)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the period has an entry (of any size) for `grant_id`.
    pub fn has_entry_for(&self, grant_id: &str) -> bool {
        self.entry_for(grant_id).is_some()
    }

    /// Total hours across all grant entries, saturating on overflow.
    pub fn grant_hours(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |total, e| total.saturating_add(e.hours))
    }

    /// Total hours across all non-grant entries, saturating on overflow.
    pub fn non_grant_hours(&self) -> Decimal {
        self.non_grant_entries
            .iter()
            .fold(Decimal::ZERO, |total, e| total.saturating_add(e.hours))
    }
}

/// Months since year 0 for a (year, month) pair, with month 1 = January.
pub fn month_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

/// First day of the month identified by `index` (see [`month_index`]).
pub fn first_day_of_month(index: i64) -> NaiveDate {
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) + 1;
    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month as u32, 1))
        .unwrap_or(if index < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_period(year: i32, month: u32) -> TimesheetPeriod {
        TimesheetPeriod {
            id: "tp1".to_string(),
            researcher_id: "r1".to_string(),
            year,
            month,
            status: TimesheetStatus::Draft,
            submitted_at: None,
            signed_at: None,
            countersigned_at: None,
            locked_at: None,
            entries: vec![
                TimesheetEntry {
                    id: "e1".to_string(),
                    grant_id: "g1".to_string(),
                    hours: dec("40"),
                    notes: None,
                },
                TimesheetEntry {
                    id: "e2".to_string(),
                    grant_id: "g2".to_string(),
                    hours: dec("0"),
                    notes: None,
                },
            ],
            non_grant_entries: vec![NonGrantEntry {
                id: "n1".to_string(),
                category: NonGrantCategory::Teaching,
                hours: dec("100.5"),
                description: Some("Undergraduate labs".to_string()),
            }],
        }
    }

    #[test]
    fn test_month_bounds_june() {
        let period = create_test_period(2024, 6);
        assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn test_month_bounds_december_crosses_year() {
        let period = create_test_period(2025, 12);
        assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_out_of_range_month_rolls_over() {
        let period = create_test_period(2024, 13);
        assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_hours_for_missing_grant_is_zero() {
        let period = create_test_period(2024, 6);
        assert_eq!(period.hours_for("g1"), dec("40"));
        assert_eq!(period.hours_for("missing"), Decimal::ZERO);
        assert!(period.has_entry_for("g2"));
        assert!(!period.has_entry_for("missing"));
    }

    #[test]
    fn test_hour_totals() {
        let period = create_test_period(2024, 6);
        assert_eq!(period.grant_hours(), dec("40"));
        assert_eq!(period.non_grant_hours(), dec("100.5"));
    }

    #[test]
    fn test_non_grant_entries_default_to_empty() {
        let json = r#"{
            "id": "tp1",
            "researcher_id": "r1",
            "year": 2024,
            "month": 6,
            "status": "submitted",
            "submitted_at": "2024-07-05T00:00:00Z",
            "entries": [{"grant_id": "g1", "hours": "75"}]
        }"#;

        let period: TimesheetPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.status, TimesheetStatus::Submitted);
        assert!(period.non_grant_entries.is_empty());
        assert!(period.signed_at.is_none());
        assert_eq!(period.entries[0].hours, dec("75"));
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!(TimesheetStatus::parse("LOCKED"), Some(TimesheetStatus::Locked));
        assert_eq!(TimesheetStatus::parse("approved"), None);
        assert_eq!(TimesheetStatus::Countersigned.to_string(), "countersigned");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TimesheetStatus::Countersigned).unwrap(),
            "\"countersigned\""
        );
        assert_eq!(
            serde_json::to_string(&NonGrantCategory::OtherResearch).unwrap(),
            "\"other_research\""
        );
    }

    #[test]
    fn test_only_draft_is_editable() {
        assert!(TimesheetStatus::Draft.is_editable());
        assert!(!TimesheetStatus::Submitted.is_editable());
        assert!(TimesheetStatus::Locked.is_locked());
    }
}
