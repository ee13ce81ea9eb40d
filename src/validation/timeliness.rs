//! UKRI-TS-003: timeliness of submission.
//!
//! UKRI requires contemporaneous time records. A timesheet is due a number of
//! days after the period ends, taken from the funder profile of the first
//! grant in the context. Late submission is a warning; more than
//! [`VERY_LATE_DAYS`] late, or never submitted, is an error.

use chrono::{Days, NaiveTime};
use serde_json::json;

use crate::config::{DEFAULT_FUNDER_PROFILE_ID, DEFAULT_SUBMISSION_DEADLINE_DAYS};
use crate::models::{Severity, ValidationResult};

use super::{UkriRule, ValidationContext};

/// Submissions more than this many days after the deadline are errors.
pub const VERY_LATE_DAYS: i64 = 30;

pub(super) fn evaluate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let rule = UkriRule::Timeliness;
    let period = ctx.period;

    let Some(submitted_at) = period.submitted_at else {
        return rule.result(
            Severity::Error,
            false,
            "Timesheet has not been submitted.".to_string(),
            json!({
                "submitted_at": null,
                "period_end": null,
                "days_late": null,
            }),
        );
    };

    // Order dependent when grants have different funders.
    let funder_profile_id = ctx
        .grants
        .first()
        .map(|g| g.funder_profile_id.as_str())
        .unwrap_or(DEFAULT_FUNDER_PROFILE_ID);
    let deadline_days = ctx
        .funder_profiles
        .lookup(funder_profile_id)
        .map(|p| p.submission_deadline_days)
        .unwrap_or(DEFAULT_SUBMISSION_DEADLINE_DAYS);

    let period_end = period.end_date();
    let deadline_date = period_end
        .checked_add_days(Days::new(u64::from(deadline_days)))
        .unwrap_or(period_end);
    let deadline = deadline_date.and_time(NaiveTime::MIN).and_utc();

    let days_late = (submitted_at - deadline).num_days().max(0);

    let (severity, passed, message) = if days_late == 0 {
        (
            Severity::Info,
            true,
            "Timesheet was submitted on time.".to_string(),
        )
    } else if days_late > VERY_LATE_DAYS {
        (
            Severity::Error,
            false,
            format!(
                "Timesheet was submitted {days_late} days after the deadline (more than \
                 {VERY_LATE_DAYS} days late). This raises serious concerns about contemporaneous \
                 completion."
            ),
        )
    } else {
        (
            Severity::Warning,
            false,
            format!(
                "Timesheet was submitted {days_late} day(s) after the deadline. Consider \
                 submitting within {deadline_days} days of period end."
            ),
        )
    };

    rule.result(
        severity,
        passed,
        message,
        json!({
            "submitted_at": submitted_at,
            "period_end": period_end,
            "deadline_days": deadline_days,
            "deadline": deadline,
            "days_late": days_late,
        }),
    )
}
