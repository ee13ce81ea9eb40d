//! UKRI-TS-001: timesheet completeness.
//!
//! Every grant active during the period month needs an entry, even a zero-hour
//! one. A missing entry is missing evidence an auditor will flag.

use serde_json::json;

use crate::models::{Grant, Severity, ValidationResult};

use super::{UkriRule, ValidationContext};

pub(super) fn evaluate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let period = ctx.period;
    let (period_start, period_end) = (period.start_date(), period.end_date());

    let active_grants: Vec<&Grant> = ctx
        .grants
        .iter()
        .filter(|g| g.overlaps(period_start, period_end))
        .collect();

    let missing_grants: Vec<&Grant> = active_grants
        .iter()
        .copied()
        .filter(|g| !period.has_entry_for(&g.id))
        .collect();

    let passed = missing_grants.is_empty();
    let message = if passed {
        "All active grants have timesheet entries for this period.".to_string()
    } else {
        format!(
            "Missing timesheet entries for {} active grant(s): {}.",
            missing_grants.len(),
            missing_grants
                .iter()
                .map(|g| g.reference.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    UkriRule::Completeness.result(
        Severity::Error,
        passed,
        message,
        json!({
            "active_grant_count": active_grants.len(),
            "entry_count": period.entries.len(),
            "missing_grants": missing_grants
                .iter()
                .map(|g| json!({ "id": g.id, "reference": g.reference, "title": g.title }))
                .collect::<Vec<_>>(),
        }),
    )
}
