//! UKRI-TS-005: grant period boundary.
//!
//! Hours charged to a grant outside its start and end dates are ineligible.
//! Zero-hour entries and entries for grants not in the context are ignored.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use crate::models::{Grant, Severity, ValidationResult};

use super::{UkriRule, ValidationContext};

#[derive(Debug, Serialize)]
struct BoundaryViolation<'a> {
    grant_id: &'a str,
    grant_reference: &'a str,
    hours: Decimal,
    reason: String,
}

pub(super) fn evaluate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let period_start = ctx.period.start_date();
    let period_end = ctx.period.end_date();
    let grants_by_id: HashMap<&str, &Grant> =
        ctx.grants.iter().map(|g| (g.id.as_str(), g)).collect();

    let violations: Vec<BoundaryViolation<'_>> = ctx
        .period
        .entries
        .iter()
        .filter(|e| !e.hours.is_zero())
        .filter_map(|entry| {
            let grant = *grants_by_id.get(entry.grant_id.as_str())?;
            let reason = if grant.end_date < period_start {
                format!("Grant ended on {}, before this period.", grant.end_date)
            } else if grant.start_date > period_end {
                format!("Grant starts on {}, after this period.", grant.start_date)
            } else {
                return None;
            };
            Some(BoundaryViolation {
                grant_id: &entry.grant_id,
                grant_reference: &grant.reference,
                hours: entry.hours,
                reason,
            })
        })
        .collect();

    let passed = violations.is_empty();
    let message = if passed {
        "All timesheet entries fall within their respective grant periods.".to_string()
    } else {
        format!(
            "{} entry/entries allocate hours to grants outside their active period: {}.",
            violations.len(),
            violations
                .iter()
                .map(|v| v.grant_reference)
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    UkriRule::GrantBoundary.result(
        Severity::Error,
        passed,
        message,
        json!({ "violations": violations }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::test_support::*;

    fn run(entries: &[(&str, &str)], grants: &[Grant]) -> ValidationResult {
        let researcher = create_test_researcher();
        let period = create_test_period(2025, 10, entries);
        evaluate(&ValidationContext::new(&period, &researcher, grants))
    }

    #[test]
    fn test_hours_within_grant_period_pass() {
        let grants = vec![create_test_grant("g1", date(2024, 4, 1), date(2027, 3, 31))];
        let result = run(&[("g1", "20")], &grants);

        assert!(result.passed);
        assert!(result.details["violations"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_hours_after_grant_end_fail() {
        let grants = vec![create_test_grant("old", date(2022, 1, 1), date(2025, 9, 30))];
        let result = run(&[("old", "10")], &grants);

        assert!(!result.passed);
        assert_eq!(result.severity, Severity::Error);
        assert_eq!(
            result.details["violations"][0]["reason"],
            "Grant ended on 2025-09-30, before this period."
        );
        assert!(result.message.contains("EP/old/1"));
    }

    #[test]
    fn test_hours_before_grant_start_fail() {
        let grants = vec![create_test_grant("new", date(2025, 11, 1), date(2028, 10, 31))];
        let result = run(&[("new", "5")], &grants);

        assert!(!result.passed);
        assert_eq!(
            result.details["violations"][0]["reason"],
            "Grant starts on 2025-11-01, after this period."
        );
    }

    #[test]
    fn test_zero_hours_outside_period_ignored() {
        let grants = vec![create_test_grant("old", date(2022, 1, 1), date(2025, 9, 30))];
        assert!(run(&[("old", "0")], &grants).passed);
    }

    #[test]
    fn test_unknown_grant_ignored() {
        assert!(run(&[("mystery", "12")], &[]).passed);
    }

    #[test]
    fn test_grant_ending_mid_month_allowed() {
        let grants = vec![create_test_grant("g1", date(2022, 1, 1), date(2025, 10, 15))];
        assert!(run(&[("g1", "30")], &grants).passed);
    }
}
