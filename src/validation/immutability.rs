//! UKRI-TS-008: immutability verification.
//!
//! Locking is enforced by the persistence layer. This rule only checks that a
//! locked period's milestones are consistent with having walked the full
//! lifecycle in order.

use serde_json::json;

use crate::models::{Severity, ValidationResult};

use super::{UkriRule, ValidationContext};

pub(super) fn evaluate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let rule = UkriRule::Immutability;
    let period = ctx.period;

    if !period.status.is_locked() {
        return rule.result(
            Severity::Error,
            true,
            "Period is not locked. Immutability check not applicable.".to_string(),
            json!({
                "status": period.status,
                "is_locked": false,
            }),
        );
    }

    let has_lock_timestamp = period.locked_at.is_some();
    let has_required_signatures = period.signed_at.is_some() && period.countersigned_at.is_some();
    let has_submission = period.submitted_at.is_some();

    let mut issues = Vec::new();

    if !has_lock_timestamp {
        issues.push("Period is marked as locked but has no locked_at timestamp.");
    }
    if !has_required_signatures {
        issues.push(
            "Period is locked but is missing required signatures. This should not be possible.",
        );
    }
    if !has_submission {
        issues.push(
            "Period is locked but has no submission timestamp. State integrity violated.",
        );
    }
    if let (Some(locked_at), Some(signed_at)) = (period.locked_at, period.signed_at) {
        if locked_at < signed_at {
            issues.push(
                "Period was locked before it was signed. State transition order violated.",
            );
        }
    }
    if let (Some(locked_at), Some(countersigned_at)) = (period.locked_at, period.countersigned_at)
    {
        if locked_at < countersigned_at {
            issues.push(
                "Period was locked before it was countersigned. State transition order violated.",
            );
        }
    }

    let passed = issues.is_empty();
    let message = if passed {
        "Locked period integrity verified: all timestamps and signatures are consistent."
            .to_string()
    } else {
        format!("Locked period integrity issues: {}", issues.join(" "))
    };

    rule.result(
        Severity::Error,
        passed,
        message,
        json!({
            "status": period.status,
            "is_locked": true,
            "has_lock_timestamp": has_lock_timestamp,
            "has_required_signatures": has_required_signatures,
            "has_submission": has_submission,
            "locked_at": period.locked_at,
            "signed_at": period.signed_at,
            "countersigned_at": period.countersigned_at,
            "submitted_at": period.submitted_at,
            "issues": issues,
        }),
    )
}
