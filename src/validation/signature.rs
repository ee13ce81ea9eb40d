//! UKRI-TS-002: signature present.
//!
//! Unsigned timesheets mean disallowed costs. Both the researcher's signature
//! and the PI's countersignature are required.

use serde_json::json;

use crate::models::{Severity, ValidationResult};

use super::{UkriRule, ValidationContext};

pub(super) fn evaluate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let period = ctx.period;
    let has_researcher_signature = period.signed_at.is_some();
    let has_pi_countersignature = period.countersigned_at.is_some();
    let passed = has_researcher_signature && has_pi_countersignature;

    let message = match (has_researcher_signature, has_pi_countersignature) {
        (true, true) => "Timesheet is signed by researcher and countersigned by PI.",
        (false, false) => {
            "Timesheet is missing both researcher signature and PI countersignature."
        }
        (false, true) => "Timesheet is missing researcher signature.",
        (true, false) => "Timesheet is missing PI countersignature.",
    };

    UkriRule::Signature.result(
        Severity::Error,
        passed,
        message.to_string(),
        json!({
            "has_researcher_signature": has_researcher_signature,
            "has_pi_countersignature": has_pi_countersignature,
            "signed_at": period.signed_at,
            "countersigned_at": period.countersigned_at,
        }),
    )
}
