//! Timesheet period status state machine.
//!
//! Valid transitions:
//!   draft → submitted → signed → countersigned → locked
//!
//! No backwards transitions, no skipped states and no self-loops. `locked` is
//! terminal. These functions only decide; writing the new status and milestone
//! timestamp is left to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{TimesheetPeriod, TimesheetStatus};

/// Every status in lifecycle order.
pub const STATUS_ORDER: [TimesheetStatus; 5] = [
    TimesheetStatus::Draft,
    TimesheetStatus::Submitted,
    TimesheetStatus::Signed,
    TimesheetStatus::Countersigned,
    TimesheetStatus::Locked,
];

/// The single status a period may move to from `current`, or `None` if terminal.
pub fn get_next_status(current: TimesheetStatus) -> Option<TimesheetStatus> {
    match current {
        TimesheetStatus::Draft => Some(TimesheetStatus::Submitted),
        TimesheetStatus::Submitted => Some(TimesheetStatus::Signed),
        TimesheetStatus::Signed => Some(TimesheetStatus::Countersigned),
        TimesheetStatus::Countersigned => Some(TimesheetStatus::Locked),
        TimesheetStatus::Locked => None,
    }
}

/// Returns true if `current → target` is an allowed edge.
pub fn can_transition_to(current: TimesheetStatus, target: TimesheetStatus) -> bool {
    get_next_status(current) == Some(target)
}

/// Outcome of checking a status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCheck {
    /// Whether the transition is allowed.
    pub valid: bool,
    /// Explanation suitable for showing to a user.
    pub message: String,
}

/// Checks whether `current → target` is allowed, without side effects.
///
/// # Example
///
/// ```
/// use ukri_rules_engine::models::TimesheetStatus;
/// use ukri_rules_engine::state_machine::validate_status_transition;
///
/// let check = validate_status_transition(TimesheetStatus::Draft, TimesheetStatus::Locked);
/// assert!(!check.valid);
/// assert!(check.message.contains("'draft' → 'submitted'"));
/// ```
pub fn validate_status_transition(
    current: TimesheetStatus,
    target: TimesheetStatus,
) -> TransitionCheck {
    let Some(allowed_next) = get_next_status(current) else {
        return TransitionCheck {
            valid: false,
            message: format!(
                "Cannot transition from '{current}': this is a terminal state. Locked timesheets cannot be modified."
            ),
        };
    };

    if target != allowed_next {
        return TransitionCheck {
            valid: false,
            message: format!(
                "Invalid transition from '{current}' to '{target}'. The only allowed transition is '{current}' → '{allowed_next}'."
            ),
        };
    }

    TransitionCheck {
        valid: true,
        message: format!("Valid transition: '{current}' → '{target}'."),
    }
}

/// The milestone timestamp stamped when a period enters a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneField {
    /// `submitted_at`
    SubmittedAt,
    /// `signed_at`
    SignedAt,
    /// `countersigned_at`
    CountersignedAt,
    /// `locked_at`
    LockedAt,
}

impl MilestoneField {
    /// The milestone recorded on entering `status`. Draft has none.
    pub fn for_status(status: TimesheetStatus) -> Option<Self> {
        match status {
            TimesheetStatus::Draft => None,
            TimesheetStatus::Submitted => Some(Self::SubmittedAt),
            TimesheetStatus::Signed => Some(Self::SignedAt),
            TimesheetStatus::Countersigned => Some(Self::CountersignedAt),
            TimesheetStatus::Locked => Some(Self::LockedAt),
        }
    }

    /// Returns the field name as stored on the period.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmittedAt => "submitted_at",
            Self::SignedAt => "signed_at",
            Self::CountersignedAt => "countersigned_at",
            Self::LockedAt => "locked_at",
        }
    }
}

/// The write a caller should make after an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// The new status.
    pub status: TimesheetStatus,
    /// The timestamp field to stamp.
    pub milestone: MilestoneField,
}

impl StatusUpdate {
    /// Sets the period's status and stamps the milestone with `at`.
    pub fn apply(&self, period: &mut TimesheetPeriod, at: DateTime<Utc>) {
        period.status = self.status;
        let slot = match self.milestone {
            MilestoneField::SubmittedAt => &mut period.submitted_at,
            MilestoneField::SignedAt => &mut period.signed_at,
            MilestoneField::CountersignedAt => &mut period.countersigned_at,
            MilestoneField::LockedAt => &mut period.locked_at,
        };
        *slot = Some(at);
    }
}

/// A checked transition together with the update to perform, if accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    /// The status the period is in.
    pub from: TimesheetStatus,
    /// The status that was requested.
    pub to: TimesheetStatus,
    /// Whether the transition is allowed.
    pub valid: bool,
    /// Explanation suitable for showing to a user.
    pub message: String,
    /// Present only when `valid` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<StatusUpdate>,
}

impl StatusTransition {
    /// Converts a rejected transition into [`EngineError::InvalidTransition`].
    pub fn into_result(self) -> EngineResult<StatusUpdate> {
        match self.update {
            Some(update) if self.valid => Ok(update),
            _ => Err(EngineError::InvalidTransition {
                from: self.from,
                to: self.to,
                message: self.message,
            }),
        }
    }
}

/// Validates `current → target` and, if allowed, describes the write to make.
///
/// # Example
///
/// ```
/// use ukri_rules_engine::models::TimesheetStatus;
/// use ukri_rules_engine::state_machine::{MilestoneField, transition_status};
///
/// let transition = transition_status(TimesheetStatus::Signed, TimesheetStatus::Countersigned);
/// let update = transition.into_result().unwrap();
/// assert_eq!(update.milestone, MilestoneField::CountersignedAt);
/// ```
pub fn transition_status(current: TimesheetStatus, target: TimesheetStatus) -> StatusTransition {
    let check = validate_status_transition(current, target);
    let update = if check.valid {
        MilestoneField::for_status(target).map(|milestone| StatusUpdate {
            status: target,
            milestone,
        })
    } else {
        None
    };

    StatusTransition {
        from: current,
        to: target,
        valid: check.valid,
        message: check.message,
        update,
    }
}
