//! Rules engine for UK Research and Innovation (UKRI) grant staff costs.
//!
//! This crate turns monthly researcher timesheets into auditable salary cost
//! claims. It calculates claimable costs with full step-by-step workings,
//! aggregates them per grant, projects the burn rate against budget, checks
//! timesheet periods against UKRI compliance rules, and enforces the
//! timesheet approval lifecycle.
//!
//! Every calculation and validation is a pure function of its inputs. The
//! only state is the read-only funder profile registry.
//!
//! # Example
//!
//! ```
//! use ukri_rules_engine::config::funder_profiles;
//! use ukri_rules_engine::state_machine::get_next_status;
//! use ukri_rules_engine::models::TimesheetStatus;
//!
//! let ukri = funder_profiles::lookup("ukri").unwrap();
//! assert_eq!(ukri.submission_deadline_days, 10);
//! assert_eq!(
//!     get_next_status(TimesheetStatus::Draft),
//!     Some(TimesheetStatus::Submitted)
//! );
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod state_machine;
pub mod validation;
