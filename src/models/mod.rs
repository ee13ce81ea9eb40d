//! Core data models for the UKRI rules engine.
//!
//! These are the input records supplied by the persistence layer and the
//! result value objects the engine hands back.

mod calculation_result;
mod funder_profile;
mod grant;
mod researcher;
mod timesheet;
mod validation_result;

pub use calculation_result::{
    BurnRateResult, BurnRateStatus, CalculationResult, CalculationWorking, GrantTotalResult,
    ResearcherTotal,
};
pub use funder_profile::{FunderMethodology, FunderProfile, PeriodGranularity, TimeCapture};
pub use grant::Grant;
pub use researcher::{MONTHS_PER_YEAR, Researcher, WEEKS_PER_YEAR};
pub use timesheet::{
    NonGrantCategory, NonGrantEntry, TimesheetEntry, TimesheetPeriod, TimesheetStatus,
    first_day_of_month, month_index,
};
pub use validation_result::{Severity, ValidationResult};
