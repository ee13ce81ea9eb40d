//! HTTP API module for the UKRI rules engine.
//!
//! Exposes the salary cost, grant total and burn rate calculators, the
//! validation orchestrator, timesheet status transitions and the funder
//! profile registry over JSON. Nothing is persisted between requests.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BurnRateRequest, GrantTotalRequest, SalaryCostRequest, TransitionRequest, ValidateRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
