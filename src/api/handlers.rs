//! HTTP request handlers for the UKRI rules engine API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! handler delegates to the pure engine functions and persists nothing.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    CalculationInput, calculate_burn_rate, calculate_grant_total, calculate_salary_cost,
};
use crate::error::EngineError;
use crate::models::FunderProfile;
use crate::state_machine::transition_status;
use crate::validation::{ValidationContext, ValidationReport};

use super::request::{
    BurnRateRequest, GrantTotalRequest, SalaryCostRequest, TransitionRequest, ValidateRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate/salary-cost", post(salary_cost_handler))
        .route("/calculate/grant-total", post(grant_total_handler))
        .route("/calculate/burn-rate", post(burn_rate_handler))
        .route("/validate", post(validate_handler))
        .route("/timesheets/transition", post(transition_handler))
        .route("/funder-profiles", get(list_funder_profiles_handler))
        .route("/funder-profiles/:id", get(get_funder_profile_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Unwraps a JSON body, mapping rejections to a 400 error.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse::bad_request(error))
}

fn resolve_profile<'s>(
    state: &'s AppState,
    id: &str,
    correlation_id: Uuid,
) -> Result<&'s FunderProfile, ApiErrorResponse> {
    state.funder_profiles().get(id).map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            funder_profile_id = %id,
            "Funder profile not found"
        );
        err.into()
    })
}

/// Handler for POST /calculate/salary-cost.
async fn salary_cost_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryCostRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary cost request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };
    let profile = match resolve_profile(&state, &request.grant.funder_profile_id, correlation_id)
    {
        Ok(profile) => profile,
        Err(err) => return err.into_response(),
    };

    let start_time = Instant::now();
    let result = calculate_salary_cost(&CalculationInput {
        period: &request.period,
        researcher: &request.researcher,
        grant: &request.grant,
        funder_profile: profile,
    });

    info!(
        correlation_id = %correlation_id,
        researcher_id = %result.researcher_id,
        grant_id = %result.grant_id,
        claimable_cost = %result.claimable_cost,
        warnings = result.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Salary cost calculated"
    );
    json_ok(result)
}

/// Handler for POST /calculate/grant-total.
async fn grant_total_handler(
    State(state): State<AppState>,
    payload: Result<Json<GrantTotalRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing grant total request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };
    let profile = match resolve_profile(&state, &request.grant.funder_profile_id, correlation_id)
    {
        Ok(profile) => profile,
        Err(err) => return err.into_response(),
    };

    let start_time = Instant::now();
    let result = calculate_grant_total(
        &request.grant,
        &request.periods,
        &request.researchers,
        profile,
    );

    info!(
        correlation_id = %correlation_id,
        grant_id = %result.grant_id,
        researchers = result.by_researcher.len(),
        total_claimable_cost = %result.total_claimable_cost,
        duration_us = start_time.elapsed().as_micros(),
        "Grant total calculated"
    );
    json_ok(result)
}

/// Handler for POST /calculate/burn-rate.
async fn burn_rate_handler(payload: Result<Json<BurnRateRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing burn rate request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let result = calculate_burn_rate(&request.grant, &request.calculation_results, as_of);

    info!(
        correlation_id = %correlation_id,
        grant_id = %result.grant_id,
        as_of = %as_of,
        status = ?result.burn_rate_status,
        "Burn rate projected"
    );
    json_ok(result)
}

/// Handler for POST /validate.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    let ctx = ValidationContext::new(&request.period, &request.researcher, &request.grants)
        .with_all_periods(&request.all_periods)
        .with_funder_profiles(state.funder_profiles());
    let report = ValidationReport::build(&ctx);

    info!(
        correlation_id = %correlation_id,
        period_id = %request.period.id,
        failed = report.failed_count,
        compliant = report.compliant,
        "Timesheet period validated"
    );
    json_ok(report)
}

/// Handler for POST /timesheets/transition.
///
/// Returns the period with its new status and milestone stamped with the
/// current time.
async fn transition_handler(payload: Result<Json<TransitionRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing status transition request");

    let TransitionRequest {
        mut period,
        target_status,
    } = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    let from = period.status;
    match transition_status(from, target_status).into_result() {
        Ok(update) => {
            update.apply(&mut period, Utc::now());
            info!(
                correlation_id = %correlation_id,
                period_id = %period.id,
                from = %from,
                to = %target_status,
                "Status transition applied"
            );
            json_ok(period)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                period_id = %period.id,
                error = %err,
                "Status transition rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /funder-profiles.
async fn list_funder_profiles_handler(State(state): State<AppState>) -> Response {
    json_ok(state.funder_profiles().list_all())
}

/// Handler for GET /funder-profiles/:id.
async fn get_funder_profile_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.funder_profiles().get(&id) {
        Ok(profile) => json_ok(profile),
        Err(err @ EngineError::FunderProfileNotFound { .. }) => {
            warn!(funder_profile_id = %id, "Funder profile not found");
            ApiErrorResponse::from(err).into_response()
        }
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}
