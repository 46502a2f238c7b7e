//! Mock route handlers
//!
//! - GET /health - Liveness and uptime
//! - GET /api/v1/admin/dashboard/stats - Stats payload (bearer required)
//! - GET /api/v1/admin/patients?limit=N - Recent patients (bearer required)
//! - POST /api/v1/auth/login - Issue a bearer token

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::MockError;
use super::fixtures;
use super::state::MockState;
use crate::api::dto::{
    ApiResponse, LoginData, LoginProfile, LoginRequest, LoginResponse, PatientsPayload,
    StatsPayload,
};
use crate::api::DEFAULT_PATIENT_LIMIT;
use crate::validation::LoginForm;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health
pub async fn health(State(state): State<MockState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct PatientsQuery {
    pub limit: Option<u32>,
}

/// GET /api/v1/admin/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<StatsPayload>>, MockError> {
    authorize(&state, &headers).await?;

    if let Some(code) = state.stats_failure {
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return Err(MockError::Upstream(status));
    }

    Ok(Json(ApiResponse::ok(fixtures::stats_payload())))
}

/// GET /api/v1/admin/patients
pub async fn recent_patients(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<PatientsQuery>,
) -> Result<Json<ApiResponse<PatientsPayload>>, MockError> {
    authorize(&state, &headers).await?;
    let limit = query.limit.unwrap_or(DEFAULT_PATIENT_LIMIT);
    Ok(Json(ApiResponse::ok(fixtures::patients(limit))))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<MockState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, MockError> {
    LoginForm::new(request.email.as_str(), request.password.as_str())
        .validate()
        .map_err(|e| MockError::Validation(e.to_string()))?;

    if !state.credentials_match(&request.email, &request.password) {
        return Err(MockError::InvalidCredentials);
    }

    let token = state.issue_token().await;
    tracing::info!(email = %request.email, device_type = %request.device_type, "Issued mock token");

    Ok(Json(LoginResponse {
        status: Some(true),
        message: Some("Login successful".to_string()),
        data: Some(LoginData {
            token: Some(token),
            user: Some(LoginProfile {
                email: Some(state.admin_email.clone()),
                name: None,
                first_name: Some("Care".to_string()),
                last_name: Some("Admin".to_string()),
                role: Some("admin".to_string()),
            }),
        }),
        token: None,
    }))
}

async fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), MockError> {
    if state.open_access {
        return Ok(());
    }

    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    match token {
        Some(token) if state.is_valid_token(token).await => Ok(()),
        _ => Err(MockError::Unauthenticated),
    }
}
