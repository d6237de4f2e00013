//! HTTP request handlers.

use super::types::{HealthResponse, MessageResponse, REGISTRATION_SUCCESSFUL};
use super::AppState;
use crate::error::RegistrationError;
use crate::validation::{validate, RegistrationRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, RegistrationError> {
    let registrations = state.store.count().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        registrations,
    }))
}

/// Validate an internship registration and append it to the store.
pub async fn register_intern(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, RegistrationError> {
    let Json(request) = payload.map_err(|e| RegistrationError::Internal(e.body_text()))?;

    let registration = validate(&request)?;
    let email = registration.email.clone();
    let program = registration.internship;

    let record = registration.accept();
    let total = state.store.append(record).await?;

    info!(%email, %program, total, "Registration stored");

    Ok(Json(MessageResponse::new(REGISTRATION_SUCCESSFUL)))
}
