/*
 * Responsibility
 * - POST /authorize: run the bearer-token pipeline, answer with the policy document
 * - Always 200 for a well-formed request; Allow vs Deny lives inside the body
 */
use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::v1::dto::authorize::AuthorizeRequest;
use crate::error::AppError;
use crate::services::auth::policy::AuthorizerResponse;
use crate::state::AppState;

pub async fn authorize(
    State(state): State<AppState>,
    payload: Result<Json<AuthorizeRequest>, JsonRejection>,
) -> Result<Json<AuthorizerResponse>, AppError> {
    let Json(req) = payload
        .map_err(|rejection| AppError::bad_request("INVALID_BODY", rejection.body_text()))?;

    if let Some(method_arn) = req.method_arn.as_deref() {
        tracing::debug!(method_arn, "authorize request");
    }

    let header = req.authorization_token.unwrap_or_default();
    let decision = state.authorizer.authorize(&header).await;

    Ok(Json(decision))
}
