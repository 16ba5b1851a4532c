use crate::api::extractors::auth::AuthOperator;
use crate::domain::models::operator::Capability;
use crate::error::{AppError, ErrorCode};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::Value;
use std::sync::Arc;

/// Apply an ordered batch of admission commands. The endpoint itself
/// needs executive or exhibition capability; each item re-checks the
/// capability its own command requires.
pub async fn post(
    State(state): State<Arc<AppState>>,
    AuthOperator(operator): AuthOperator,
    Json(items): Json<Vec<Value>>,
) -> Result<impl IntoResponse, AppError> {
    if !operator.can(Capability::Executive) && !operator.can(Capability::Exhibition) {
        return Err(ErrorCode::Forbidden.into());
    }

    let results = state.bulk.process(&operator, &items).await;
    Ok(Json(results))
}
