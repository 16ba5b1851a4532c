use crate::api::dtos::requests::{CheckInRequest, EnterRequest, ExitRequest, RegisterSpareRequest};
use crate::api::dtos::responses::GuestResponse;
use crate::api::extractors::auth::AuthOperator;
use crate::domain::models::operator::{Capability, Operator};
use crate::domain::services::admission::Transition;
use crate::error::{AppError, ErrorCode};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

fn require(operator: &Operator, capability: Capability) -> Result<(), AppError> {
    if operator.can(capability) {
        Ok(())
    } else {
        Err(ErrorCode::Forbidden.into())
    }
}

/// Exhibition operators act on their own room only; admins act anywhere.
fn require_room_operator(operator: &Operator, exhibition_id: &str) -> Result<(), AppError> {
    if operator.can(Capability::Admin) {
        return Ok(());
    }
    if operator.can(Capability::Exhibition) && operator.id == exhibition_id {
        return Ok(());
    }
    Err(ErrorCode::Forbidden.into())
}

pub async fn check_in(
    State(state): State<Arc<AppState>>,
    AuthOperator(operator): AuthOperator,
    Json(payload): Json<CheckInRequest>,
) -> Result<impl IntoResponse, AppError> {
    require(&operator, Capability::Executive)?;

    let t = Transition::live(state.clock.now());
    let (guest, term) = state
        .admission
        .check_in(&payload.guest_id, &payload.reservation_id, t)
        .await?;
    Ok(Json(GuestResponse::build(guest, term, &state.guest_types)))
}

pub async fn register_spare(
    State(state): State<Arc<AppState>>,
    AuthOperator(operator): AuthOperator,
    Json(payload): Json<RegisterSpareRequest>,
) -> Result<impl IntoResponse, AppError> {
    require(&operator, Capability::Executive)?;

    let t = Transition::live(state.clock.now());
    let (guest, term) = state
        .admission
        .register_spare(&payload.guest_id, &payload.reservation_id, t)
        .await?;
    Ok(Json(GuestResponse::build(guest, term, &state.guest_types)))
}

pub async fn check_out(
    State(state): State<Arc<AppState>>,
    AuthOperator(operator): AuthOperator,
    Path(guest_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require(&operator, Capability::Executive)?;

    let t = Transition::live(state.clock.now());
    let (guest, term) = state.admission.check_out(&guest_id, t).await?;
    Ok(Json(GuestResponse::build(guest, term, &state.guest_types)))
}

pub async fn enter(
    State(state): State<Arc<AppState>>,
    AuthOperator(operator): AuthOperator,
    Path(guest_id): Path<String>,
    Json(payload): Json<EnterRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_room_operator(&operator, &payload.exhibition_id)?;

    let t = Transition::live(state.clock.now());
    let (guest, term) = state
        .admission
        .enter(&guest_id, &payload.exhibition_id, t)
        .await?;
    Ok(Json(GuestResponse::build(guest, term, &state.guest_types)))
}

pub async fn exit(
    State(state): State<Arc<AppState>>,
    AuthOperator(operator): AuthOperator,
    Path(guest_id): Path<String>,
    Json(payload): Json<ExitRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_room_operator(&operator, &payload.exhibition_id)?;

    let t = Transition::live(state.clock.now());
    let (guest, term) = state
        .admission
        .exit(&guest_id, &payload.exhibition_id, t)
        .await?;
    Ok(Json(GuestResponse::build(guest, term, &state.guest_types)))
}
