use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{ConfirmationResponse, FormDataUpdate, SessionSnapshot};
use crate::services::booking::BookingService;

pub async fn create_session(
    State(service): State<Arc<BookingService>>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let snapshot = service.create_session().await;
    (StatusCode::CREATED, Json(snapshot))
}

pub async fn get_session(
    State(service): State<Arc<BookingService>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service.get_session(session_id).await?))
}

pub async fn update_form(
    State(service): State<Arc<BookingService>>,
    Path(session_id): Path<Uuid>,
    Json(update): Json<FormDataUpdate>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service.update_form(session_id, update).await?))
}

pub async fn start_booking(
    State(service): State<Arc<BookingService>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service.start(session_id).await?))
}

pub async fn advance(
    State(service): State<Arc<BookingService>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service.advance(session_id).await?))
}

pub async fn go_back(
    State(service): State<Arc<BookingService>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service.retreat(session_id).await?))
}

pub async fn get_confirmation(
    State(service): State<Arc<BookingService>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ConfirmationResponse>, AppError> {
    Ok(Json(service.confirmation(session_id).await?))
}

pub async fn end_session(
    State(service): State<Arc<BookingService>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service.end_session(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
