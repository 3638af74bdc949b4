use axum::{extract::Path, Json};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::services::directory;

pub async fn get_clinic_info() -> Json<Value> {
    Json(json!(directory::clinic_info()))
}

pub async fn list_doctors() -> Json<Value> {
    let doctors = directory::doctors();
    Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    }))
}

pub async fn get_doctor(Path(doctor_id): Path<u32>) -> Result<Json<Value>, AppError> {
    debug!("Looking up doctor {}", doctor_id);

    let doctor = directory::find_doctor(doctor_id)
        .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", doctor_id)))?;

    Ok(Json(json!(doctor)))
}

pub async fn list_appointment_types() -> Json<Value> {
    Json(json!({ "appointment_types": directory::APPOINTMENT_TYPES }))
}

pub async fn list_time_slots() -> Json<Value> {
    Json(json!({ "time_slots": directory::available_hours() }))
}
