use axum::{routing::get, Router};

use crate::handlers;

/// Read-only directory routes; the reference data is compiled in so no
/// state is needed.
pub fn clinic_routes() -> Router {
    Router::new()
        .route("/clinic", get(handlers::get_clinic_info))
        .route("/doctors", get(handlers::list_doctors))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor))
        .route("/appointment-types", get(handlers::list_appointment_types))
        .route("/time-slots", get(handlers::list_time_slots))
}
