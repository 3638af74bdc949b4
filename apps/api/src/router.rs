use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::api::BookingService;
use booking_cell::router::booking_routes;
use clinic_cell::router::clinic_routes;

pub fn create_router(bookings: Arc<BookingService>) -> Router {
    Router::new()
        .route("/", get(|| async { "HealthPlus intake API is running!" }))
        .merge(clinic_routes())
        .nest("/bookings", booking_routes(bookings))
}
