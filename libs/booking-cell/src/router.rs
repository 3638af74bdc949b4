use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::booking::BookingService;

pub fn booking_routes(service: Arc<BookingService>) -> Router {
    Router::new()
        .route("/", post(handlers::create_session))
        .route(
            "/{session_id}",
            get(handlers::get_session)
                .patch(handlers::update_form)
                .delete(handlers::end_session),
        )
        .route("/{session_id}/start", post(handlers::start_booking))
        .route("/{session_id}/advance", post(handlers::advance))
        .route("/{session_id}/back", post(handlers::go_back))
        .route("/{session_id}/confirmation", get(handlers::get_confirmation))
        .with_state(service)
}
