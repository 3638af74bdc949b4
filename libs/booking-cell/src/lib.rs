pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

pub use models::*;
pub use router::booking_routes;

pub mod api {
    pub use crate::services::booking::BookingService;
    pub use crate::services::confirmation::{build_confirmation_message, build_handoff_url};
    pub use crate::services::wizard::{AdvanceTicket, BookingWizard};
}
