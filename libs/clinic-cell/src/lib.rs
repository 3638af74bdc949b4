pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

pub use models::*;
pub use router::clinic_routes;
pub use services::directory::{
    appointment_type_info, available_hours, clinic_info, doctors, find_doctor,
    is_available_hour, APPOINTMENT_TYPES, AVAILABLE_HOURS, CLINIC_INFO, DOCTORS,
};
