use std::fmt;

use serde::{Deserialize, Serialize};

/// Specialist listed in the clinic directory. Records are compiled in and
/// never created or mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doctor {
    pub id: u32,
    pub name: &'static str,
    pub specialty: &'static str,
    pub image: &'static str,
    pub experience: &'static str,
    pub patients: &'static str,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicInfo {
    pub name: &'static str,
    /// Digits only; used as the WhatsApp destination.
    pub phone: &'static str,
    pub email: &'static str,
    pub address: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    #[default]
    Consultation,
    FollowUp,
    UrgentCare,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 3] = [
        AppointmentType::Consultation,
        AppointmentType::FollowUp,
        AppointmentType::UrgentCare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Consultation => "consultation",
            AppointmentType::FollowUp => "follow-up",
            AppointmentType::UrgentCare => "urgent-care",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentTypeInfo {
    pub id: AppointmentType,
    pub label: &'static str,
    pub description: &'static str,
}
