use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

use clinic_cell::{is_available_hour, AppointmentType, Doctor};
use shared_models::error::AppError;

pub const MIN_PATIENT_NAME_CHARS: usize = 2;
pub const MIN_PHONE_NUMBER_CHARS: usize = 8;
pub const MIN_REASON_CHARS: usize = 10;

// ==============================================================================
// WIZARD STEPS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Welcome = 0,
    PatientInfo = 1,
    DoctorSelection = 2,
    DateTimeSelection = 3,
    Review = 4,
    Confirmation = 5,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Welcome,
        Step::PatientInfo,
        Step::DoctorSelection,
        Step::DateTimeSelection,
        Step::Review,
        Step::Confirmation,
    ];

    /// Number of steps that show a progress indicator (PatientInfo..=Review).
    pub const PROGRESS_STEPS: u8 = 4;

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Step> {
        Step::ALL.get(usize::from(index)).copied()
    }

    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Confirmation
    }

    /// "Phase n/4" while the patient is inside the form, `None` on the
    /// welcome and confirmation screens.
    pub fn progress(self) -> Option<String> {
        match self {
            Step::Welcome | Step::Confirmation => None,
            step => Some(format!("Phase {}/{}", step.index(), Step::PROGRESS_STEPS)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Welcome => "welcome",
            Step::PatientInfo => "patient_info",
            Step::DoctorSelection => "doctor_selection",
            Step::DateTimeSelection => "date_time_selection",
            Step::Review => "review",
            Step::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}

// ==============================================================================
// FORM DATA
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    pub patient_name: String,
    pub phone_number: String,
    /// Collected for the record; never validated or sent anywhere.
    pub email: String,
    pub reason_for_visit: String,
    pub appointment_date: Option<String>,
    pub appointment_time: String,
    pub doctor_id: Option<u32>,
    pub appointment_type: AppointmentType,
}

impl FormData {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            patient_name: String::new(),
            phone_number: String::new(),
            email: String::new(),
            reason_for_visit: String::new(),
            appointment_date: Some(today.format("%Y-%m-%d").to_string()),
            appointment_time: String::new(),
            doctor_id: None,
            appointment_type: AppointmentType::default(),
        }
    }

    /// Shallow merge: only the fields present in `update` are replaced.
    pub fn apply(&mut self, update: FormDataUpdate) {
        if let Some(patient_name) = update.patient_name {
            self.patient_name = patient_name;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(reason_for_visit) = update.reason_for_visit {
            self.reason_for_visit = reason_for_visit;
        }
        if let Some(appointment_date) = update.appointment_date {
            self.appointment_date = appointment_date;
        }
        if let Some(appointment_time) = update.appointment_time {
            self.appointment_time = appointment_time;
        }
        if let Some(doctor_id) = update.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(appointment_type) = update.appointment_type {
            self.appointment_type = appointment_type;
        }
    }

    pub fn has_patient_info(&self) -> bool {
        self.patient_name.chars().count() >= MIN_PATIENT_NAME_CHARS
            && self.phone_number.chars().count() >= MIN_PHONE_NUMBER_CHARS
            && self.reason_for_visit.chars().count() >= MIN_REASON_CHARS
    }

    pub fn has_doctor(&self) -> bool {
        self.doctor_id.is_some()
    }

    /// A time outside the offered slot list counts as not selected.
    pub fn has_schedule(&self) -> bool {
        let has_date = self
            .appointment_date
            .as_deref()
            .map(|date| !date.is_empty())
            .unwrap_or(false);

        has_date && !self.appointment_time.is_empty() && is_available_hour(&self.appointment_time)
    }

    /// Whether the screen for `step` has everything it needs to move on.
    pub fn is_valid_for(&self, step: Step) -> bool {
        match step {
            Step::Welcome | Step::Review => true,
            Step::PatientInfo => self.has_patient_info(),
            Step::DoctorSelection => self.has_doctor(),
            Step::DateTimeSelection => self.has_schedule(),
            Step::Confirmation => false,
        }
    }
}

impl Default for FormData {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

/// Partial form edit as sent by the view. Absent fields are left untouched;
/// an explicit `null` clears the nullable ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormDataUpdate {
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub reason_for_visit: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<Option<String>>,
    #[serde(default)]
    pub appointment_time: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<Option<u32>>,
    #[serde(default)]
    pub appointment_type: Option<AppointmentType>,
}

/// Present field, `null` included, becomes `Some(..)`; a missing field falls
/// back to `None` through `#[serde(default)]`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ==============================================================================
// SESSION VIEWS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub step: Step,
    pub progress: Option<String>,
    pub form_data: FormData,
    pub ai_summary: String,
    pub is_summarizing: bool,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub selected_doctor: Option<Doctor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationResponse {
    pub session_id: Uuid,
    pub message: String,
    pub whatsapp_url: String,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("The {0} step is incomplete")]
    StepIncomplete(Step),

    #[error("A clinical summary is still being prepared")]
    SummaryInFlight,

    #[error("Cannot go back from the {0} step")]
    CannotRetreat(Step),

    #[error("Booking already confirmed")]
    AlreadyConfirmed,

    #[error("Booking already started")]
    AlreadyStarted,

    #[error("Booking is not confirmed yet (current step: {0})")]
    NotConfirmed(Step),

    #[error("Booking session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Booking moved from {expected} to {actual} while advancing")]
    StepChanged { expected: Step, actual: Step },

    #[error("Clinical summary task failed: {0}")]
    SummaryTaskFailed(String),
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::StepIncomplete(_) => AppError::ValidationError(err.to_string()),
            WizardError::SummaryInFlight | WizardError::StepChanged { .. } => {
                AppError::Conflict(err.to_string())
            }
            WizardError::SummaryTaskFailed(_) => AppError::Internal(err.to_string()),
            WizardError::SessionNotFound(_) => AppError::NotFound(err.to_string()),
            WizardError::CannotRetreat(_)
            | WizardError::AlreadyConfirmed
            | WizardError::AlreadyStarted
            | WizardError::NotConfirmed(_) => AppError::BadRequest(err.to_string()),
        }
    }
}
