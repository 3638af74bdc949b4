use clinic_cell::Doctor;

use crate::models::FormData;

pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Shown in place of the doctor's name when `doctor_id` resolves to nothing.
pub const UNKNOWN_SPECIALIST: &str = "Unknown Specialist";

/// Plain-text WhatsApp message, formatted with WhatsApp's `*bold*` markup.
pub fn build_confirmation_message(form: &FormData, ai_summary: &str, doctor: Option<&Doctor>) -> String {
    let specialist = doctor.map(|d| d.name).unwrap_or(UNKNOWN_SPECIALIST);
    let date = form.appointment_date.as_deref().unwrap_or_default();

    format!(
        "*HEALTHPLUS CONFIRMATION*\n\
         \n\
         *Patient:* {patient}\n\
         *Phone:* {phone}\n\
         *Specialist:* {specialist}\n\
         *Schedule:* {date} @ {time}\n\
         \n\
         *Symptoms:*\n\
         {reason}\n\
         \n\
         *Clinical Summary:*\n\
         {summary}",
        patient = form.patient_name,
        phone = form.phone_number,
        specialist = specialist,
        date = date,
        time = form.appointment_time,
        reason = form.reason_for_visit,
        summary = ai_summary,
    )
}

/// `https://wa.me/<phone>?text=<message>`; everything but unreserved
/// characters in the message is percent-encoded.
pub fn build_handoff_url(phone_digits: &str, message: &str) -> String {
    format!("{}/{}?text={}", WHATSAPP_BASE_URL, phone_digits, urlencoding::encode(message))
}
