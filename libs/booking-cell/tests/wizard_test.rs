use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::NaiveDate;

use booking_cell::api::{build_confirmation_message, build_handoff_url, BookingWizard};
use booking_cell::{FormDataUpdate, Step, WizardError};
use clinic_cell::{clinic_info, find_doctor};
use shared_utils::test_utils::TestPatient;
use summary_cell::{ClinicalSummarizer, GenerationParams, SummaryError, TextGenerator};

/// Generator double that records how often the service would be called.
struct CountingGenerator {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingGenerator {
    fn ok() -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0), fail: false })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0), fail: true })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for CountingGenerator {
    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String, SummaryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SummaryError::Service { status: 503, message: "unavailable".to_string() });
        }
        Ok(TestPatient::default().summary.to_string())
    }
}

fn wizard() -> BookingWizard {
    BookingWizard::starting_on(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
}

fn patient_update(patient: &TestPatient) -> FormDataUpdate {
    FormDataUpdate {
        patient_name: Some(patient.name.to_string()),
        phone_number: Some(patient.phone.to_string()),
        reason_for_visit: Some(patient.reason.to_string()),
        ..Default::default()
    }
}

/// Walks a fresh wizard to the review screen.
async fn wizard_at_review(summarizer: &ClinicalSummarizer) -> BookingWizard {
    let patient = TestPatient::default();
    let mut wizard = wizard();

    wizard.advance(summarizer).await.unwrap();
    wizard.update_field(patient_update(&patient));
    wizard.advance(summarizer).await.unwrap();
    wizard.update_field(FormDataUpdate { doctor_id: Some(Some(patient.doctor_id)), ..Default::default() });
    wizard.advance(summarizer).await.unwrap();
    wizard.update_field(FormDataUpdate {
        appointment_date: Some(Some(patient.date.to_string())),
        appointment_time: Some(patient.time.to_string()),
        ..Default::default()
    });
    wizard.advance(summarizer).await.unwrap();

    assert_eq!(wizard.step(), Step::Review);
    wizard
}

#[tokio::test]
async fn test_full_booking_flow() {
    let generator = CountingGenerator::ok();
    let summarizer = ClinicalSummarizer::new(generator.clone());

    let mut wizard = wizard_at_review(&summarizer).await;
    assert_eq!(wizard.advance(&summarizer).await, Ok(Step::Confirmation));

    assert_eq!(generator.calls(), 1);
    assert_eq!(wizard.ai_summary(), "Patient reports 3-day headache.");
    assert_eq!(wizard.selected_doctor().map(|d| d.name), Some("Dr. Sarah Johnson"));
    assert!(wizard.handoff_url().starts_with("https://wa.me/1234567890?text=%2AHEALTHPLUS"));
}

#[tokio::test]
async fn test_summary_requested_once_across_back_and_forward() {
    let generator = CountingGenerator::ok();
    let summarizer = ClinicalSummarizer::new(generator.clone());
    let mut wizard = wizard();

    wizard.advance(&summarizer).await.unwrap();
    wizard.update_field(patient_update(&TestPatient::default()));
    wizard.advance(&summarizer).await.unwrap();
    assert_eq!(generator.calls(), 1);

    wizard.retreat().unwrap();
    assert_eq!(wizard.step(), Step::PatientInfo);
    wizard.advance(&summarizer).await.unwrap();

    assert_eq!(wizard.step(), Step::DoctorSelection);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_round_trip_navigation_leaves_state_unchanged() {
    let summarizer = ClinicalSummarizer::new(CountingGenerator::ok());
    let mut wizard = wizard_at_review(&summarizer).await;

    let form_before = wizard.form().clone();
    let summary_before = wizard.ai_summary().to_string();

    for _ in 0..3 {
        wizard.retreat().unwrap();
    }
    assert_eq!(wizard.step(), Step::PatientInfo);
    for _ in 0..3 {
        wizard.advance(&summarizer).await.unwrap();
    }

    assert_eq!(wizard.step(), Step::Review);
    assert_eq!(wizard.form(), &form_before);
    assert_eq!(wizard.ai_summary(), summary_before);
}

#[tokio::test]
async fn test_failed_summary_degrades_and_still_advances() {
    let generator = CountingGenerator::failing();
    let summarizer = ClinicalSummarizer::new(generator.clone());
    let patient = TestPatient::default();
    let mut wizard = wizard();

    wizard.advance(&summarizer).await.unwrap();
    wizard.update_field(patient_update(&patient));

    assert_eq!(wizard.advance(&summarizer).await, Ok(Step::DoctorSelection));
    assert_eq!(generator.calls(), 1);
    assert_eq!(wizard.ai_summary(), patient.reason);
    assert!(!wizard.is_summarizing());
}

#[tokio::test]
async fn test_invalid_patient_info_never_calls_service() {
    let generator = CountingGenerator::ok();
    let summarizer = ClinicalSummarizer::new(generator.clone());
    let mut wizard = wizard();

    wizard.advance(&summarizer).await.unwrap();
    wizard.update_field(FormDataUpdate {
        patient_name: Some("Jane Doe".to_string()),
        phone_number: Some("5551234567".to_string()),
        reason_for_visit: Some("headache".to_string()),
        ..Default::default()
    });

    assert_matches!(
        wizard.advance(&summarizer).await,
        Err(WizardError::StepIncomplete(Step::PatientInfo))
    );
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_steps_stay_within_bounds() {
    let summarizer = ClinicalSummarizer::new(CountingGenerator::ok());
    let mut wizard = wizard_at_review(&summarizer).await;
    wizard.advance(&summarizer).await.unwrap();

    for _ in 0..3 {
        assert!(wizard.advance(&summarizer).await.is_err());
        assert!(wizard.retreat().is_err());
        assert_eq!(wizard.step(), Step::Confirmation);
    }

    let mut fresh = self::wizard();
    for _ in 0..3 {
        assert!(fresh.retreat().is_err());
        assert_eq!(fresh.step(), Step::Welcome);
    }
}

#[tokio::test]
async fn test_off_list_time_slot_blocks_schedule_step() {
    let summarizer = ClinicalSummarizer::new(CountingGenerator::ok());
    let mut wizard = wizard_at_review(&summarizer).await;
    wizard.retreat().unwrap();
    assert_eq!(wizard.step(), Step::DateTimeSelection);

    wizard.update_field(FormDataUpdate { appointment_time: Some("01:00 PM".to_string()), ..Default::default() });

    assert!(!wizard.can_advance());
    assert_matches!(
        wizard.advance(&summarizer).await,
        Err(WizardError::StepIncomplete(Step::DateTimeSelection))
    );
}

#[test]
fn test_confirmation_message_for_reference_booking() {
    let patient = TestPatient::default();
    let mut wizard = wizard();
    wizard.update_field(patient_update(&patient));
    wizard.update_field(FormDataUpdate {
        doctor_id: Some(Some(patient.doctor_id)),
        appointment_date: Some(Some(patient.date.to_string())),
        appointment_time: Some(patient.time.to_string()),
        ..Default::default()
    });

    let message = build_confirmation_message(wizard.form(), patient.summary, find_doctor(patient.doctor_id));

    assert_eq!(
        message,
        "*HEALTHPLUS CONFIRMATION*\n\n\
         *Patient:* Jane Doe\n\
         *Phone:* 5551234567\n\
         *Specialist:* Dr. Sarah Johnson\n\
         *Schedule:* 2025-06-01 @ 09:00 AM\n\n\
         *Symptoms:*\n\
         Persistent headache for 3 days\n\n\
         *Clinical Summary:*\n\
         Patient reports 3-day headache."
    );

    let url = build_handoff_url(clinic_info().phone, &message);
    let encoded = url.strip_prefix("https://wa.me/1234567890?text=").unwrap();
    assert_eq!(urlencoding::decode(encoded).unwrap(), message);
}
