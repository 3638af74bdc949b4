use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};
use uuid::Uuid;

use shared_config::AppConfig;
use summary_cell::ClinicalSummarizer;

use crate::models::{
    ConfirmationResponse, FormDataUpdate, SessionSnapshot, Step, WizardError,
};
use crate::services::wizard::BookingWizard;

type SessionHandle = Arc<Mutex<BookingWizard>>;

/// In-memory booking sessions, one [`BookingWizard`] per session id.
///
/// Session state lives only as long as the process. Each session has its own
/// lock, and no lock is held while the clinical summary is requested.
pub struct BookingService {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    summarizer: ClinicalSummarizer,
}

impl BookingService {
    pub fn new(summarizer: ClinicalSummarizer) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            summarizer,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(ClinicalSummarizer::from_config(config))
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn session(&self, session_id: Uuid) -> Result<SessionHandle, WizardError> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .ok_or(WizardError::SessionNotFound(session_id))
    }

    pub async fn create_session(&self) -> SessionSnapshot {
        let session_id = Uuid::new_v4();
        let wizard = BookingWizard::new();
        let snapshot = snapshot(session_id, &wizard);

        self.sessions
            .write()
            .await
            .insert(session_id, Arc::new(Mutex::new(wizard)));

        info!("Created booking session {}", session_id);
        snapshot
    }

    pub async fn get_session(&self, session_id: Uuid) -> Result<SessionSnapshot, WizardError> {
        let session = self.session(session_id).await?;
        let wizard = session.lock().await;
        Ok(snapshot(session_id, &wizard))
    }

    pub async fn update_form(
        &self,
        session_id: Uuid,
        update: FormDataUpdate,
    ) -> Result<SessionSnapshot, WizardError> {
        let session = self.session(session_id).await?;
        let mut wizard = session.lock().await;
        wizard.update_field(update);
        Ok(snapshot(session_id, &wizard))
    }

    pub async fn start(&self, session_id: Uuid) -> Result<SessionSnapshot, WizardError> {
        let session = self.session(session_id).await?;
        let mut wizard = session.lock().await;
        wizard.start()?;
        Ok(snapshot(session_id, &wizard))
    }

    /// Moves the session one step forward, summarizing the reason for visit
    /// first when leaving the patient-info screen for the first time.
    ///
    /// The summary is produced on a spawned task so a dropped request can not
    /// leave the session stuck in the summarizing state.
    pub async fn advance(&self, session_id: Uuid) -> Result<SessionSnapshot, WizardError> {
        let session = self.session(session_id).await?;

        let (ticket, reason) = {
            let mut wizard = session.lock().await;
            let ticket = wizard.begin_advance()?;
            let Some(reason) = ticket.reason_to_summarize().map(str::to_string) else {
                wizard.finish_advance(ticket, None)?;
                return Ok(snapshot(session_id, &wizard));
            };
            (ticket, reason)
        };

        debug!("Requesting clinical summary for session {}", session_id);
        let summarizer = self.summarizer.clone();
        let task_session = session.clone();
        let task = tokio::spawn(async move {
            let summary = summarizer.summarize(&reason).await;
            let mut wizard = task_session.lock().await;
            wizard.finish_advance(ticket, Some(summary))
        });

        match task.await {
            Ok(result) => {
                result?;
            }
            Err(e) => {
                // Only a panicking summarizer gets here; clear the flag so
                // the patient can try again.
                error!("Summary task for session {} failed: {}", session_id, e);
                session.lock().await.abort_summary();
                return Err(WizardError::SummaryTaskFailed(e.to_string()));
            }
        }

        let wizard = session.lock().await;
        Ok(snapshot(session_id, &wizard))
    }

    pub async fn retreat(&self, session_id: Uuid) -> Result<SessionSnapshot, WizardError> {
        let session = self.session(session_id).await?;
        let mut wizard = session.lock().await;
        wizard.retreat()?;
        Ok(snapshot(session_id, &wizard))
    }

    pub async fn confirmation(&self, session_id: Uuid) -> Result<ConfirmationResponse, WizardError> {
        let session = self.session(session_id).await?;
        let wizard = session.lock().await;

        if wizard.step() != Step::Confirmation {
            return Err(WizardError::NotConfirmed(wizard.step()));
        }

        info!("Issuing WhatsApp handoff for session {}", session_id);
        Ok(ConfirmationResponse {
            session_id,
            message: wizard.confirmation_message(),
            whatsapp_url: wizard.handoff_url(),
        })
    }

    pub async fn end_session(&self, session_id: Uuid) -> Result<(), WizardError> {
        if self.sessions.write().await.remove(&session_id).is_none() {
            return Err(WizardError::SessionNotFound(session_id));
        }

        info!("Ended booking session {}", session_id);
        Ok(())
    }
}

fn snapshot(session_id: Uuid, wizard: &BookingWizard) -> SessionSnapshot {
    SessionSnapshot {
        session_id,
        step: wizard.step(),
        progress: wizard.step().progress(),
        form_data: wizard.form().clone(),
        ai_summary: wizard.ai_summary().to_string(),
        is_summarizing: wizard.is_summarizing(),
        can_advance: wizard.can_advance(),
        can_retreat: wizard.can_retreat(),
        selected_doctor: wizard.selected_doctor().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::time::Duration;
    use summary_cell::{GenerationParams, SummaryError, TextGenerator};

    use shared_utils::test_utils::TestPatient;

    struct PanickingGenerator;

    #[async_trait]
    impl TextGenerator for PanickingGenerator {
        async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String, SummaryError> {
            panic!("generator blew up");
        }
    }

    async fn session_with_patient(service: &BookingService) -> Uuid {
        let patient = TestPatient::default();
        let session_id = service.create_session().await.session_id;
        service.start(session_id).await.unwrap();
        service
            .update_form(
                session_id,
                FormDataUpdate {
                    patient_name: Some(patient.name.to_string()),
                    phone_number: Some(patient.phone.to_string()),
                    reason_for_visit: Some(patient.reason.to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        session_id
    }

    #[tokio::test]
    async fn test_back_queued_behind_advance_is_not_overwritten() {
        let service = Arc::new(BookingService::from_config(&AppConfig::default()));
        let session_id = session_with_patient(&service).await;

        let at_doctor = service.advance(session_id).await.unwrap();
        assert_eq!(at_doctor.step, Step::DoctorSelection);
        service
            .update_form(session_id, FormDataUpdate { doctor_id: Some(Some(1)), ..Default::default() })
            .await
            .unwrap();

        // Queue advance then back behind a held session lock.
        let handle = service.session(session_id).await.unwrap();
        let guard = handle.lock().await;

        let forward = tokio::spawn({
            let service = service.clone();
            async move { service.advance(session_id).await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        let backward = tokio::spawn({
            let service = service.clone();
            async move { service.retreat(session_id).await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(guard);

        let forward = forward.await.unwrap().unwrap();
        assert_eq!(forward.step, Step::DateTimeSelection);
        let backward = backward.await.unwrap().unwrap();
        assert_eq!(backward.step, Step::DoctorSelection);

        let current = service.get_session(session_id).await.unwrap();
        assert_eq!(current.step, Step::DoctorSelection);
        assert_eq!(current.form_data.doctor_id, Some(1));
    }

    #[tokio::test]
    async fn test_panicking_summary_reports_failure_and_unlocks_session() {
        let service = BookingService::new(ClinicalSummarizer::new(Arc::new(PanickingGenerator)));
        let session_id = session_with_patient(&service).await;

        let result = service.advance(session_id).await;
        assert_matches!(result, Err(WizardError::SummaryTaskFailed(_)));

        let current = service.get_session(session_id).await.unwrap();
        assert_eq!(current.step, Step::PatientInfo);
        assert!(!current.is_summarizing);
        assert!(current.ai_summary.is_empty());
        assert!(current.can_retreat);
    }

    #[tokio::test]
    async fn test_unknown_session_is_reported() {
        let service = BookingService::from_config(&AppConfig::default());
        let missing = Uuid::new_v4();
        assert_matches!(service.advance(missing).await, Err(WizardError::SessionNotFound(id)) if id == missing);
    }
}
