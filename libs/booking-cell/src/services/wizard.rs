use chrono::NaiveDate;
use tracing::debug;

use clinic_cell::{clinic_info, find_doctor, Doctor};
use summary_cell::ClinicalSummarizer;

use crate::models::{FormData, FormDataUpdate, Step, WizardError};
use crate::services::confirmation::{build_confirmation_message, build_handoff_url};

/// Permission to complete one forward move, handed out by
/// [`BookingWizard::begin_advance`].
#[derive(Debug)]
#[must_use = "an advance ticket must be passed to finish_advance"]
pub struct AdvanceTicket {
    from: Step,
    reason_to_summarize: Option<String>,
}

impl AdvanceTicket {
    pub fn from_step(&self) -> Step {
        self.from
    }

    /// Reason text that still needs a clinical summary before the move
    /// completes. `None` when the summary is already cached or the move does
    /// not leave the patient-info screen.
    pub fn reason_to_summarize(&self) -> Option<&str> {
        self.reason_to_summarize.as_deref()
    }
}

/// State of a single booking session.
///
/// The AI summary is fetched once, when leaving the patient-info screen for
/// the first time. Later edits to the reason do not refresh it.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: Step,
    form: FormData,
    ai_summary: String,
    summarizing: bool,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::with_form(FormData::default())
    }

    pub fn starting_on(today: NaiveDate) -> Self {
        Self::with_form(FormData::new(today))
    }

    fn with_form(form: FormData) -> Self {
        Self {
            step: Step::Welcome,
            form,
            ai_summary: String::new(),
            summarizing: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn ai_summary(&self) -> &str {
        &self.ai_summary
    }

    pub fn is_summarizing(&self) -> bool {
        self.summarizing
    }

    pub fn selected_doctor(&self) -> Option<&'static Doctor> {
        self.form.doctor_id.and_then(find_doctor)
    }

    pub fn update_field(&mut self, update: FormDataUpdate) {
        self.form.apply(update);
    }

    pub fn is_step_valid(&self) -> bool {
        self.form.is_valid_for(self.step)
    }

    pub fn can_advance(&self) -> bool {
        !self.step.is_terminal() && self.is_step_valid() && !self.summarizing
    }

    pub fn can_retreat(&self) -> bool {
        self.step > Step::Welcome && self.step < Step::Confirmation && !self.summarizing
    }

    /// The welcome screen's start action.
    pub fn start(&mut self) -> Result<Step, WizardError> {
        if self.step != Step::Welcome {
            return Err(WizardError::AlreadyStarted);
        }
        self.step = Step::PatientInfo;
        debug!("Booking started");
        Ok(self.step)
    }

    /// Checks the gate for the current step and, when a summary is needed,
    /// marks the session as summarizing until the ticket is redeemed.
    pub fn begin_advance(&mut self) -> Result<AdvanceTicket, WizardError> {
        if self.summarizing {
            return Err(WizardError::SummaryInFlight);
        }
        if self.step.is_terminal() {
            return Err(WizardError::AlreadyConfirmed);
        }
        if !self.is_step_valid() {
            return Err(WizardError::StepIncomplete(self.step));
        }

        let reason_to_summarize = if self.step == Step::PatientInfo && self.ai_summary.is_empty() {
            self.summarizing = true;
            Some(self.form.reason_for_visit.clone())
        } else {
            None
        };

        Ok(AdvanceTicket {
            from: self.step,
            reason_to_summarize,
        })
    }

    /// Stores the summary (if one was requested) and moves one step forward.
    ///
    /// A ticket issued for a step the session has since left is refused and
    /// the step is left as it is.
    pub fn finish_advance(
        &mut self,
        ticket: AdvanceTicket,
        summary: Option<String>,
    ) -> Result<Step, WizardError> {
        if ticket.reason_to_summarize.is_some() {
            self.summarizing = false;
        }

        if self.step != ticket.from {
            return Err(WizardError::StepChanged {
                expected: ticket.from,
                actual: self.step,
            });
        }

        if ticket.reason_to_summarize.is_some() {
            if let Some(summary) = summary {
                self.ai_summary = summary;
            }
        }

        let next = ticket.from.next().ok_or(WizardError::AlreadyConfirmed)?;
        self.step = next;
        debug!("Booking moved from {} to {}", ticket.from, self.step);
        Ok(self.step)
    }

    /// Drops an in-flight summary request without moving. The step stays
    /// where it was and the summary cache is left empty.
    pub fn abort_summary(&mut self) {
        self.summarizing = false;
    }

    pub async fn advance(&mut self, summarizer: &ClinicalSummarizer) -> Result<Step, WizardError> {
        let ticket = self.begin_advance()?;
        let summary = match ticket.reason_to_summarize() {
            Some(reason) => Some(summarizer.summarize(reason).await),
            None => None,
        };
        self.finish_advance(ticket, summary)
    }

    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        if self.summarizing {
            return Err(WizardError::SummaryInFlight);
        }
        if !self.can_retreat() {
            return Err(WizardError::CannotRetreat(self.step));
        }

        let from = self.step;
        self.step = from.previous().unwrap_or(from);
        debug!("Booking moved back from {} to {}", from, self.step);
        Ok(self.step)
    }

    pub fn confirmation_message(&self) -> String {
        build_confirmation_message(&self.form, &self.ai_summary, self.selected_doctor())
    }

    pub fn handoff_url(&self) -> String {
        build_handoff_url(clinic_info().phone, &self.confirmation_message())
    }
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}
