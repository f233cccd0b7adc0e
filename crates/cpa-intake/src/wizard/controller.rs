use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{DetailAnswers, DetailsForm, GeneralAnswers, ResponseDraft, ResponseRecord};
use crate::summary::{GeneratedSummary, RenderError};

/// Screen the session is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    General,
    Details,
    Review,
}

impl WizardStep {
    pub const fn number(self) -> u8 {
        match self {
            Self::General => 1,
            Self::Details => 2,
            Self::Review => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General Situation",
            Self::Details => "A Few More Details",
            Self::Review => "Review Your Responses",
        }
    }
}

/// Message left on the session by the last transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SessionNotice {
    InterestNotConfirmed,
    RenderFailed(String),
}

/// Error raised by a wizard transition. The session is left as the notice describes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("please confirm interest to continue")]
    InterestNotConfirmed,
    #[error("expected the {expected:?} step but the session is on {actual:?}")]
    OutOfSequence {
        expected: WizardStep,
        actual: WizardStep,
    },
    #[error("the review step was reached without a complete record")]
    IncompleteRecord,
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Per-session wizard state: the current step plus everything collected so far.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WizardSession {
    step: WizardStep,
    draft: ResponseDraft,
    held_details: Option<DetailsForm>,
    notice: Option<SessionNotice>,
    summary_generated: bool,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ResponseDraft {
        &self.draft
    }

    pub fn notice(&self) -> Option<&SessionNotice> {
        self.notice.as_ref()
    }

    pub fn summary_generated(&self) -> bool {
        self.summary_generated
    }

    /// Values to prefill the first screen with.
    pub fn general_values(&self) -> GeneralAnswers {
        self.draft.general.unwrap_or_default()
    }

    /// Values to prefill the second screen with: what was typed last, else what was accepted.
    pub fn details_values(&self) -> DetailsForm {
        match (&self.held_details, &self.draft.details) {
            (Some(form), _) => form.clone(),
            (None, Some(details)) => details.to_form(),
            (None, None) => DetailsForm::default(),
        }
    }

    /// The complete record, available once the review step has been reached.
    pub fn record(&self) -> Option<ResponseRecord> {
        self.draft.complete()
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::OutOfSequence {
                expected,
                actual: self.step,
            })
        }
    }

    /// Continue from the first screen.
    pub fn submit_general(&mut self, answers: GeneralAnswers) -> Result<(), WizardError> {
        self.expect_step(WizardStep::General)?;
        self.draft.general = Some(answers);
        self.notice = None;
        self.step = WizardStep::Details;
        info!(step = self.step.number(), "general situation recorded");
        Ok(())
    }

    /// Return to the first screen, keeping whatever was typed on the second.
    pub fn back(&mut self, typed: DetailsForm) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Details)?;
        self.held_details = Some(typed);
        self.notice = None;
        self.step = WizardStep::General;
        info!(step = self.step.number(), "returned to general situation");
        Ok(())
    }

    /// Submit the second screen. Requires the interest confirmation box.
    pub fn submit_details(&mut self, form: DetailsForm) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Details)?;

        let Some(details) = DetailAnswers::from_form(&form) else {
            warn!("details submitted without interest confirmation");
            self.held_details = Some(form);
            self.notice = Some(SessionNotice::InterestNotConfirmed);
            return Err(WizardError::InterestNotConfirmed);
        };

        self.draft.details = Some(details);
        self.held_details = None;
        self.notice = None;
        self.step = WizardStep::Review;
        info!(step = self.step.number(), "details recorded, ready for review");
        Ok(())
    }

    /// Render the summary PDF for the completed record, dated `today`.
    pub fn generate(&mut self, today: NaiveDate) -> Result<GeneratedSummary, WizardError> {
        self.expect_step(WizardStep::Review)?;
        let record = self.record().ok_or(WizardError::IncompleteRecord)?;

        match GeneratedSummary::build(&record, today) {
            Ok(summary) => {
                self.summary_generated = true;
                self.notice = None;
                info!(
                    file_name = %summary.file_name,
                    size = summary.bytes.len(),
                    "summary PDF generated"
                );
                Ok(summary)
            }
            Err(err) => {
                warn!(error = %err, "summary PDF could not be rendered");
                self.notice = Some(SessionNotice::RenderFailed(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Discard everything and begin again at the first screen.
    pub fn start_over(&mut self) {
        *self = Self::default();
        info!(step = self.step.number(), "wizard reset for a new prospect");
    }
}
