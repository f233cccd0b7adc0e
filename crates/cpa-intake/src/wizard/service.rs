use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::controller::{WizardError, WizardSession};
use super::domain::{DetailsForm, GeneralAnswers};
use super::store::{SessionId, SessionStore, SessionStoreError};
use super::view::{view, WizardView};
use crate::summary::GeneratedSummary;

/// Runs wizard transitions against sessions kept in a [`SessionStore`].
///
/// Every transition loads the session (a fresh one when the id is unknown),
/// applies the change, and writes the session back even when the transition
/// was refused, so warnings and held input survive to the next render.
pub struct WizardService<S> {
    store: Arc<S>,
}

impl<S> WizardService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn session(&self, id: &SessionId) -> Result<WizardSession, WizardServiceError> {
        Ok(self.store.load(id)?.unwrap_or_default())
    }

    pub fn view(&self, id: &SessionId) -> Result<WizardView, WizardServiceError> {
        Ok(view(&self.session(id)?))
    }

    pub fn submit_general(
        &self,
        id: &SessionId,
        answers: GeneralAnswers,
    ) -> Result<(), WizardServiceError> {
        self.apply(id, |session| session.submit_general(answers))
    }

    pub fn back(&self, id: &SessionId, typed: DetailsForm) -> Result<(), WizardServiceError> {
        self.apply(id, |session| session.back(typed))
    }

    pub fn submit_details(
        &self,
        id: &SessionId,
        form: DetailsForm,
    ) -> Result<(), WizardServiceError> {
        self.apply(id, |session| session.submit_details(form))
    }

    pub fn generate(
        &self,
        id: &SessionId,
        today: NaiveDate,
    ) -> Result<GeneratedSummary, WizardServiceError> {
        self.apply(id, |session| session.generate(today))
    }

    /// Forget the session entirely; the next request starts from a fresh one.
    pub fn start_over(&self, id: &SessionId) -> Result<(), WizardServiceError> {
        self.store.remove(id)?;
        info!("wizard session discarded for a new prospect");
        Ok(())
    }

    fn apply<T>(
        &self,
        id: &SessionId,
        transition: impl FnOnce(&mut WizardSession) -> Result<T, WizardError>,
    ) -> Result<T, WizardServiceError> {
        let mut session = self.session(id)?;
        let outcome = transition(&mut session);
        self.store.save(id, session)?;
        Ok(outcome?)
    }
}

/// Error raised by the wizard service.
#[derive(Debug, thiserror::Error)]
pub enum WizardServiceError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}
