//! Three-step interest form: general situation, follow-up details, review.

pub mod controller;
pub mod domain;
pub mod html;
pub mod router;
pub mod service;
pub mod store;
pub mod view;

pub use controller::{SessionNotice, WizardError, WizardSession, WizardStep};
pub use domain::{
    Complexity, ContactPreference, DetailAnswers, DetailsForm, GeneralAnswers, ResponseDraft,
    ResponseRecord, Situation, Timeline, UnknownOption,
};
pub use html::{PageError, WizardPages};
pub use router::{wizard_router, WizardRouteState};
pub use service::{WizardService, WizardServiceError};
pub use store::{SessionId, SessionStore, SessionStoreError};
pub use view::{view, WizardView};
