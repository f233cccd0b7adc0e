use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::controller::WizardSession;

/// Opaque identifier tying a browser to its wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accepts only identifiers this service could have issued.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim())
            .ok()
            .map(|uuid| Self(uuid.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Holds one [`WizardSession`] per visitor for the lifetime of their visit.
pub trait SessionStore: Send + Sync {
    fn load(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError>;
    fn save(&self, id: &SessionId, session: WizardSession) -> Result<(), SessionStoreError>;
    fn remove(&self, id: &SessionId) -> Result<(), SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
