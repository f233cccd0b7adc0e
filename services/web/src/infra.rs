use chrono::NaiveDate;
use cpa_intake::config::SessionConfig;
use cpa_intake::wizard::{SessionId, SessionStore, SessionStoreError, WizardSession};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

struct StoredSession {
    session: WizardSession,
    touched: Instant,
}

/// Wizard sessions held in process memory; they vanish when the service restarts.
///
/// A session idle for longer than `idle_timeout` is treated as gone and is
/// swept out on the next save.
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, StoredSession>>>,
    idle_timeout: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(SessionConfig::DEFAULT_IDLE_TIMEOUT)
    }
}

impl InMemorySessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_timeout,
        }
    }

    /// Sessions currently held, expired or not.
    pub fn session_count(&self) -> Result<usize, SessionStoreError> {
        Ok(self.lock()?.len())
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<SessionId, StoredSession>>, SessionStoreError> {
        self.sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))
    }

    fn is_expired(&self, stored: &StoredSession, now: Instant) -> bool {
        now.saturating_duration_since(stored.touched) > self.idle_timeout
    }

    fn sweep_expired(
        &self,
        sessions: &mut HashMap<SessionId, StoredSession>,
        now: Instant,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, stored| !self.is_expired(stored, now));
        before - sessions.len()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        let now = Instant::now();
        let guard = self.lock()?;
        Ok(guard
            .get(id)
            .filter(|stored| !self.is_expired(stored, now))
            .map(|stored| stored.session.clone()))
    }

    fn save(&self, id: &SessionId, session: WizardSession) -> Result<(), SessionStoreError> {
        let now = Instant::now();
        let mut guard = self.lock()?;
        let evicted = self.sweep_expired(&mut guard, now);
        if evicted > 0 {
            debug!(evicted, remaining = guard.len(), "expired wizard sessions swept");
        }
        guard.insert(
            id.clone(),
            StoredSession {
                session,
                touched: now,
            },
        );
        Ok(())
    }

    fn remove(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.lock()?.remove(id);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
