//! Application state: the shared catalog, quiz settings, the random source and
//! the in-memory session store used by the HTTP API.
//!
//! WebSocket connections own their session directly and only borrow the
//! catalog/settings/rng from here.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::catalog::KanaCatalog;
use crate::config::{load_settings_from_env, QuizSettings};
use crate::error::{HostError, QuizError};
use crate::session::QuizSession;
use crate::store::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<KanaCatalog>,
    pub settings: QuizSettings,
    rng: Arc<Mutex<StdRng>>,
    sessions: Arc<RwLock<SessionStore>>,
}

impl AppState {
    /// Build state from env: settings (TOML + QUIZ_SEED), built-in catalog, rng.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Self {
        Self::new(load_settings_from_env())
    }

    pub fn new(settings: QuizSettings) -> Self {
        let catalog = KanaCatalog::load();
        info!(
            target: "kana_quiz",
            entries = catalog.len(),
            romanizations = catalog.romanization_pool().len(),
            "Kana catalog loaded"
        );

        let rng = match settings.seed {
            Some(seed) => {
                info!(target: "kana_quiz", seed, "Question generation seeded");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        let sessions = SessionStore::new(
            settings.max_sessions,
            Duration::from_secs(settings.session_idle_secs),
        );

        Self {
            catalog: Arc::new(catalog),
            settings,
            rng: Arc::new(Mutex::new(rng)),
            sessions: Arc::new(RwLock::new(sessions)),
        }
    }

    /// Resolve the requested count (default when absent) and check it against
    /// the configured range.
    pub fn validate_question_count(&self, requested: Option<usize>) -> Result<usize, HostError> {
        let s = &self.settings;
        let n = requested.unwrap_or(s.default_questions);
        if n < s.min_questions || n > s.max_questions {
            warn!(target: "quiz", requested = n, min = s.min_questions, max = s.max_questions, "Rejected question count");
            return Err(HostError::InvalidQuestionCount {
                requested: n,
                min: s.min_questions,
                max: s.max_questions,
            });
        }
        Ok(n)
    }

    /// Validate the count and generate a fresh session. Not stored.
    #[instrument(level = "debug", skip(self))]
    pub fn build_session(&self, requested: Option<usize>) -> Result<QuizSession, HostError> {
        let n = self.validate_question_count(requested)?;
        // rng state is still usable after a poisoning panic
        let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
        let session = QuizSession::start_with_attempts(
            &self.catalog,
            n,
            self.settings.distractor_attempts,
            &mut *rng,
        )?;
        Ok(session)
    }

    #[instrument(level = "debug", skip(self, session), fields(total = session.total_questions()))]
    pub async fn insert_session(&self, session: QuizSession) -> Uuid {
        let id = Uuid::new_v4();
        let dropped = self.sessions.write().await.insert(id, session);
        if !dropped.is_empty() {
            info!(target: "quiz", count = dropped.len(), ?dropped, "Evicted stored sessions");
        }
        debug!(target: "quiz", %id, "Session stored");
        id
    }

    /// Run `f` against a stored session under the write lock.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut QuizSession) -> Result<T, QuizError>,
    ) -> Result<T, HostError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(HostError::UnknownSession(id))?;
        Ok(f(session)?)
    }

    /// Read-only counterpart of [`AppState::with_session`]; takes the read lock.
    pub async fn with_session_ref<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&QuizSession) -> T,
    ) -> Result<T, HostError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id).ok_or(HostError::UnknownSession(id))?;
        Ok(f(session))
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn remove_session(&self, id: Uuid) -> Result<QuizSession, HostError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .ok_or(HostError::UnknownSession(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> AppState {
        AppState::new(QuizSettings { seed: Some(3), ..QuizSettings::default() })
    }

    #[test]
    fn default_count_applies_when_absent() {
        let state = seeded();
        assert_eq!(state.validate_question_count(None), Ok(50));
        assert_eq!(state.build_session(Some(7)).unwrap().total_questions(), 7);
    }

    #[test]
    fn out_of_range_counts_are_configuration_errors() {
        let state = seeded();
        for bad in [0, 501] {
            assert_eq!(
                state.validate_question_count(Some(bad)),
                Err(HostError::InvalidQuestionCount { requested: bad, min: 1, max: 500 })
            );
        }
        assert!(state.build_session(Some(500)).is_ok());
    }

    #[test]
    fn same_seed_generates_same_questions() {
        let a = seeded().build_session(Some(10)).unwrap();
        let b = seeded().build_session(Some(10)).unwrap();
        assert_eq!(a.questions(), b.questions());
    }

    #[tokio::test]
    async fn stored_sessions_are_mutated_in_place() {
        let state = seeded();
        let id = state.insert_session(state.build_session(Some(2)).unwrap()).await;

        let correct = state
            .with_session(id, |s| Ok(s.questions()[0].correct_option().to_string()))
            .await
            .unwrap();
        state.with_session(id, |s| s.submit_answer(&correct)).await.unwrap();
        let score = state.with_session(id, |s| Ok(s.score())).await.unwrap();
        assert_eq!(score, 1);

        let err = state.with_session(id, |s| s.submit_answer(&correct)).await.unwrap_err();
        assert_eq!(err, HostError::Quiz(QuizError::AlreadyAnswered));

        state.remove_session(id).await.unwrap();
        assert_eq!(state.remove_session(id).await.unwrap_err(), HostError::UnknownSession(id));
    }

    #[tokio::test]
    async fn store_stays_within_max_sessions() {
        let state = AppState::new(QuizSettings { seed: Some(3), max_sessions: 2, ..QuizSettings::default() });
        let first = state.insert_session(state.build_session(Some(1)).unwrap()).await;
        let second = state.insert_session(state.build_session(Some(1)).unwrap()).await;
        state.with_session_ref(first, |s| s.total_questions()).await.unwrap();

        let third = state.insert_session(state.build_session(Some(1)).unwrap()).await;
        assert_eq!(state.session_count().await, 2);
        assert_eq!(
            state.with_session_ref(second, |_| ()).await.unwrap_err(),
            HostError::UnknownSession(second)
        );
        assert!(state.with_session_ref(first, |_| ()).await.is_ok());
        assert!(state.with_session_ref(third, |_| ()).await.is_ok());
    }
}
