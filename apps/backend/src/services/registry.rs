//! In-process registry of running practice sessions.
//!
//! Each session owns its own `SessionController`; the registry keys them by
//! session id and serializes access to each one behind a lock.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use practice_core::{PracticeContext, PracticeMode, SessionController, Word};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SessionController>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session over `words` and return its id.
    pub fn create(
        &self,
        word_list_id: String,
        user_id: Option<String>,
        mode: PracticeMode,
        words: Vec<Word>,
    ) -> Uuid {
        let session_id = Uuid::new_v4();
        let mut context = PracticeContext::new(session_id.to_string(), word_list_id);
        context.user_id = user_id;

        let controller = SessionController::new(context, mode, words, Utc::now());
        self.lock().insert(session_id, controller);

        tracing::info!("Started {} session {}", mode.as_str(), session_id);
        session_id
    }

    /// Run `f` against one session while holding the registry lock.
    pub fn with_session<T>(
        &self,
        session_id: Uuid,
        f: impl FnOnce(&mut SessionController) -> T,
    ) -> Option<T> {
        self.lock().get_mut(&session_id).map(f)
    }

    /// Drop a session. Active sessions are abandoned without a result.
    pub fn remove(&self, session_id: Uuid) -> Option<SessionController> {
        let removed = self.lock().remove(&session_id);
        if let Some(session) = &removed {
            if session.is_complete() {
                tracing::debug!("Released completed session {}", session_id);
            } else {
                tracing::info!("Abandoned session {}", session_id);
            }
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionController>> {
        // Controllers are only mutated through complete calls, so a poisoned
        // map is still consistent.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
