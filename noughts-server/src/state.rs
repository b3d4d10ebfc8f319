//! Server state management
//!
//! In-memory campaign sessions, each with its own random source.

use noughts_core::{Session, SessionConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// A session plus the RNG its opponent draws from
pub struct SessionEntry {
    pub session: Session,
    pub rng: ChaCha8Rng,
}

/// Server-wide shared state
pub struct ServerState {
    sessions: RwLock<HashMap<u64, SessionEntry>>,
    next_id: AtomicU64,
    /// Base seed for session RNGs; `None` seeds from entropy
    seed: Option<u64>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::with_seed(None)
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            seed,
        }
    }

    /// Start a session and return its id
    pub fn create(&self, config: SessionConfig) -> (u64, Session) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(id)),
            None => ChaCha8Rng::from_entropy(),
        };
        let session = Session::new(config);
        let snapshot = session.clone();

        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, SessionEntry { session, rng });

        (id, snapshot)
    }

    /// Run `f` against a session, `None` if the id is unknown
    pub fn with_session<T>(&self, id: u64, f: impl FnOnce(&mut SessionEntry) -> T) -> Option<T> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.get_mut(&id).map(f)
    }

    pub fn remove(&self, id: u64) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let state = ServerState::with_seed(Some(1));
        let (a, _) = state.create(SessionConfig::default());
        let (b, _) = state.create(SessionConfig::default());
        assert_ne!(a, b);
        assert_eq!(state.session_count(), 2);
    }

    #[test]
    fn test_with_session_and_remove() {
        let state = ServerState::new();
        let (id, _) = state.create(SessionConfig::default());
        assert_eq!(state.with_session(id, |e| e.session.level().get()), Some(1));
        assert!(state.remove(id));
        assert!(state.with_session(id, |_| ()).is_none());
        assert!(!state.remove(id));
    }
}
