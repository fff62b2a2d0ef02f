//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::history::{FileStore, HistoryStore};
use crate::places::Suggestions;
use crate::session::Session;

/// Shared application state.
///
/// The session and history sit behind mutexes so each user action is
/// atomic: mutate, then derive, with no interleaving observer.
#[derive(Clone)]
pub struct AppState {
    /// The live planning session
    pub session: Arc<Mutex<Session>>,

    /// Saved-trip history, file-backed
    pub history: Arc<Mutex<HistoryStore<FileStore>>>,

    /// Debounced place-name suggestions
    pub suggestions: Arc<Suggestions>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        session: Session,
        history: HistoryStore<FileStore>,
        suggestions: Suggestions,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            history: Arc::new(Mutex::new(history)),
            suggestions: Arc::new(suggestions),
        }
    }
}
