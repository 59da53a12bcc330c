//! Tense → level table, loaded in the background.
//!
//! Requests never wait on the table: until it arrives every card simply has
//! no level label.

use std::path::PathBuf;
use std::sync::Arc;

use conjugation_core::{LanguageLevel, LevelLookupError, LevelTable};
use tokio::sync::RwLock;

/// Snapshot of a finished lookup.
pub type LevelOutcome = Result<Arc<LevelTable>, Arc<LevelLookupError>>;

#[derive(Debug)]
enum LevelState {
    Pending,
    Done(LevelOutcome),
}

/// Shared handle to the level table.
#[derive(Debug)]
pub struct LevelStore {
    state: RwLock<LevelState>,
}

impl LevelStore {
    /// A store whose table has not arrived yet.
    pub fn pending() -> Self {
        Self {
            state: RwLock::new(LevelState::Pending),
        }
    }

    pub fn ready(table: LevelTable) -> Self {
        Self {
            state: RwLock::new(LevelState::Done(Ok(Arc::new(table)))),
        }
    }

    /// Spawn the load of `path`. With no path the store fails immediately,
    /// which only means no labels.
    pub fn spawn_load(self: &Arc<Self>, path: Option<PathBuf>) {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let result = match path {
                Some(path) => match tokio::fs::read_to_string(&path).await {
                    Ok(json) => LevelTable::from_json(&json),
                    Err(err) => Err(LevelLookupError::Unavailable(format!(
                        "{}: {}",
                        path.display(),
                        err
                    ))),
                },
                None => Err(LevelLookupError::Unavailable(
                    "LEVELS_PATH not set".to_string(),
                )),
            };
            store.resolve(result).await;
        });
    }

    pub async fn resolve(&self, result: Result<LevelTable, LevelLookupError>) {
        let next = match result {
            Ok(table) => {
                tracing::info!("Loaded {} tense levels", table.len());
                LevelState::Done(Ok(Arc::new(table)))
            }
            Err(err) => {
                tracing::warn!(%err, "level table unavailable");
                LevelState::Done(Err(Arc::new(err)))
            }
        };
        *self.state.write().await = next;
    }

    /// Outcome of the lookup so far, or `None` while it is still running.
    pub async fn outcome(&self) -> Option<LevelOutcome> {
        match &*self.state.read().await {
            LevelState::Pending => None,
            LevelState::Done(outcome) => Some(outcome.clone()),
        }
    }

    pub async fn level_for(&self, tense: &str) -> Option<LanguageLevel> {
        match self.outcome().await? {
            Ok(table) => table.level_for(tense),
            Err(_) => None,
        }
    }
}
