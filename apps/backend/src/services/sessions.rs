//! In-memory card sessions.
//!
//! Each session pairs a `CardSession` with the headless editor surface it
//! renders into, so caret restoration runs exactly as it would in a view.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use conjugation_core::{CardSession, ProgressReport, TextNodes};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::levels::LevelOutcome;
use super::scoring::CardOutcome;

/// One open card.
#[derive(Debug)]
pub struct SessionEntry {
    pub session: CardSession,
    pub surface: TextNodes,
    pub card_id: String,
    pub last_seen: DateTime<Utc>,
    levels_applied: bool,
    outcome: CardOutcome,
}

impl SessionEntry {
    pub fn new(card_id: String, session: CardSession) -> Self {
        Self {
            session,
            surface: TextNodes::new(),
            card_id,
            last_seen: Utc::now(),
            levels_applied: false,
            outcome: CardOutcome::Open,
        }
    }

    /// Keep only the reports that score the current card.
    pub fn settle(&mut self, reports: &mut Vec<ProgressReport>) {
        reports.retain(|report| self.outcome.settle(report));
    }

    /// Hand the level lookup outcome to the session once it is known.
    pub fn apply_levels(&mut self, outcome: Option<&LevelOutcome>) {
        if self.levels_applied {
            return;
        }
        if let Some(outcome) = outcome {
            self.session
                .apply_levels(outcome.as_ref().map(|t| &**t).map_err(|e| &**e));
            self.levels_applied = true;
        }
    }

    /// The card changed; its level has to be looked up again.
    pub fn replace_card(&mut self, card_id: String) {
        self.card_id = card_id;
        self.levels_applied = false;
        self.outcome = CardOutcome::Open;
    }

    /// Flush the pending render into the surface.
    pub fn frame(&mut self) -> bool {
        self.last_seen = Utc::now();
        self.session.frame(&mut self.surface)
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, entry: SessionEntry) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.lock().await.insert(id, entry);
        id
    }

    /// Run `f` on a session while holding the store lock.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionEntry) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.lock().await;
        sessions.get_mut(&id).map(f)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.lock().await.remove(&id).is_some()
    }

    /// Drop sessions untouched since `cutoff`. Returns how many were removed.
    pub async fn evict_idle(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen >= cutoff);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
