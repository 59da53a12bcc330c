//! Tense → CEFR level lookup.
//!
//! The table is supplied by a data-loading collaborator and may arrive late or
//! not at all; callers treat a missing level as "no label", never as a failure.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LevelLookupError;

/// CEFR language level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LanguageLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl LanguageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }
}

/// Mapping from tense identifier (e.g. `şimdiki_zaman`) to level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: HashMap<String, LanguageLevel>,
}

impl LevelTable {
    /// Parse a JSON object of `{ "<tense>": "<level>" }`.
    pub fn from_json(json: &str) -> Result<Self, LevelLookupError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, tense: impl Into<String>, level: LanguageLevel) {
        self.levels.insert(tense.into(), level);
    }

    pub fn level_for(&self, tense: &str) -> Option<LanguageLevel> {
        self.levels.get(tense).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl FromIterator<(String, LanguageLevel)> for LevelTable {
    fn from_iter<I: IntoIterator<Item = (String, LanguageLevel)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}
