//! API request and response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from conjugation-core
pub use conjugation_core::{
    CardView, Direction, LanguageLevel, Polarity, ProgressFlag, SourceLanguage, TrainingExample,
    ViewMode,
};

// === Card Types ===

/// Catalog entry as listed by `GET /api/cards`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardSummary {
    pub id: String,
    pub verb_infinitive: String,
    pub verb_english: String,
    pub verb_tense: String,
    pub personal_pronoun: Option<String>,
    pub polarity: Polarity,
    pub level: Option<LanguageLevel>,
}

impl CardSummary {
    pub fn new(id: &str, example: &TrainingExample, level: Option<LanguageLevel>) -> Self {
        let verb = &example.turkish_verb;
        Self {
            id: id.to_string(),
            verb_infinitive: example.verb_infinitive.clone(),
            verb_english: example.verb_english.clone(),
            verb_tense: verb.verb_tense.clone(),
            personal_pronoun: verb.personal_pronoun.clone(),
            polarity: verb.polarity,
            level: level.or(example.language_level),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<CardSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardResponse {
    pub id: String,
    pub example: TrainingExample,
    pub level: Option<LanguageLevel>,
}

// === Session Types ===

/// Open a session on one card
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateSessionRequest {
    pub card_id: String,
    pub direction: Option<Direction>,
    pub source_language: Option<SourceLanguage>,
}

/// The learner edited the field. `caret` is a character offset and
/// defaults to the end of the text.
#[derive(Debug, Deserialize, Serialize)]
pub struct InputRequest {
    pub text: String,
    pub caret: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ToggleRequest {
    pub flag: ProgressFlag,
    pub checked: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DirectionRequest {
    pub direction: Direction,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReplaceCardRequest {
    pub card_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub card_id: String,
    pub view: CardView,
}
