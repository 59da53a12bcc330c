//! Card catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/cards
pub async fn list(State(state): State<AppState>) -> Result<Json<CardListResponse>> {
    let mut cards = Vec::with_capacity(state.catalog.len());
    for (id, example) in state.catalog.iter() {
        let level = state.levels.level_for(&example.turkish_verb.verb_tense).await;
        cards.push(CardSummary::new(id, example, level));
    }
    Ok(Json(CardListResponse { cards }))
}

/// GET /api/cards/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CardResponse>> {
    let example = state
        .catalog
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Card {}", id)))?;
    let level = state.levels.level_for(&example.turkish_verb.verb_tense).await;

    Ok(Json(CardResponse {
        id,
        example: example.clone(),
        level,
    }))
}
