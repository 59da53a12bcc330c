//! Card session endpoints
//!
//! Every mutating call runs one frame after the change, so the returned view
//! carries the caret as restored on the rendered surface.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use conjugation_core::{CardSession, ProgressReport, ProgressSink};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::sessions::SessionEntry;
use crate::AppState;

/// POST /api/sessions
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<SessionResponse>> {
    let example = find_card(&state, &payload.card_id)?;
    let view_mode = ViewMode {
        direction: payload.direction.unwrap_or(state.default_view.direction),
        source_language: payload
            .source_language
            .unwrap_or(state.default_view.source_language),
    };

    let mut entry = SessionEntry::new(payload.card_id.clone(), CardSession::new(example, view_mode));
    entry.apply_levels(state.levels.outcome().await.as_ref());
    entry.frame();
    let view = entry.session.view();

    let session_id = state.sessions.insert(entry).await;
    tracing::info!("Opened session {} on card {}", session_id, payload.card_id);

    Ok(Json(SessionResponse {
        session_id,
        card_id: payload.card_id,
        view,
    }))
}

/// GET /api/sessions/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    update(&state, session_id, |_, _| Ok(())).await.map(Json)
}

/// POST /api/sessions/{id}/input
pub async fn input(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<InputRequest>,
) -> Result<Json<SessionResponse>> {
    let len = payload.text.chars().count();
    let caret = payload.caret.unwrap_or(len);
    if caret > len {
        return Err(ApiError::BadRequest(format!(
            "caret {} past end of text ({} chars)",
            caret, len
        )));
    }

    update(&state, session_id, |entry, sink| {
        entry.surface.edit(&payload.text, caret);
        entry.session.input(&payload.text, caret, sink);
        Ok(())
    })
    .await
    .map(Json)
}

/// POST /api/sessions/{id}/toggle
pub async fn toggle(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<SessionResponse>> {
    update(&state, session_id, |entry, sink| {
        entry.session.toggle(payload.flag, payload.checked, sink);
        Ok(())
    })
    .await
    .map(Json)
}

/// POST /api/sessions/{id}/direction
pub async fn direction(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<DirectionRequest>,
) -> Result<Json<SessionResponse>> {
    update(&state, session_id, |entry, sink| {
        entry.session.set_direction(payload.direction, sink);
        Ok(())
    })
    .await
    .map(Json)
}

/// POST /api/sessions/{id}/card
pub async fn replace_card(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<ReplaceCardRequest>,
) -> Result<Json<SessionResponse>> {
    let example = find_card(&state, &payload.card_id)?;

    update(&state, session_id, move |entry, sink| {
        entry.replace_card(payload.card_id);
        entry.session.replace_example(example, sink);
        Ok(())
    })
    .await
    .map(Json)
}

/// DELETE /api/sessions/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode> {
    if state.sessions.remove(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(session_id))
    }
}

fn find_card(state: &AppState, card_id: &str) -> Result<TrainingExample> {
    state
        .catalog
        .get(card_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Card {}", card_id)))
}

fn session_not_found(session_id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session {}", session_id))
}

/// Apply `change` to a session, run a frame and return the resulting view.
/// Progress reports are collected under the session lock, reduced to the one
/// that scores the card, and handed to the scoreboard afterwards.
async fn update<F>(state: &AppState, session_id: Uuid, change: F) -> Result<SessionResponse>
where
    F: FnOnce(&mut SessionEntry, &mut dyn ProgressSink) -> Result<()>,
{
    let levels = state.levels.outcome().await;
    let mut reports: Vec<ProgressReport> = Vec::new();

    let response = state
        .sessions
        .with_session(session_id, |entry| {
            change(entry, &mut reports)?;
            entry.settle(&mut reports);
            entry.apply_levels(levels.as_ref());
            entry.frame();
            Ok(SessionResponse {
                session_id,
                card_id: entry.card_id.clone(),
                view: entry.session.view(),
            })
        })
        .await
        .ok_or_else(|| session_not_found(session_id))??;

    if !reports.is_empty() {
        let mut scoreboard = state.scoreboard.lock().await;
        for report in reports {
            scoreboard.report(report);
        }
    }

    Ok(response)
}
