//! Score endpoint

use axum::{extract::State, Json};

use crate::services::scoring::Scoreboard;
use crate::AppState;

/// GET /api/score
pub async fn get(State(state): State<AppState>) -> Json<Scoreboard> {
    Json(*state.scoreboard.lock().await)
}
