//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wrapping an in-memory catalog and level table
//! - Helpers for opening sessions
//!
//! The tests need no external services.

#![allow(dead_code)]

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use conjugation_core::ViewMode;
use verb_trainer_backend::services::catalog::Catalog;
use verb_trainer_backend::services::levels::LevelStore;
use verb_trainer_backend::{build_router, AppState};

/// Test context holding the application state and router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a context with the sample cards and a loaded level table.
    pub fn new() -> Self {
        Self::with_levels(LevelStore::ready(fixtures::sample_levels()))
    }

    /// Create a context whose level table has not arrived.
    pub fn without_levels() -> Self {
        Self::with_levels(LevelStore::pending())
    }

    pub fn with_levels(levels: LevelStore) -> Self {
        let catalog = Catalog::from_examples(fixtures::sample_cards());
        Self::with_catalog(catalog, levels)
    }

    pub fn with_catalog(catalog: Catalog, levels: LevelStore) -> Self {
        let state = AppState::new(catalog, levels, ViewMode::default());
        let app = build_router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Open a session on `card_id` and return its id.
    pub async fn open_session(server: &TestServer, card_id: &str) -> Uuid {
        let response = server
            .post("/api/sessions")
            .json(&fixtures::create_session_request(card_id))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["session_id"].as_str().unwrap().parse().unwrap()
    }
}
