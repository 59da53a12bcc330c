pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use conjugation_core::ViewMode;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::catalog::Catalog;
use crate::services::levels::LevelStore;
use crate::services::scoring::Scoreboard;
use crate::services::sessions::SessionStore;

/// Sessions idle for longer than this are dropped.
const SESSION_IDLE_HOURS: i64 = 12;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub levels: Arc<LevelStore>,
    pub sessions: Arc<SessionStore>,
    pub scoreboard: Arc<Mutex<Scoreboard>>,
    pub default_view: ViewMode,
}

impl AppState {
    pub fn new(catalog: Catalog, levels: LevelStore, default_view: ViewMode) -> Self {
        Self {
            catalog: Arc::new(catalog),
            levels: Arc::new(levels),
            sessions: Arc::new(SessionStore::new()),
            scoreboard: Arc::new(Mutex::new(Scoreboard::default())),
            default_view,
        }
    }
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Card routes
        .route("/api/cards", get(routes::cards::list))
        .route("/api/cards/{id}", get(routes::cards::get))
        // Session routes
        .route("/api/sessions", post(routes::sessions::create))
        .route(
            "/api/sessions/{id}",
            get(routes::sessions::get).delete(routes::sessions::delete),
        )
        .route("/api/sessions/{id}/input", post(routes::sessions::input))
        .route("/api/sessions/{id}/toggle", post(routes::sessions::toggle))
        .route("/api/sessions/{id}/direction", post(routes::sessions::direction))
        .route("/api/sessions/{id}/card", post(routes::sessions::replace_card))
        // Score routes
        .route("/api/score", get(routes::score::get))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Loading cards from {}...", config.cards_dir.display());
    let catalog = Catalog::load(&config.cards_dir).await?;

    let state = AppState::new(catalog, LevelStore::pending(), config.default_view);
    state.levels.spawn_load(config.levels_path.clone());
    spawn_session_eviction(Arc::clone(&state.sessions));

    let app = build_router(state);
    let addr = config.addr();

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn spawn_session_eviction(sessions: Arc<SessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(600));
        loop {
            interval.tick().await;
            let cutoff = chrono::Utc::now() - chrono::Duration::hours(SESSION_IDLE_HOURS);
            let removed = sessions.evict_idle(cutoff).await;
            if removed > 0 {
                tracing::info!("Evicted {} idle sessions", removed);
            }
        }
    });
}

async fn health_check() -> &'static str {
    "OK"
}
