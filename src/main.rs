mod config;
mod models;
mod puzzle;
mod render;
mod routes;
mod utils;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use axum::Router;
use chrono::NaiveDate;
use config::Config;
use dashmap::DashMap;
use models::GeneratedPuzzle;
use render::{FontCatalog, PuzzleStyle, RenderSettings, Renderer};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// How often expired puzzles are swept from memory
pub const PUZZLE_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// A generated puzzle kept around so its images can be downloaded
#[derive(Debug, Clone)]
pub struct StoredPuzzle {
    pub puzzle: GeneratedPuzzle,
    pub style: PuzzleStyle,
    /// True when the caller gave no words and the default list was used
    pub used_default_words: bool,
    /// Date printed in the image titles
    pub created_on: NaiveDate,
    pub created_at: Instant,
}

impl StoredPuzzle {
    pub fn new(puzzle: GeneratedPuzzle, style: PuzzleStyle, used_default_words: bool) -> Self {
        Self {
            puzzle,
            style,
            used_default_words,
            created_on: chrono::Local::now().date_naive(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.created_at) > ttl
    }
}

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub renderer: Renderer,
    pub puzzles: DashMap<Uuid, StoredPuzzle>,
}

impl AppState {
    pub fn new(config: Config, renderer: Renderer) -> Self {
        Self {
            config,
            renderer,
            puzzles: DashMap::new(),
        }
    }

    pub fn puzzle_ttl(&self) -> Duration {
        Duration::from_secs(self.config.puzzles.ttl_secs)
    }

    /// Copy of a stored puzzle, or `None` if it is unknown or past its lifetime
    pub fn live_puzzle(&self, id: &Uuid) -> Option<StoredPuzzle> {
        self.live_puzzle_at(id, Instant::now())
    }

    fn live_puzzle_at(&self, id: &Uuid, now: Instant) -> Option<StoredPuzzle> {
        let stored = self.puzzles.get(id)?;
        if stored.is_expired(now, self.puzzle_ttl()) {
            return None;
        }
        Some(stored.value().clone())
    }

    /// Drop every puzzle older than the configured lifetime, returning how many went
    pub fn remove_expired_puzzles(&self, now: Instant) -> usize {
        let ttl = self.puzzle_ttl();
        let before = self.puzzles.len();
        self.puzzles.retain(|_, stored| !stored.is_expired(now, ttl));
        before - self.puzzles.len()
    }
}

/// Router with API routes, optional static front end, CORS and request tracing
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new().merge(routes::create_routes());

    if let Some(dir) = &state.config.server.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_search_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word search server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load fonts
    let fonts = FontCatalog::load(
        &config.render.font_dir,
        &config.render.fonts,
        &config.render.default_font,
    )
    .await;
    if fonts.is_empty() {
        tracing::warn!(
            "No fonts loaded from {}. Image downloads are disabled until fonts are installed",
            config.render.font_dir
        );
    } else if !fonts.contains(&config.render.default_font) {
        tracing::warn!(
            "Default font '{}' is not available, falling back to '{}'",
            config.render.default_font,
            fonts.names()[0]
        );
    }

    let settings = RenderSettings {
        font_size: config.render.font_size,
        ..RenderSettings::default()
    };
    let renderer = Renderer::new(fonts, settings);

    let state = Arc::new(AppState::new(config.clone(), renderer));

    // Spawn background task to clean up expired puzzles
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        puzzle_cleanup_task(cleanup_state).await;
    });

    let app = build_router(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Puzzle API: http://{}/api/puzzles", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task that periodically drops puzzles past their lifetime
async fn puzzle_cleanup_task(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(PUZZLE_SWEEP_INTERVAL);

    loop {
        interval.tick().await;

        let removed = state.remove_expired_puzzles(Instant::now());
        if removed > 0 {
            tracing::info!("Removed {} expired puzzles", removed);
        }
    }
}
