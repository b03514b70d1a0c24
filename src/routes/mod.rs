pub mod fonts;
pub mod health;
pub mod puzzles;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/fonts", get(fonts::list_fonts))
        .route("/puzzles", axum::routing::post(puzzles::create_puzzle))
        .route("/puzzles/{id}", get(puzzles::get_puzzle))
        .route("/puzzles/{id}/image", get(puzzles::puzzle_image))
        .route("/puzzles/{id}/solution", get(puzzles::solution_image))
}
