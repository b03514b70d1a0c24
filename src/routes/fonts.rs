use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct FontListResponse {
    /// Loaded fonts, alphabetical
    pub fonts: Vec<String>,
    pub default: String,
}

/// List the fonts a puzzle can be rendered with
pub async fn list_fonts(State(state): State<Arc<AppState>>) -> Json<FontListResponse> {
    let catalog = state.renderer.fonts();
    Json(FontListResponse {
        fonts: catalog.names().into_iter().map(String::from).collect(),
        default: catalog.default_name().to_string(),
    })
}
