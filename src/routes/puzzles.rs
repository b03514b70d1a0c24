use crate::{
    models::{Grid, WordCoordinates},
    puzzle::{PuzzleGenerator, WordList},
    render::{ColorScheme, PuzzleStyle, RenderError},
    AppState, StoredPuzzle,
};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct CreatePuzzleRequest {
    /// Words to hide, in placement order
    #[serde(default)]
    pub words: Option<Vec<String>>,
    /// Comma separated words, appended after `words`
    #[serde(default)]
    pub text: Option<String>,
    /// Fixes the layout so the same request yields the same grid
    pub seed: Option<u64>,
    pub background: Option<String>,
    pub text_color: Option<String>,
    pub font: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PuzzleResponse {
    pub id: Uuid,
    pub size: usize,
    pub grid: Grid,
    /// Start and end cell of every placed word
    pub words: WordCoordinates,
    /// Words that did not fit
    pub omitted: Vec<String>,
    pub used_default_words: bool,
    pub created_on: NaiveDate,
}

impl PuzzleResponse {
    fn new(id: Uuid, stored: &StoredPuzzle) -> Self {
        Self {
            id,
            size: stored.puzzle.size(),
            grid: stored.puzzle.grid.clone(),
            words: stored.puzzle.coordinates.clone(),
            omitted: stored.puzzle.omitted.clone(),
            used_default_words: stored.used_default_words,
            created_on: stored.created_on,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ImageKind {
    Puzzle,
    Solution,
}

impl ImageKind {
    fn file_name(self) -> &'static str {
        match self {
            ImageKind::Puzzle => "word_search.png",
            ImageKind::Solution => "word_search_solution.png",
        }
    }
}

/// Generate a new puzzle and keep it for later downloads
pub async fn create_puzzle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePuzzleRequest>,
) -> Result<(StatusCode, Json<PuzzleResponse>), StatusCode> {
    let word_list = WordList::from_input(payload.words, payload.text.as_deref());
    word_list
        .validate(
            state.config.puzzles.max_words,
            state.config.puzzles.max_word_length,
        )
        .map_err(|e| {
            tracing::warn!("Rejected word list: {}", e);
            StatusCode::BAD_REQUEST
        })?;

    let colors = ColorScheme::from_hex(payload.background.as_deref(), payload.text_color.as_deref())
        .map_err(|e| {
            tracing::warn!("Rejected color scheme: {}", e);
            StatusCode::BAD_REQUEST
        })?;

    let words = word_list.words().to_vec();
    let seed = payload.seed;
    let puzzle = tokio::task::spawn_blocking(move || match seed {
        Some(seed) => PuzzleGenerator::generate_seeded(&words, seed),
        None => PuzzleGenerator::generate(&words),
    })
    .await
    .map_err(|e| {
        tracing::error!("Puzzle generation task failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map_err(|e| {
        tracing::error!("Failed to generate puzzle: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if !puzzle.omitted.is_empty() {
        tracing::info!(
            "Placed {} of {} words, omitted: {:?}",
            puzzle.coordinates.len(),
            word_list.len(),
            puzzle.omitted
        );
    }

    let id = Uuid::new_v4();
    let style = PuzzleStyle {
        colors,
        font: payload.font,
    };
    let stored = StoredPuzzle::new(puzzle, style, word_list.used_default());
    let response = PuzzleResponse::new(id, &stored);
    state.puzzles.insert(id, stored);

    tracing::info!("Created {}x{} puzzle {}", response.size, response.size, id);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Fetch a stored puzzle's grid and word coordinates
pub async fn get_puzzle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PuzzleResponse>, StatusCode> {
    let stored = state.live_puzzle(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(PuzzleResponse::new(id, &stored)))
}

/// Download the puzzle image
pub async fn puzzle_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, StatusCode> {
    render_png(state, id, ImageKind::Puzzle).await
}

/// Download the solution image with every word highlighted
pub async fn solution_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, StatusCode> {
    render_png(state, id, ImageKind::Solution).await
}

async fn render_png(
    state: Arc<AppState>,
    id: Uuid,
    kind: ImageKind,
) -> Result<Response, StatusCode> {
    let stored = state.live_puzzle(&id).ok_or(StatusCode::NOT_FOUND)?;

    let render_state = state.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        let renderer = &render_state.renderer;
        match kind {
            ImageKind::Puzzle => renderer.puzzle_png(&stored.puzzle, &stored.style, stored.created_on),
            ImageKind::Solution => {
                renderer.solution_png(&stored.puzzle, &stored.style, stored.created_on)
            }
        }
    })
    .await
    .map_err(|e| {
        tracing::error!("Render task failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .map_err(|e| match e {
        RenderError::NoFonts => {
            tracing::warn!("Cannot render puzzle {}: {}", id, e);
            StatusCode::SERVICE_UNAVAILABLE
        }
        RenderError::Encode(_) => {
            tracing::error!("Failed to render puzzle {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    })?;

    let disposition = format!("attachment; filename=\"{}\"", kind.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build_router,
        test_support::{state_with, test_config, test_state},
    };
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/puzzles")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_puzzle_places_words() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(json!({ "text": "cat, dog", "seed": 7 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["size"], 10);
        assert_eq!(body["grid"].as_array().unwrap().len(), 10);
        assert_eq!(body["used_default_words"], false);

        let words = body["words"].as_array().unwrap();
        assert_eq!(words.len(), 2, "Both words should fit in an empty 10x10 grid");
        assert_eq!(words[0]["word"], "cat");
        assert!(words[0]["start"]["row"].is_u64());
        assert!(body["omitted"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_puzzle_defaults_when_empty() {
        let app = build_router(test_state());
        let response = app.oneshot(post_json(json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["used_default_words"], true);
        assert_eq!(body["size"], 10);
    }

    #[tokio::test]
    async fn test_create_puzzle_rejects_long_word() {
        let app = build_router(test_state());
        let word = "a".repeat(31);
        let response = app
            .oneshot(post_json(json!({ "words": [word] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_puzzle_rejects_bad_color() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(json!({ "words": ["owl"], "background": "#xyz123" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_puzzle_rejects_non_letters() {
        let app = build_router(test_state());
        let response = app
            .oneshot(post_json(json!({ "text": "ice cream, soda" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_expired_puzzle_is_not_found() {
        let mut config = test_config();
        config.puzzles.ttl_secs = 0;
        let state = state_with(config);
        let app = build_router(state.clone());
        let created = app
            .clone()
            .oneshot(post_json(json!({ "words": ["comet"] })))
            .await
            .unwrap();
        let id = body_json(created).await["id"].as_str().unwrap().to_string();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        for suffix in ["", "/image", "/solution"] {
            let response = app
                .clone()
                .oneshot(get(&format!("/api/puzzles/{}{}", id, suffix)))
                .await
                .unwrap();
            assert_eq!(
                response.status(),
                StatusCode::NOT_FOUND,
                "Expired puzzle should be gone at '{}'",
                suffix
            );
        }
        assert_eq!(state.puzzles.len(), 1, "The sweep has not run yet");
    }

    #[tokio::test]
    async fn test_get_puzzle_round_trip() {
        let state = test_state();
        let app = build_router(state.clone());
        let created = app
            .clone()
            .oneshot(post_json(json!({ "words": ["Rust", "Tokio"], "seed": 3 })))
            .await
            .unwrap();
        let created = body_json(created).await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(get(&format!("/api/puzzles/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["grid"], created["grid"]);
        assert_eq!(fetched["words"], created["words"]);
        assert_eq!(state.puzzles.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_puzzle_is_not_found() {
        let app = build_router(test_state());
        let response = app
            .oneshot(get(&format!("/api/puzzles/{}", Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_image_without_fonts_is_unavailable() {
        let state = test_state();
        let app = build_router(state.clone());
        let created = app
            .clone()
            .oneshot(post_json(json!({ "words": ["moon"] })))
            .await
            .unwrap();
        let id = body_json(created).await["id"].as_str().unwrap().to_string();

        for suffix in ["image", "solution"] {
            let response = app
                .clone()
                .oneshot(get(&format!("/api/puzzles/{}/{}", id, suffix)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        }
    }
}
