use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::state::AppState;

/// Fixed relative path of the dataset document.
pub const DATASET_PATH: &str = "/data/gadgets.json";

pub fn routes() -> Router<AppState> {
    Router::new().route(DATASET_PATH, get(get_dataset))
}

/// GET /data/gadgets.json - The dataset document loaded at startup.
async fn get_dataset(State(state): State<AppState>) -> Response {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Json(state.dataset.as_ref()),
    )
        .into_response()
}
