use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use gadget_core::{compute_visible, FilterState, GadgetRecord};

use crate::query::CatalogQuery;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/gadgets", get(get_gadgets))
}

#[derive(Serialize)]
struct GadgetsResponse<'a> {
    count: usize,
    last_updated: &'a str,
    filter: FilterState,
    gadgets: Vec<&'a GadgetRecord>,
}

/// GET /api/gadgets?category=...&min_price=...&max_price=...&favorites_only=...&favorites=...
async fn get_gadgets(State(state): State<AppState>, Query(query): Query<CatalogQuery>) -> Response {
    let filter = match query.filter_state() {
        Ok(filter) => filter,
        Err(e) => {
            tracing::debug!("Rejected catalog query: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };
    let favorites = query.favorite_set();

    let gadgets = compute_visible(&state.dataset.gadgets, &filter, &favorites);
    let response = GadgetsResponse {
        count: gadgets.len(),
        last_updated: &state.dataset.last_updated,
        filter,
        gadgets,
    };
    Json(response).into_response()
}
