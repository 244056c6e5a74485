pub mod api;
pub mod data;
pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(pages::routes())
        .merge(data::routes())
        .merge(api::routes())
        .merge(health::routes())
        .with_state(state)
}
