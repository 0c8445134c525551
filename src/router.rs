use std::sync::Arc;

use api::routers::api;
use axum::Router;
use tower_http::trace::TraceLayer;
use web::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api(&state).with_state(state))
        .layer(TraceLayer::new_for_http())
}
