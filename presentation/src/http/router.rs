//! Route table

use super::handlers;
use super::state::AppState;
use axum::Router;
use axum::routing::{MethodRouter, get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api/backend";

/// Register `path` both with and without a trailing slash.
fn route_both(
    router: Router<AppState>,
    path: &str,
    method: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method.clone())
        .route(&format!("{}/", path), method)
}

pub fn build_router(state: AppState) -> Router {
    let mut api = Router::new();
    api = route_both(api, "/start-session", post(handlers::start_session));
    api = route_both(api, "/send-command", post(handlers::send_command));
    api = route_both(api, "/transcript/:session_id", get(handlers::transcript));
    api = route_both(api, "/end-session/:session_id", post(handlers::end_session));
    api = route_both(api, "/ask-ai", post(handlers::ask_ai));
    api = route_both(api, "/sessions", get(handlers::list_sessions));
    api = route_both(
        api,
        "/sessions/:session_id",
        get(handlers::get_session).delete(handlers::delete_session),
    );

    Router::new()
        .nest(API_PREFIX, api)
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
