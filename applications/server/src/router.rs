/// Router assembly
///
/// The single canonical route table, shared by the binary and the test
/// suite so the two can never drift apart.
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub fn create_router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);

    // Public routes (no auth required)
    let public_routes = Router::new().route("/health", get(api::health::health));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/all", get(api::playlists::list_playlists))
        .route("/", post(api::playlists::create_playlist))
        .route("/add_songs", put(api::playlists::add_songs))
        .route("/delete_songs", put(api::playlists::delete_songs))
        .route("/rename", put(api::playlists::rename_playlist))
        .route("/:playlist_id", get(api::playlists::get_playlist))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::auth_middleware,
        ));

    // The nested "/" route only answers at the bare prefix; nest does
    // no trailing-slash redirect, so the slash form of create is
    // registered explicitly.
    let create_slash_route = Router::new()
        .route("/api/v1/playlist/", post(api::playlists::create_playlist))
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api/v1/playlist", public_routes.merge(protected_routes))
        .merge(create_slash_route)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
