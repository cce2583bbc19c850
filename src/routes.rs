// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{answers, elements, leaderboard, users},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (users, elements, user-answers, leaderboard).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (repository, cache, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let user_routes = Router::new()
        .route("/login", post(users::login))
        .route("/", get(users::list_users))
        .route("/{user_id}", get(users::get_user));

    let element_routes = Router::new()
        .route("/", post(elements::create_element))
        .route("/{element_id}/right-answer", put(elements::set_right_answer));

    let answer_routes = Router::new().route("/", post(answers::submit_answer));

    let leaderboard_routes = Router::new().route("/", get(leaderboard::get_leaderboard));

    Router::new()
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/elements", element_routes)
        .nest("/api/v1/user-answers", answer_routes)
        .nest("/api/v1/leaderboard", leaderboard_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
