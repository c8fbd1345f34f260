use axum::{
    Router,
    routing::{get, post},
};

pub mod sessions;
pub mod statements;
pub mod system;
pub mod users;

/// Endpoints reachable without a session.
pub fn public_router() -> Router {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/sessions", post(sessions::create_session))
}

/// Endpoints that require a valid bearer token (user-scoped).
pub fn protected_router() -> Router {
    Router::new()
        .route("/profile", get(users::show_profile))
        .nest("/statements", statements::router())
}
