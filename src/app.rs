use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/users", post(handlers::create_user))
        .route(
            "/api/users/:username/activities",
            get(handlers::list_activities).post(handlers::add_activity),
        )
        .route(
            "/api/users/:username/activities/:id",
            put(handlers::update_activity).delete(handlers::delete_activity),
        )
        .route("/api/users/:username/history", get(handlers::get_history))
        .route("/api/users/:username/stats", get(handlers::get_stats))
        .route("/api/users/:username/social", get(handlers::get_social))
        .route(
            "/api/users/:username/follows/:target",
            post(handlers::follow).delete(handlers::unfollow),
        )
        .with_state(state)
}
