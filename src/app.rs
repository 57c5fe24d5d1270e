use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/trackers",
            get(handlers::list_trackers).post(handlers::add_tracker),
        )
        .route("/api/trackers/:id", delete(handlers::delete_tracker))
        .route("/api/trackers/:id/rename", post(handlers::rename_tracker))
        .route("/api/trackers/:id/window", get(handlers::get_window))
        .route("/api/trackers/:id/checkin", post(handlers::checkin))
        .route("/api/trackers/:id/theme", post(handlers::set_theme))
        .with_state(state)
}
