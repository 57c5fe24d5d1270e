pub mod app;
pub mod errors;
pub mod grid;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod theme;
pub mod trackers;
pub mod ui;
pub mod window;

pub use app::router;
pub use state::AppState;
pub use storage::{load_store, resolve_data_path};
