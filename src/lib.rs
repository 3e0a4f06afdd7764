pub mod app;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod history;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod streaks;
pub mod ui;
pub mod users;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
