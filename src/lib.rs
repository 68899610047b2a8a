pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod summary;
pub mod ui;
pub mod state;
pub mod validation;

pub use app::router;
pub use config::AppConfig;
pub use ledger::CalorieTracker;
pub use state::AppState;
pub use storage::{JsonFileStore, MemoryStore, Store};
