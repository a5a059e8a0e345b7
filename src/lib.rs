pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod meals;
pub mod state;

pub use config::AppConfig;
pub use error::{ApiError, StartupError};
pub use state::{bootstrap, AppState, Bootstrap};
