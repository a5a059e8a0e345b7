mod dto;
mod error;
pub mod handlers;
mod memory;
mod repo;
mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use dto::CreatedMealResponse;
pub use error::MealStoreError;
pub use memory::InMemoryMealRepository;
pub use repo::{MealRepository, PgMealRepository};
pub use repo_types::{Meal, MealChanges};

pub fn router() -> Router<AppState> {
    handlers::meal_routes()
}
