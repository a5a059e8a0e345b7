use thiserror::Error;

#[derive(Debug, Error)]
pub enum MealStoreError {
    #[error("invalid meal id")]
    InvalidMealId,
    #[error("no meal found with the given id")]
    NoMealFound,
    #[error("meal id already exists: {0}")]
    DuplicateId(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
