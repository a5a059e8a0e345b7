use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::PrimitiveDateTime;
use uuid::Uuid;

time::serde::format_description!(
    meal_timestamp,
    PrimitiveDateTime,
    "[year]-[month]-[day]T[hour]:[minute]:[second]"
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "meal_timestamp")]
    pub date: PrimitiveDateTime,
    pub is_diet: bool,
}

impl Meal {
    /// New meal with a freshly generated id.
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        date: PrimitiveDateTime,
        is_diet: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            name: name.into(),
            description: description.into(),
            date,
            is_diet,
        }
    }

    pub fn apply(&mut self, changes: MealChanges) {
        self.name = changes.name;
        self.description = changes.description;
        self.date = changes.date;
        self.is_diet = changes.is_diet;
    }
}

/// Mutable part of a meal; id and owner never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealChanges {
    pub name: String,
    pub description: String,
    #[serde(with = "meal_timestamp")]
    pub date: PrimitiveDateTime,
    pub is_diet: bool,
}
