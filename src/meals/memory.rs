use async_trait::async_trait;
use time::Date;
use tokio::sync::RwLock;

use super::error::MealStoreError;
use super::repo::MealRepository;
use super::repo_types::{Meal, MealChanges};

/// Process-local backend, kept in insertion order. Used by tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryMealRepository {
    meals: RwLock<Vec<Meal>>,
}

impl InMemoryMealRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MealRepository for InMemoryMealRepository {
    async fn create(&self, meal: &Meal) -> Result<String, MealStoreError> {
        let mut meals = self.meals.write().await;
        if meals.iter().any(|m| m.id == meal.id) {
            return Err(MealStoreError::DuplicateId(meal.id.clone()));
        }
        meals.push(meal.clone());
        Ok(meal.id.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Meal>, MealStoreError> {
        let meals = self.meals.read().await;
        Ok(meals.iter().find(|m| m.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Meal>, MealStoreError> {
        let meals = self.meals.read().await;
        Ok(meals.iter().filter(|m| m.user_id == user_id).cloned().collect())
    }

    async fn update(&self, id: &str, changes: &MealChanges) -> Result<(), MealStoreError> {
        let mut meals = self.meals.write().await;
        let meal = meals
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(MealStoreError::InvalidMealId)?;
        meal.apply(changes.clone());
        Ok(())
    }

    async fn list_by_day(&self, day: Date) -> Result<Vec<Meal>, MealStoreError> {
        let meals = self.meals.read().await;
        Ok(meals.iter().filter(|m| m.date.date() == day).cloned().collect())
    }

    async fn delete(&self, id: &str) -> Result<(), MealStoreError> {
        let mut meals = self.meals.write().await;
        let before = meals.len();
        meals.retain(|m| m.id != id);
        if meals.len() == before {
            return Err(MealStoreError::NoMealFound);
        }
        Ok(())
    }
}
