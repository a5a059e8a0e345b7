use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use tracing::{debug, instrument};

use super::error::MealStoreError;
use super::repo_types::{Meal, MealChanges};

/// Storage operations for meals. Handlers depend on this, not on a backend.
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Insert a fully populated meal and return its id.
    async fn create(&self, meal: &Meal) -> Result<String, MealStoreError>;

    /// `Ok(None)` when no meal has this id.
    async fn get_by_id(&self, id: &str) -> Result<Option<Meal>, MealStoreError>;

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Meal>, MealStoreError>;

    /// Fails with `InvalidMealId` when the meal does not exist.
    async fn update(&self, id: &str, changes: &MealChanges) -> Result<(), MealStoreError>;

    /// Meals whose timestamp falls on `day`, any time of day.
    async fn list_by_day(&self, day: Date) -> Result<Vec<Meal>, MealStoreError>;

    /// Fails with `NoMealFound` when nothing was deleted.
    async fn delete(&self, id: &str) -> Result<(), MealStoreError>;
}

#[derive(Clone)]
pub struct PgMealRepository {
    db: PgPool,
}

impl PgMealRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn insert_error(e: sqlx::Error, id: &str) -> MealStoreError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => MealStoreError::DuplicateId(id.to_owned()),
        _ => MealStoreError::Database(e),
    }
}

#[async_trait]
impl MealRepository for PgMealRepository {
    #[instrument(skip(self, meal), fields(meal_id = %meal.id, user_id = %meal.user_id))]
    async fn create(&self, meal: &Meal) -> Result<String, MealStoreError> {
        let id = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO meals (id, user_id, name, description, date, is_diet)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&meal.id)
        .bind(&meal.user_id)
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.date)
        .bind(meal.is_diet)
        .fetch_one(&self.db)
        .await
        .map_err(|e| insert_error(e, &meal.id))?;
        debug!("meal created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<Meal>, MealStoreError> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, date, is_diet
            FROM meals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(meal)
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Meal>, MealStoreError> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, date, is_diet
            FROM meals
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &MealChanges) -> Result<(), MealStoreError> {
        // Row lock keeps a concurrent delete from slipping in between the
        // existence check and the update. Early returns roll back on drop.
        let mut tx = self.db.begin().await?;

        let existing = sqlx::query_scalar::<_, String>(
            r#"
            SELECT id FROM meals WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        if existing.is_none() {
            return Err(MealStoreError::InvalidMealId);
        }

        let result = sqlx::query(
            r#"
            UPDATE meals
               SET name = $1, description = $2, date = $3, is_diet = $4
             WHERE id = $5
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.date)
        .bind(changes.is_diet)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(MealStoreError::NoMealFound);
        }

        tx.commit().await?;
        debug!("meal updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_day(&self, day: Date) -> Result<Vec<Meal>, MealStoreError> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, date, is_diet
            FROM meals
            WHERE date::date = $1
            "#,
        )
        .bind(day)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), MealStoreError> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(MealStoreError::NoMealFound);
        }
        debug!("meal deleted");
        Ok(())
    }
}
