use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use time::{macros::format_description, Date};
use tracing::instrument;

use crate::{auth::AuthUser, error::ApiError, state::AppState};

use super::dto::CreatedMealResponse;
use super::repo_types::{Meal, MealChanges};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
        .route("/days/:date/meals", get(list_meals_by_day))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<MealChanges>,
) -> Result<(StatusCode, HeaderMap, Json<CreatedMealResponse>), ApiError> {
    let meal = Meal::new(user_id, body.name, body.description, body.date, body.is_diet);
    let id = state.meals.create(&meal).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/meals/{id}")) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(CreatedMealResponse { id })))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Meal>>, ApiError> {
    Ok(Json(state.meals.list_by_user(&user_id).await?))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Meal>, ApiError> {
    state
        .meals
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("meal not found".into()))
}

#[instrument(skip(state, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
    Json(body): Json<MealChanges>,
) -> Result<StatusCode, ApiError> {
    state.meals.update(&id, &body).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.meals.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn list_meals_by_day(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<Vec<Meal>>, ApiError> {
    let day = parse_day(&date)?;
    Ok(Json(state.meals.list_by_day(day).await?))
}

fn parse_day(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::BadRequest(format!("invalid date {raw:?}, expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parse_day_accepts_calendar_dates() {
        assert_eq!(parse_day("2024-01-05").unwrap(), date!(2024-01-05));
    }

    #[test]
    fn parse_day_rejects_other_shapes() {
        for raw in ["05/01/2024", "2024-13-01", "2024-01-05T12:30:00", ""] {
            assert!(matches!(parse_day(raw), Err(ApiError::BadRequest(_))), "{raw}");
        }
    }
}
