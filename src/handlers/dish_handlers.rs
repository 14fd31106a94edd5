use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::{AppState, JsonBody, PathParam};
use crate::{
    data_types::{Canteen, Dish, DishPayload, DishResponse},
    errors::{CatalogError, CatalogResult},
};

fn to_responses(dishes: Vec<Dish>) -> Json<Vec<DishResponse>> {
    Json(dishes.into_iter().map(DishResponse::from).collect())
}

pub async fn list_dishes(State(state): State<AppState>) -> CatalogResult<Json<Vec<DishResponse>>> {
    Ok(to_responses(state.dishes.find_all()?))
}

pub async fn get_dish(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> CatalogResult<Json<DishResponse>> {
    state
        .dishes
        .find_by_id(id)?
        .map(|dish| Json(dish.into()))
        .ok_or(CatalogError::NotFound)
}

/// Empty list for a canteen without dishes, or one that does not exist.
pub async fn list_dishes_by_canteen(
    State(state): State<AppState>,
    PathParam(canteen_id): PathParam<i64>,
) -> CatalogResult<Json<Vec<DishResponse>>> {
    Ok(to_responses(state.dishes.find_by_canteen_id(canteen_id)?))
}

pub async fn list_dishes_by_category(
    State(state): State<AppState>,
    PathParam(category): PathParam<String>,
) -> CatalogResult<Json<Vec<DishResponse>>> {
    Ok(to_responses(state.dishes.find_by_category(&category)?))
}

pub async fn list_dishes_by_min_rating(
    State(state): State<AppState>,
    PathParam(min_rating): PathParam<i32>,
) -> CatalogResult<Json<Vec<DishResponse>>> {
    Ok(to_responses(state.dishes.find_by_rating_at_least(min_rating)?))
}

/// Missing price and rating are defaulted rather than rejected; only the
/// name and the canteen reference are hard requirements.
pub async fn create_dish(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DishPayload>,
) -> CatalogResult<(StatusCode, Json<DishResponse>)> {
    log::debug!("Received dish: {:?}", payload);

    let (canteen_id, dish) = payload.validate_for_create()?;

    // only the summary is loaded, the canteen row is never written back
    let mut canteen: Canteen = state
        .canteens
        .find_summary(canteen_id)?
        .ok_or(CatalogError::DependencyNotFound(canteen_id))?
        .into();

    canteen.add_dish(dish);
    let mut dish = canteen
        .dishes
        .pop()
        .ok_or_else(|| CatalogError::Internal("attached dish went missing".to_string()))?;

    state.dishes.save(&mut dish)?;
    log::debug!("Saved dish {:?} for canteen {}", dish.id, canteen_id);

    Ok((StatusCode::CREATED, Json(dish.into())))
}

// Deliberately lax: no required-field checks and no canteen re-check, see DishPayload::apply_to.
pub async fn update_dish(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(payload): JsonBody<DishPayload>,
) -> CatalogResult<Json<DishResponse>> {
    let mut dish = state.dishes.find_by_id(id)?.ok_or(CatalogError::NotFound)?;

    payload.apply_to(&mut dish);
    state.dishes.save(&mut dish)?;
    log::debug!("Updated dish {}", id);

    Ok(Json(dish.into()))
}

pub async fn delete_dish(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> CatalogResult<StatusCode> {
    if !state.dishes.exists_by_id(id)? {
        return Err(CatalogError::NotFound);
    }

    state.dishes.delete_by_id(id)?;
    log::debug!("Deleted dish {}", id);

    Ok(StatusCode::OK)
}
