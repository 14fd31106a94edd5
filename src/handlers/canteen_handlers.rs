use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{AppState, JsonBody, PathParam, QueryParam};
use crate::{
    constants::CANTEEN_NAME_TAKEN,
    data_types::{CanteenPayload, CanteenResponse},
    errors::{CatalogError, CatalogResult},
};

#[derive(Deserialize, Debug)]
pub struct NameQuery {
    pub name: Option<String>,
}

pub async fn list_canteens(State(state): State<AppState>) -> CatalogResult<Json<Vec<CanteenResponse>>> {
    let canteens = state.canteens.find_all()?;
    Ok(Json(canteens.into_iter().map(CanteenResponse::from).collect()))
}

pub async fn get_canteen(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> CatalogResult<Json<CanteenResponse>> {
    state
        .canteens
        .find_by_id(id)?
        .map(|canteen| Json(canteen.into()))
        .ok_or(CatalogError::NotFound)
}

pub async fn search_canteens(
    State(state): State<AppState>,
    QueryParam(query): QueryParam<NameQuery>,
) -> CatalogResult<Json<Vec<CanteenResponse>>> {
    let name = query
        .name
        .ok_or_else(|| CatalogError::Validation("Query parameter 'name' is required".to_string()))?;

    let canteens = state.canteens.find_by_name_containing(&name)?;
    Ok(Json(canteens.into_iter().map(CanteenResponse::from).collect()))
}

pub async fn create_canteen(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CanteenPayload>,
) -> CatalogResult<(StatusCode, Json<CanteenResponse>)> {
    let mut canteen = payload.validate()?;

    if state.canteens.exists_by_name(&canteen.name)? {
        return Err(CatalogError::Conflict(CANTEEN_NAME_TAKEN.to_string()));
    }

    state.canteens.save(&mut canteen)?;
    log::debug!("Created canteen {:?} '{}'", canteen.id, canteen.name);

    Ok((StatusCode::CREATED, Json(canteen.into())))
}

/// Overwrites name, location and description. The dish list is not touched.
pub async fn update_canteen(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(payload): JsonBody<CanteenPayload>,
) -> CatalogResult<Json<CanteenResponse>> {
    let details = payload.validate()?;

    let mut canteen = state.canteens.find_by_id(id)?.ok_or(CatalogError::NotFound)?;

    if canteen.name != details.name && state.canteens.exists_by_name(&details.name)? {
        return Err(CatalogError::Conflict(CANTEEN_NAME_TAKEN.to_string()));
    }

    canteen.name = details.name;
    canteen.location = details.location;
    canteen.description = details.description;

    state.canteens.save(&mut canteen)?;
    log::debug!("Updated canteen {}", id);

    Ok(Json(canteen.into()))
}

pub async fn delete_canteen(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> CatalogResult<StatusCode> {
    if !state.canteens.exists_by_id(id)? {
        return Err(CatalogError::NotFound);
    }

    let dishes = state.canteens.delete_by_id(id)?;
    log::debug!("Deleted canteen {} and {} dish(es)", id, dishes);

    Ok(StatusCode::OK)
}
