pub mod canteen_handlers;
pub mod dish_handlers;

use std::time::Duration;

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    db_operations::{CanteenStore, Database, DishStore},
    errors::CatalogError,
};

use canteen_handlers::{
    create_canteen, delete_canteen, get_canteen, list_canteens, search_canteens, update_canteen,
};
use dish_handlers::{
    create_dish, delete_dish, get_dish, list_dishes, list_dishes_by_canteen,
    list_dishes_by_category, list_dishes_by_min_rating, update_dish,
};

#[derive(Clone)]
pub struct AppState {
    pub canteens: CanteenStore,
    pub dishes: DishStore,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState {
            canteens: CanteenStore::new(db.clone()),
            dishes: DishStore::new(db),
        }
    }
}

/// `axum::Json`, but a body that does not parse is reported as a validation error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(CatalogError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with the same error shape as [`JsonBody`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(CatalogError))]
pub struct PathParam<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(CatalogError))]
pub struct QueryParam<T>(pub T);

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/canteens", get(list_canteens).post(create_canteen))
        .route("/api/canteens/search", get(search_canteens))
        .route(
            "/api/canteens/{id}",
            get(get_canteen).put(update_canteen).delete(delete_canteen),
        )
        .route("/api/dishes", get(list_dishes).post(create_dish))
        .route(
            "/api/dishes/{id}",
            get(get_dish).put(update_dish).delete(delete_dish),
        )
        .route("/api/dishes/canteen/{canteen_id}", get(list_dishes_by_canteen))
        .route("/api/dishes/category/{category}", get(list_dishes_by_category))
        .route("/api/dishes/rating/{min_rating}", get(list_dishes_by_min_rating))
        .layer(cors)
        .with_state(state)
}

/// Cross-origin access for an explicit list of origins, never a wildcard.
pub fn cors_layer<S: AsRef<str>>(origins: &[S]) -> Result<CorsLayer, CatalogError> {
    let origins = origins
        .iter()
        .map(|origin| match origin.as_ref() {
            "*" => Err(CatalogError::Validation("Wildcard origin is not allowed".to_string())),
            origin => HeaderValue::from_str(origin)
                .map_err(|e| CatalogError::Validation(format!("Invalid origin '{}': {}", origin, e))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60)))
}
