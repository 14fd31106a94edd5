use chrono::NaiveDate;
use serde::Deserialize;

use super::{
    canteen::Canteen,
    dish::{today, Dish},
};
use crate::{
    constants::{
        CANTEEN_ID_REQUIRED, CANTEEN_NAME_REQUIRED, DEFAULT_PRICE, DEFAULT_RATING,
        DISH_NAME_REQUIRED,
    },
    errors::{CatalogError, CatalogResult},
};

/// Body of `POST`/`PUT /api/canteens`. Ids and nested dishes in the body are ignored.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CanteenPayload {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl CanteenPayload {
    pub fn validate(self) -> CatalogResult<Canteen> {
        match self.name {
            Some(name) if !name.trim().is_empty() => Ok(Canteen {
                id: None,
                name,
                location: self.location,
                description: self.description,
                dishes: Vec::new(),
            }),
            _ => Err(CatalogError::Validation(CANTEEN_NAME_REQUIRED.to_string())),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct CanteenRef {
    pub id: Option<i64>,
}

/// Body of `POST`/`PUT /api/dishes`.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DishPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<i32>,
    pub available_date: Option<NaiveDate>,
    pub canteen: Option<CanteenRef>,
}

impl DishPayload {
    /// Create path. Name and canteen id are mandatory; a missing price or
    /// rating is replaced by its default instead of rejecting the request.
    ///
    /// Returns the referenced canteen id next to the still unattached dish.
    pub fn validate_for_create(self) -> CatalogResult<(i64, Dish)> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(CatalogError::Validation(DISH_NAME_REQUIRED.to_string())),
        };

        let canteen_id = self
            .canteen
            .and_then(|c| c.id)
            .ok_or_else(|| CatalogError::Validation(CANTEEN_ID_REQUIRED.to_string()))?;

        let dish = Dish {
            id: None,
            name,
            description: self.description,
            category: self.category,
            price: self.price.unwrap_or(DEFAULT_PRICE),
            rating: self.rating.unwrap_or(DEFAULT_RATING),
            available_date: self.available_date.unwrap_or_else(today),
            canteen: None,
        };

        Ok((canteen_id, dish))
    }

    /// Update path. Overwrites every mutable field without re-validating,
    /// so an empty name is accepted here even though creation rejects it.
    /// The canteen reference is left alone.
    pub fn apply_to(self, dish: &mut Dish) {
        dish.name = self.name.unwrap_or_default();
        dish.description = self.description;
        dish.category = self.category;
        dish.price = self.price.unwrap_or(DEFAULT_PRICE);
        dish.rating = self.rating.unwrap_or(DEFAULT_RATING);
        dish.available_date = self.available_date.unwrap_or_else(today);
    }
}
