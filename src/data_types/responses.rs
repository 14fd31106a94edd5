use chrono::NaiveDate;
use serde::Serialize;

use super::{
    canteen::{Canteen, CanteenSummary},
    dish::Dish,
};

// Canteens embed their dishes and dishes embed their canteen, so each side
// is shaped explicitly to cut the cycle.

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CanteenResponse {
    pub id: Option<i64>,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub dishes: Vec<DishEntry>,
}

/// A dish nested in its canteen, without the back-reference.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DishEntry {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub rating: i32,
    pub available_date: NaiveDate,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DishResponse {
    #[serde(flatten)]
    pub dish: DishEntry,
    pub canteen: Option<CanteenSummary>,
}

impl From<Canteen> for CanteenResponse {
    fn from(canteen: Canteen) -> Self {
        CanteenResponse {
            id: canteen.id,
            name: canteen.name,
            location: canteen.location,
            description: canteen.description,
            dishes: canteen.dishes.into_iter().map(DishEntry::from).collect(),
        }
    }
}

impl From<Dish> for DishEntry {
    fn from(dish: Dish) -> Self {
        DishEntry {
            id: dish.id,
            name: dish.name,
            description: dish.description,
            category: dish.category,
            price: dish.price,
            rating: dish.rating,
            available_date: dish.available_date,
        }
    }
}

impl From<Dish> for DishResponse {
    fn from(mut dish: Dish) -> Self {
        let canteen = dish.canteen.take();
        DishResponse {
            dish: dish.into(),
            canteen,
        }
    }
}
