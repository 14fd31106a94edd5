use chrono::{Local, NaiveDate};

use super::canteen::CanteenSummary;

#[derive(Debug, Clone, PartialEq)]
pub struct Dish {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub rating: i32,
    pub available_date: NaiveDate,
    // back-reference, only ever set through Canteen::add_dish or the store
    pub canteen: Option<CanteenSummary>,
}

impl Dish {
    pub fn new(
        name: &str,
        description: Option<&str>,
        category: Option<&str>,
        price: f64,
        rating: i32,
    ) -> Self {
        Dish {
            id: None,
            name: name.to_string(),
            description: description.map(str::to_string),
            category: category.map(str::to_string),
            price,
            rating,
            available_date: today(),
            canteen: None,
        }
    }

    pub fn canteen_id(&self) -> Option<i64> {
        self.canteen.as_ref().map(|c| c.id)
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
