use serde::{Deserialize, Serialize};

use super::dish::Dish;

/// A physical canteen location and the dishes it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Canteen {
    pub id: Option<i64>,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub dishes: Vec<Dish>,
}

/// Canteen as seen from one of its dishes, without the dish list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CanteenSummary {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl Canteen {
    pub fn new(name: &str, location: Option<&str>, description: Option<&str>) -> Self {
        Canteen {
            id: None,
            name: name.to_string(),
            location: location.map(str::to_string),
            description: description.map(str::to_string),
            dishes: Vec::new(),
        }
    }

    /// Takes ownership of `dish` and points its back-reference at this canteen.
    ///
    /// On an unsaved canteen the reference stays empty until the store
    /// assigns an id and reattaches the dish on save.
    pub fn add_dish(&mut self, mut dish: Dish) {
        dish.canteen = self.summary();
        self.dishes.push(dish);
    }

    pub fn summary(&self) -> Option<CanteenSummary> {
        Some(CanteenSummary {
            id: self.id?,
            name: self.name.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
        })
    }
}

/// A saved canteen with its dish list not loaded.
impl From<CanteenSummary> for Canteen {
    fn from(summary: CanteenSummary) -> Self {
        Canteen {
            id: Some(summary.id),
            name: summary.name,
            location: summary.location,
            description: summary.description,
            dishes: Vec::new(),
        }
    }
}
