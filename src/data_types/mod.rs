pub mod canteen;
pub mod dish;
pub mod payloads;
pub mod responses;

pub use canteen::{Canteen, CanteenSummary};
pub use dish::Dish;
pub use payloads::{CanteenPayload, CanteenRef, DishPayload};
pub use responses::{CanteenResponse, DishEntry, DishResponse};
