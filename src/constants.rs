pub const MENSA_DB: &str = "mensa-rating.sqlite";
pub const IN_MEMORY_DB: &str = ":memory:";
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

// local dev frontends (vite, expo)
pub const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:8081"];

pub const DEFAULT_PRICE: f64 = 0.0;
pub const DEFAULT_RATING: i32 = 1;

pub const CANTEEN_NAME_TAKEN: &str = "Canteen with this name already exists";
pub const DISH_NAME_REQUIRED: &str = "Dish name is required";
pub const CANTEEN_ID_REQUIRED: &str = "Canteen ID is required";
pub const CANTEEN_NAME_REQUIRED: &str = "Canteen name is required";
