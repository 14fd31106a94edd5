pub mod constants;
pub mod data_types;
pub mod db_operations;
pub mod errors;
pub mod handlers;
pub mod seed_loader;
pub mod shared_main;
