pub mod canteen_store;
pub mod dish_store;

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::{
    constants::IN_MEMORY_DB,
    errors::{CatalogError, CatalogResult},
};

pub use canteen_store::CanteenStore;
pub use dish_store::DishStore;

/// Shared handle to the catalog database. Cloning is cheap, all clones use
/// the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) the SQLite file at `path` and makes sure the tables exist.
    /// `":memory:"` gives a private in-memory database.
    pub fn open(path: &str) -> CatalogResult<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        check_or_create_db_tables(&conn)?;

        log::debug!("Opened database {}", path);

        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> CatalogResult<Self> {
        Self::open(IN_MEMORY_DB)
    }

    /// Runs `f` inline on the calling task with the connection locked.
    /// Every statement here is a short local SQLite call and the guard is
    /// dropped before returning, so it is never held across an `.await`.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> rusqlite::Result<T>,
    ) -> CatalogResult<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| CatalogError::Internal("database connection poisoned".to_string()))?;

        Ok(f(&mut conn)?)
    }
}

fn check_or_create_db_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "create table if not exists canteens (
            id integer primary key autoincrement,
            name text not null unique,
            location text,
            description text
        );

        create table if not exists dishes (
            id integer primary key autoincrement,
            name text not null,
            description text,
            category text,
            price real not null,
            rating integer not null,
            available_date text not null,
            canteen_id integer not null,
            foreign key (canteen_id) references canteens(id)
        );

        create index if not exists dishes_canteen_idx on dishes (canteen_id);",
    )
}
