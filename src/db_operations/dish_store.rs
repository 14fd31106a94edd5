use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};

use super::Database;
use crate::{
    constants::CANTEEN_ID_REQUIRED,
    data_types::{CanteenSummary, Dish},
    errors::{is_foreign_key_violation, CatalogError, CatalogResult},
};

const SELECT_DISHES: &str = "SELECT d.id, d.name, d.description, d.category, d.price,
        d.rating, d.available_date, c.id, c.name, c.location, c.description
    FROM dishes d
    JOIN canteens c ON c.id = d.canteen_id";

#[derive(Clone)]
pub struct DishStore {
    db: Database,
}

impl DishStore {
    pub fn new(db: Database) -> Self {
        DishStore { db }
    }

    pub fn find_all(&self) -> CatalogResult<Vec<Dish>> {
        self.query(&format!("{SELECT_DISHES} ORDER BY d.id"), &[])
    }

    pub fn find_by_id(&self, id: i64) -> CatalogResult<Option<Dish>> {
        self.db.with_conn(|conn| {
            conn.prepare_cached(&format!("{SELECT_DISHES} WHERE d.id = ?1"))?
                .query_row(params![id], joined_dish_from_row)
                .optional()
        })
    }

    pub fn exists_by_id(&self, id: i64) -> CatalogResult<bool> {
        self.db.with_conn(|conn| {
            conn.prepare_cached("SELECT 1 FROM dishes WHERE id = ?1")?
                .exists(params![id])
        })
    }

    pub fn find_by_canteen_id(&self, canteen_id: i64) -> CatalogResult<Vec<Dish>> {
        self.query(
            &format!("{SELECT_DISHES} WHERE d.canteen_id = ?1 ORDER BY d.id"),
            &[&canteen_id],
        )
    }

    pub fn find_by_category(&self, category: &str) -> CatalogResult<Vec<Dish>> {
        self.query(
            &format!("{SELECT_DISHES} WHERE d.category = ?1 ORDER BY d.id"),
            &[&category],
        )
    }

    pub fn find_by_rating_at_least(&self, min_rating: i32) -> CatalogResult<Vec<Dish>> {
        self.query(
            &format!("{SELECT_DISHES} WHERE d.rating >= ?1 ORDER BY d.rating DESC, d.id"),
            &[&min_rating],
        )
    }

    /// Inserts a new dish or overwrites the mutable columns of an existing one.
    /// A new dish must already be attached to a canteen; the canteen row
    /// itself is never written. The owning canteen of a stored dish is never
    /// changed here.
    pub fn save(&self, dish: &mut Dish) -> CatalogResult<()> {
        match dish.id {
            None => {
                let canteen_id = dish.canteen_id().ok_or_else(|| {
                    CatalogError::Validation(CANTEEN_ID_REQUIRED.to_string())
                })?;
                // the canteen may have been deleted since it was looked up
                let inserted = self.db.with_conn(|conn| match insert_dish(conn, dish, canteen_id) {
                    Err(e) if is_foreign_key_violation(&e) => Ok(false),
                    res => res.map(|_| true),
                })?;
                if !inserted {
                    return Err(CatalogError::DependencyNotFound(canteen_id));
                }
                Ok(())
            }
            Some(id) => self.db.with_conn(|conn| {
                conn.prepare_cached(
                    "UPDATE dishes
                        SET name = ?2, description = ?3, category = ?4,
                            price = ?5, rating = ?6, available_date = ?7
                        WHERE id = ?1",
                )?
                .execute(params![
                    id,
                    dish.name,
                    dish.description,
                    dish.category,
                    dish.price,
                    dish.rating,
                    dish.available_date
                ])?;
                Ok(())
            }),
        }
    }

    pub fn delete_by_id(&self, id: i64) -> CatalogResult<()> {
        self.db.with_conn(|conn| {
            conn.prepare_cached("DELETE FROM dishes WHERE id = ?1")?
                .execute(params![id])?;
            Ok(())
        })
    }

    fn query(&self, sql: &str, args: &[&dyn ToSql]) -> CatalogResult<Vec<Dish>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(sql)?;
            let dishes = stmt
                .query_map(args, joined_dish_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(dishes)
        })
    }
}

pub(super) fn insert_dish(conn: &Connection, dish: &mut Dish, canteen_id: i64) -> rusqlite::Result<()> {
    conn.prepare_cached(
        "INSERT INTO dishes
            (name, description, category, price, rating, available_date, canteen_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?
    .execute(params![
        dish.name,
        dish.description,
        dish.category,
        dish.price,
        dish.rating,
        dish.available_date,
        canteen_id
    ])?;

    dish.id = Some(conn.last_insert_rowid());
    Ok(())
}

/// Maps the first seven dish columns; the canteen is supplied by the caller.
pub(super) fn dish_from_row(row: &Row, canteen: Option<CanteenSummary>) -> rusqlite::Result<Dish> {
    Ok(Dish {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        price: row.get(4)?,
        rating: row.get(5)?,
        available_date: row.get(6)?,
        canteen,
    })
}

fn joined_dish_from_row(row: &Row) -> rusqlite::Result<Dish> {
    let canteen = CanteenSummary {
        id: row.get(7)?,
        name: row.get(8)?,
        location: row.get(9)?,
        description: row.get(10)?,
    };
    dish_from_row(row, Some(canteen))
}
