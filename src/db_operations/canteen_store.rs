use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{
    dish_store::{dish_from_row, insert_dish},
    Database,
};
use crate::{
    data_types::{Canteen, CanteenSummary},
    errors::CatalogResult,
};

#[derive(Clone)]
pub struct CanteenStore {
    db: Database,
}

impl CanteenStore {
    pub fn new(db: Database) -> Self {
        CanteenStore { db }
    }

    pub fn count(&self) -> CatalogResult<i64> {
        self.db
            .with_conn(|conn| conn.query_row("SELECT count(*) FROM canteens", [], |row| row.get(0)))
    }

    pub fn find_all(&self) -> CatalogResult<Vec<Canteen>> {
        self.db.with_conn(|conn| {
            let mut canteens = conn
                .prepare_cached("SELECT id, name, location, description FROM canteens ORDER BY id")?
                .query_map([], canteen_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            for canteen in canteens.iter_mut() {
                load_dishes(conn, canteen)?;
            }
            Ok(canteens)
        })
    }

    pub fn find_by_id(&self, id: i64) -> CatalogResult<Option<Canteen>> {
        self.db.with_conn(|conn| {
            let canteen = conn
                .prepare_cached("SELECT id, name, location, description FROM canteens WHERE id = ?1")?
                .query_row(params![id], canteen_from_row)
                .optional()?;

            match canteen {
                Some(mut canteen) => {
                    load_dishes(conn, &mut canteen)?;
                    Ok(Some(canteen))
                }
                None => Ok(None),
            }
        })
    }

    /// Like `find_by_id` but skips the dish list.
    pub fn find_summary(&self, id: i64) -> CatalogResult<Option<CanteenSummary>> {
        self.db.with_conn(|conn| {
            conn.prepare_cached("SELECT id, name, location, description FROM canteens WHERE id = ?1")?
                .query_row(params![id], |row| {
                    Ok(CanteenSummary {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        location: row.get(2)?,
                        description: row.get(3)?,
                    })
                })
                .optional()
        })
    }

    pub fn exists_by_id(&self, id: i64) -> CatalogResult<bool> {
        self.db.with_conn(|conn| {
            conn.prepare_cached("SELECT 1 FROM canteens WHERE id = ?1")?
                .exists(params![id])
        })
    }

    /// Exact, case-sensitive match.
    pub fn exists_by_name(&self, name: &str) -> CatalogResult<bool> {
        self.db.with_conn(|conn| {
            conn.prepare_cached("SELECT 1 FROM canteens WHERE name = ?1")?
                .exists(params![name])
        })
    }

    /// Case-insensitive substring search over canteen names.
    pub fn find_by_name_containing(&self, fragment: &str) -> CatalogResult<Vec<Canteen>> {
        self.db.with_conn(|conn| {
            let mut canteens = conn
                .prepare_cached(
                    "SELECT id, name, location, description FROM canteens
                        WHERE instr(lower(name), lower(?1)) > 0
                        ORDER BY id",
                )?
                .query_map(params![fragment], canteen_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            for canteen in canteens.iter_mut() {
                load_dishes(conn, canteen)?;
            }
            Ok(canteens)
        })
    }

    /// Inserts or updates the canteen row, then inserts every dish of the
    /// owned collection that has no id yet. Already stored dishes are left
    /// untouched apart from their in-memory back-reference.
    pub fn save(&self, canteen: &mut Canteen) -> CatalogResult<()> {
        let was_new = canteen.id.is_none();
        let unsaved: Vec<usize> = (0..canteen.dishes.len())
            .filter(|&i| canteen.dishes[i].id.is_none())
            .collect();

        let res = self.db.with_conn(|conn| {
            let tx = conn.transaction()?;

            let canteen_id = match canteen.id {
                None => {
                    tx.prepare_cached(
                        "INSERT INTO canteens (name, location, description) VALUES (?1, ?2, ?3)",
                    )?
                    .execute(params![canteen.name, canteen.location, canteen.description])?;
                    let id = tx.last_insert_rowid();
                    canteen.id = Some(id);
                    id
                }
                Some(id) => {
                    tx.prepare_cached(
                        "UPDATE canteens
                            SET name = ?2, location = ?3, description = ?4
                            WHERE id = ?1",
                    )?
                    .execute(params![id, canteen.name, canteen.location, canteen.description])?;
                    id
                }
            };

            let summary = canteen.summary();
            for dish in canteen.dishes.iter_mut() {
                dish.canteen = summary.clone();
                if dish.id.is_none() {
                    insert_dish(&tx, dish, canteen_id)?;
                }
            }

            tx.commit()
        });

        // rolled back, so forget the ids handed out inside the transaction
        if res.is_err() {
            for i in unsaved {
                canteen.dishes[i].id = None;
            }
            if was_new {
                canteen.id = None;
                for dish in canteen.dishes.iter_mut() {
                    dish.canteen = None;
                }
            }
        }
        res
    }

    /// Removes the canteen together with all of its dishes.
    /// Returns the number of dishes that went with it.
    pub fn delete_by_id(&self, id: i64) -> CatalogResult<usize> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            let dishes = tx
                .prepare_cached("DELETE FROM dishes WHERE canteen_id = ?1")?
                .execute(params![id])?;
            tx.prepare_cached("DELETE FROM canteens WHERE id = ?1")?
                .execute(params![id])?;
            tx.commit()?;

            Ok(dishes)
        })
    }
}

fn canteen_from_row(row: &Row) -> rusqlite::Result<Canteen> {
    Ok(Canteen {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        description: row.get(3)?,
        dishes: Vec::new(),
    })
}

fn load_dishes(conn: &Connection, canteen: &mut Canteen) -> rusqlite::Result<()> {
    let summary = canteen.summary();
    canteen.dishes = conn
        .prepare_cached(
            "SELECT id, name, description, category, price, rating, available_date
                FROM dishes WHERE canteen_id = ?1 ORDER BY id",
        )?
        .query_map(params![canteen.id], |row| dish_from_row(row, summary.clone()))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(())
}
