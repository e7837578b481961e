//! SQLite storage for resolved city coordinates.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::error::StoreError;
use crate::types::Coordinate;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent city → coordinate store.
///
/// Implementations don't need to be Sync; `CoordinateCache` serializes
/// access through a mutex.
pub trait CityStore: Send {
    /// Exact, case-sensitive lookup by city name.
    fn find(&self, name: &str) -> StoreResult<Option<Coordinate>>;

    /// Record a resolved city. Rows are never updated.
    fn insert(&self, name: &str, coordinate: Coordinate) -> StoreResult<()>;

    /// Up to `limit` city names, most recently inserted first.
    fn recent(&self, limit: usize) -> StoreResult<Vec<String>>;
}

pub struct SqliteCityStore {
    conn: Connection,
}

impl SqliteCityStore {
    /// Open or create the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Open(format!("{}: {}", parent.display(), e)))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| StoreError::Open(format!("{}: {}", path.display(), e)))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store.
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Open(e.to_string()))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_cities_name ON cities(name);
            "#,
        )?;
        Ok(())
    }
}

impl CityStore for SqliteCityStore {
    fn find(&self, name: &str) -> StoreResult<Option<Coordinate>> {
        let coordinate = self
            .conn
            .query_row(
                "SELECT latitude, longitude FROM cities WHERE name = ?1 ORDER BY id LIMIT 1",
                [name],
                |row| Ok(Coordinate::new(row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(coordinate)
    }

    fn insert(&self, name: &str, coordinate: Coordinate) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO cities (name, latitude, longitude) VALUES (?1, ?2, ?3)",
            params![name, coordinate.latitude, coordinate.longitude],
        )?;
        Ok(())
    }

    fn recent(&self, limit: usize) -> StoreResult<Vec<String>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM cities ORDER BY id DESC LIMIT ?1")?;

        let names = stmt
            .query_map([limit], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(names)
    }
}
