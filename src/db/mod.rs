pub mod memory;
pub mod migrations;
pub mod queries;
pub mod seed;
pub mod sqlite;

use anyhow::Context;
use rusqlite::Connection;

use crate::errors::TourError;
use crate::models::{PropertyId, TourBooking, TourDraft, TourId};

pub use memory::MemoryTourStore;
pub use sqlite::SqliteTourStore;

/// `insert` must assign an id greater than any it has handed out before.
/// Listings come back in insertion order.
pub trait TourStore: Send + Sync {
    fn all(&self) -> Result<Vec<TourBooking>, TourError>;

    fn get(&self, id: TourId) -> Result<Option<TourBooking>, TourError>;

    fn for_property(&self, property_id: PropertyId) -> Result<Vec<TourBooking>, TourError>;

    fn insert(&mut self, draft: TourDraft) -> Result<TourBooking, TourError>;

    fn replace(&mut self, tour: &TourBooking) -> Result<bool, TourError>;

    fn remove(&mut self, id: TourId) -> Result<Option<TourBooking>, TourError>;
}

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}
