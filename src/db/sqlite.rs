use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::Connection;

use crate::errors::TourError;
use crate::models::{PropertyId, TourBooking, TourDraft, TourId};

use super::{queries, TourStore};

/// SQLite-backed store. Ids come from `AUTOINCREMENT`, which never reuses a
/// value even after the highest row is deleted.
pub struct SqliteTourStore {
    conn: Mutex<Connection>,
}

impl SqliteTourStore {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let conn = super::init_db(path)?;
        Ok(Self::new(conn))
    }

    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TourStore for SqliteTourStore {
    fn all(&self) -> Result<Vec<TourBooking>, TourError> {
        Ok(queries::get_all_tours(&self.conn())?)
    }

    fn get(&self, id: TourId) -> Result<Option<TourBooking>, TourError> {
        Ok(queries::get_tour_by_id(&self.conn(), id)?)
    }

    fn for_property(&self, property_id: PropertyId) -> Result<Vec<TourBooking>, TourError> {
        Ok(queries::get_tours_for_property(&self.conn(), property_id)?)
    }

    fn insert(&mut self, draft: TourDraft) -> Result<TourBooking, TourError> {
        let id = queries::insert_tour(&self.conn(), &draft)?;
        Ok(draft.into_booking(id))
    }

    fn replace(&mut self, tour: &TourBooking) -> Result<bool, TourError> {
        Ok(queries::update_tour(&self.conn(), tour)?)
    }

    fn remove(&mut self, id: TourId) -> Result<Option<TourBooking>, TourError> {
        let conn = self.conn();
        let Some(tour) = queries::get_tour_by_id(&conn, id)? else {
            return Ok(None);
        };
        queries::delete_tour(&conn, id)?;
        Ok(Some(tour))
    }
}
