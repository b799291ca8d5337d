use crate::errors::TourError;
use crate::models::{PropertyId, TourBooking, TourDraft, TourId};

use super::TourStore;

/// Process-local store. `last_id` is a high-water mark so an id freed by a
/// delete is never handed out again.
#[derive(Debug, Default)]
pub struct MemoryTourStore {
    tours: Vec<TourBooking>,
    last_id: TourId,
}

impl MemoryTourStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TourStore for MemoryTourStore {
    fn all(&self) -> Result<Vec<TourBooking>, TourError> {
        Ok(self.tours.clone())
    }

    fn get(&self, id: TourId) -> Result<Option<TourBooking>, TourError> {
        Ok(self.tours.iter().find(|t| t.id == id).cloned())
    }

    fn for_property(&self, property_id: PropertyId) -> Result<Vec<TourBooking>, TourError> {
        Ok(self
            .tours
            .iter()
            .filter(|t| t.property_id == property_id)
            .cloned()
            .collect())
    }

    fn insert(&mut self, draft: TourDraft) -> Result<TourBooking, TourError> {
        let max_id = self.tours.iter().map(|t| t.id).max().unwrap_or(0);
        let id = max_id.max(self.last_id) + 1;
        self.last_id = id;

        let tour = draft.into_booking(id);
        self.tours.push(tour.clone());
        Ok(tour)
    }

    fn replace(&mut self, tour: &TourBooking) -> Result<bool, TourError> {
        match self.tours.iter_mut().find(|t| t.id == tour.id) {
            Some(slot) => {
                *slot = tour.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&mut self, id: TourId) -> Result<Option<TourBooking>, TourError> {
        Ok(self
            .tours
            .iter()
            .position(|t| t.id == id)
            .map(|index| self.tours.remove(index)))
    }
}
