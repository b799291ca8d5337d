use std::time::Duration;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::db::{seed, MemoryTourStore, TourStore};
use crate::errors::TourError;
use crate::models::{
    NewTourRequest, PropertyId, TourBooking, TourDraft, TourId, TourPatch, TourStatus, TourTime,
};
use crate::services::schedule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    pub list_all: Duration,
    pub get_by_id: Duration,
    pub list_by_property: Duration,
    pub available_slots: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Latency {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn mock() -> Self {
        Self {
            list_all: Duration::from_millis(300),
            get_by_id: Duration::from_millis(250),
            list_by_property: Duration::from_millis(300),
            available_slots: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(350),
            delete: Duration::from_millis(300),
        }
    }
}

pub struct TourService {
    store: RwLock<Box<dyn TourStore>>,
    latency: Latency,
}

impl TourService {
    pub fn new(store: impl TourStore + 'static) -> Self {
        let store: Box<dyn TourStore> = Box::new(store);
        Self {
            store: RwLock::new(store),
            latency: Latency::none(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTourStore::new())
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    pub async fn seed_demo(&self) -> Result<usize, TourError> {
        let mut store = self.store.write().await;
        seed::seed_demo_tours(&mut **store)
    }

    pub async fn list_all(&self) -> Result<Vec<TourBooking>, TourError> {
        self.simulate(self.latency.list_all).await;
        self.store.read().await.all()
    }

    pub async fn get_by_id(&self, id: TourId) -> Result<TourBooking, TourError> {
        self.simulate(self.latency.get_by_id).await;
        self.store
            .read()
            .await
            .get(id)?
            .ok_or(TourError::NotFound(id))
    }

    pub async fn list_by_property(
        &self,
        property_id: PropertyId,
    ) -> Result<Vec<TourBooking>, TourError> {
        self.simulate(self.latency.list_by_property).await;
        self.store.read().await.for_property(property_id)
    }

    pub async fn list_available_slots(
        &self,
        property_id: PropertyId,
        date: NaiveDate,
    ) -> Result<Vec<TourTime>, TourError> {
        self.simulate(self.latency.available_slots).await;
        let tours = self.store.read().await.for_property(property_id)?;
        Ok(schedule::available_slots(&tours, property_id, date))
    }

    pub async fn create(&self, request: NewTourRequest) -> Result<TourBooking, TourError> {
        self.simulate(self.latency.create).await;
        let draft = validate_request(request)?;

        // check and insert under one write guard
        let mut store = self.store.write().await;
        let taken = store
            .for_property(draft.property_id)?
            .iter()
            .any(|t| t.occupies(draft.property_id, draft.tour_date, draft.tour_time));
        if taken {
            tracing::warn!(
                property_id = draft.property_id,
                date = %draft.tour_date,
                time = %draft.tour_time,
                "tour slot already booked"
            );
            return Err(TourError::Conflict {
                property_id: draft.property_id,
                date: draft.tour_date,
                time: draft.tour_time,
            });
        }

        let tour = store.insert(draft)?;
        tracing::info!(
            tour_id = tour.id,
            property_id = tour.property_id,
            date = %tour.tour_date,
            time = %tour.tour_time,
            "tour booked"
        );
        Ok(tour)
    }

    /// Merges `patch` onto the booking. The slot is not re-checked, so moving a
    /// booking onto an occupied slot through here is allowed.
    pub async fn update(&self, id: TourId, patch: TourPatch) -> Result<TourBooking, TourError> {
        self.simulate(self.latency.update).await;

        let mut store = self.store.write().await;
        let mut tour = store.get(id)?.ok_or(TourError::NotFound(id))?;
        patch.apply(&mut tour);
        if !store.replace(&tour)? {
            return Err(TourError::NotFound(id));
        }

        tracing::info!(tour_id = id, status = tour.status.as_str(), "tour updated");
        Ok(tour)
    }

    pub async fn delete(&self, id: TourId) -> Result<TourBooking, TourError> {
        self.simulate(self.latency.delete).await;

        let removed = self
            .store
            .write()
            .await
            .remove(id)?
            .ok_or(TourError::NotFound(id))?;
        tracing::info!(tour_id = id, "tour deleted");
        Ok(removed)
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_request(request: NewTourRequest) -> Result<TourDraft, TourError> {
    let property_id = request.property_id.filter(|id| *id > 0);
    let customer_name = required(request.customer_name);
    let customer_email = required(request.customer_email);
    let tour_date = required(request.tour_date);
    let tour_time = required(request.tour_time);

    let (
        Some(property_id),
        Some(customer_name),
        Some(customer_email),
        Some(tour_date),
        Some(tour_time),
    ) = (property_id, customer_name, customer_email, tour_date, tour_time)
    else {
        return Err(TourError::Validation("missing required fields".to_string()));
    };

    let tour_date = NaiveDate::parse_from_str(tour_date.trim(), "%Y-%m-%d").map_err(|_| {
        TourError::Validation(format!("tourDate must be YYYY-MM-DD, got {tour_date:?}"))
    })?;
    let tour_time = TourTime::parse(&tour_time)
        .ok_or_else(|| TourError::Validation(format!("unknown tourTime {tour_time:?}")))?;

    Ok(TourDraft {
        property_id,
        customer_name,
        customer_email,
        customer_phone: request.customer_phone.unwrap_or_default(),
        tour_date,
        tour_time,
        message: request.message.unwrap_or_default(),
        status: TourStatus::Pending,
        created_at: Utc::now(),
    })
}
