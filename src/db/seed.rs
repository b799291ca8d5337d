use chrono::{NaiveDate, Utc};

use crate::errors::TourError;
use crate::models::{TourDraft, TourStatus, TourTime};

use super::TourStore;

pub fn demo_tours() -> Vec<TourDraft> {
    let now = Utc::now();
    vec![
        TourDraft {
            property_id: 1,
            customer_name: "John Doe".to_string(),
            customer_email: "john@example.com".to_string(),
            customer_phone: "555-0123".to_string(),
            tour_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default(),
            tour_time: TourTime::TenAm,
            message: "Looking forward to viewing this property".to_string(),
            status: TourStatus::Confirmed,
            created_at: now,
        },
        TourDraft {
            property_id: 2,
            customer_name: "Jane Smith".to_string(),
            customer_email: "jane@example.com".to_string(),
            customer_phone: "555-0456".to_string(),
            tour_date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap_or_default(),
            tour_time: TourTime::TwoPm,
            message: "Interested in scheduling a tour".to_string(),
            status: TourStatus::Pending,
            created_at: now,
        },
    ]
}

pub fn seed_demo_tours(store: &mut dyn TourStore) -> Result<usize, TourError> {
    if !store.all()?.is_empty() {
        return Ok(0);
    }

    let tours = demo_tours();
    let count = tours.len();
    for draft in tours {
        store.insert(draft)?;
    }
    tracing::info!(count, "seeded demo tour bookings");
    Ok(count)
}
