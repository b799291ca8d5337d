use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::{PropertyId, TourBooking, TourTime};

pub const SLOTS: [TourTime; 9] = TourTime::ALL;

pub const DEFAULT_DATE_COUNT: usize = 30;

const DATE_HORIZON_DAYS: i64 = 45;

pub fn available_slots(
    tours: &[TourBooking],
    property_id: PropertyId,
    date: NaiveDate,
) -> Vec<TourTime> {
    SLOTS
        .into_iter()
        .filter(|slot| !tours.iter().any(|t| t.occupies(property_id, date, *slot)))
        .collect()
}

pub fn upcoming_tour_dates(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..DATE_HORIZON_DAYS)
        .map(|offset| today + Duration::days(offset))
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .take(count)
        .collect()
}
