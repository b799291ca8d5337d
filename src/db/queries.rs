use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::models::{PropertyId, TourBooking, TourDraft, TourId, TourStatus, TourTime};

const TOUR_COLUMNS: &str = "id, property_id, customer_name, customer_email, customer_phone, \
                            tour_date, tour_time, message, status, created_at";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn insert_tour(conn: &Connection, draft: &TourDraft) -> rusqlite::Result<TourId> {
    conn.execute(
        "INSERT INTO tour_bookings (property_id, customer_name, customer_email, customer_phone, tour_date, tour_time, message, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            draft.property_id,
            draft.customer_name,
            draft.customer_email,
            draft.customer_phone,
            draft.tour_date.format(DATE_FORMAT).to_string(),
            draft.tour_time.as_str(),
            draft.message,
            draft.status.as_str(),
            draft.created_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_all_tours(conn: &Connection) -> rusqlite::Result<Vec<TourBooking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TOUR_COLUMNS} FROM tour_bookings ORDER BY id ASC"
    ))?;

    let tours = stmt
        .query_map([], parse_tour_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tours)
}

pub fn get_tours_for_property(
    conn: &Connection,
    property_id: PropertyId,
) -> rusqlite::Result<Vec<TourBooking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TOUR_COLUMNS} FROM tour_bookings WHERE property_id = ?1 ORDER BY id ASC"
    ))?;

    let tours = stmt
        .query_map(params![property_id], parse_tour_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tours)
}

pub fn get_tour_by_id(conn: &Connection, id: TourId) -> rusqlite::Result<Option<TourBooking>> {
    let result = conn.query_row(
        &format!("SELECT {TOUR_COLUMNS} FROM tour_bookings WHERE id = ?1"),
        params![id],
        parse_tour_row,
    );

    match result {
        Ok(tour) => Ok(Some(tour)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn update_tour(conn: &Connection, tour: &TourBooking) -> rusqlite::Result<bool> {
    let count = conn.execute(
        "UPDATE tour_bookings SET property_id = ?1, customer_name = ?2, customer_email = ?3,
           customer_phone = ?4, tour_date = ?5, tour_time = ?6, message = ?7, status = ?8
         WHERE id = ?9",
        params![
            tour.property_id,
            tour.customer_name,
            tour.customer_email,
            tour.customer_phone,
            tour.tour_date.format(DATE_FORMAT).to_string(),
            tour.tour_time.as_str(),
            tour.message,
            tour.status.as_str(),
            tour.id,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_tour(conn: &Connection, id: TourId) -> rusqlite::Result<bool> {
    let count = conn.execute("DELETE FROM tour_bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_tour_row(row: &Row) -> rusqlite::Result<TourBooking> {
    let tour_date: String = row.get(5)?;
    let tour_time: String = row.get(6)?;
    let status: String = row.get(8)?;
    let created_at: String = row.get(9)?;

    let tour_date = NaiveDate::parse_from_str(&tour_date, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
    let tour_time = TourTime::parse(&tour_time).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            Type::Text,
            format!("unknown tour time: {tour_time}").into(),
        )
    })?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?;

    Ok(TourBooking {
        id: row.get(0)?,
        property_id: row.get(1)?,
        customer_name: row.get(2)?,
        customer_email: row.get(3)?,
        customer_phone: row.get(4)?,
        tour_date,
        tour_time,
        message: row.get(7)?,
        status: TourStatus::parse(&status),
        created_at,
    })
}
