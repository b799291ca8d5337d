use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{NewTourRequest, PropertyId, TourBooking, TourId, TourPatch, TourTime};
use crate::services::schedule;
use crate::state::AppState;

// GET /api/tours
pub async fn list_tours(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TourBooking>>, AppError> {
    Ok(Json(state.tours.list_all().await?))
}

// GET /api/tours/:id
pub async fn get_tour(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TourId>,
) -> Result<Json<TourBooking>, AppError> {
    Ok(Json(state.tours.get_by_id(id).await?))
}

// POST /api/tours
pub async fn create_tour(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewTourRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TourBooking>), AppError> {
    let Json(request) = payload?;
    let tour = state.tours.create(request).await?;
    Ok((StatusCode::CREATED, Json(tour)))
}

// PATCH /api/tours/:id
pub async fn update_tour(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TourId>,
    payload: Result<Json<TourPatch>, JsonRejection>,
) -> Result<Json<TourBooking>, AppError> {
    let Json(patch) = payload?;
    Ok(Json(state.tours.update(id, patch).await?))
}

// DELETE /api/tours/:id
pub async fn delete_tour(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TourId>,
) -> Result<Json<TourBooking>, AppError> {
    Ok(Json(state.tours.delete(id).await?))
}

// GET /api/properties/:property_id/tours
pub async fn list_property_tours(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<PropertyId>,
) -> Result<Json<Vec<TourBooking>>, AppError> {
    Ok(Json(state.tours.list_by_property(property_id).await?))
}

// GET /api/properties/:property_id/slots?date=YYYY-MM-DD
#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: Option<String>,
}

pub async fn available_slots(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<PropertyId>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<TourTime>>, AppError> {
    let raw = query
        .date
        .ok_or_else(|| AppError::BadRequest("date query parameter is required".to_string()))?;
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("date must be YYYY-MM-DD, got {raw:?}")))?;

    Ok(Json(state.tours.list_available_slots(property_id, date).await?))
}

// GET /api/tour-dates?count=N
#[derive(Deserialize)]
pub struct TourDatesQuery {
    pub count: Option<usize>,
}

pub async fn tour_dates(Query(query): Query<TourDatesQuery>) -> Json<Vec<NaiveDate>> {
    let count = query.count.unwrap_or(schedule::DEFAULT_DATE_COUNT);
    let today = Utc::now().date_naive();
    Json(schedule::upcoming_tour_dates(today, count))
}
