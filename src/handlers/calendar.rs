use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::models::TourId;
use crate::services::calendar::generate_ics;
use crate::state::AppState;

// GET /api/tours/:id/calendar.ics
pub async fn download_ics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TourId>,
) -> Result<Response, AppError> {
    let tour = state.tours.get_by_id(id).await?;

    // Property records live in the catalog; only the key is known here.
    let property_label = format!("property {}", tour.property_id);
    let ics = generate_ics(&tour, &property_label);
    let filename = format!("tour-{id}.ics");

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        ics,
    )
        .into_response())
}
