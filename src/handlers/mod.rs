pub mod calendar;
pub mod health;
pub mod tours;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/tours", get(tours::list_tours).post(tours::create_tour))
        .route(
            "/api/tours/:id",
            get(tours::get_tour)
                .patch(tours::update_tour)
                .delete(tours::delete_tour),
        )
        .route("/api/tours/:id/calendar.ics", get(calendar::download_ics))
        .route(
            "/api/properties/:property_id/tours",
            get(tours::list_property_tours),
        )
        .route(
            "/api/properties/:property_id/slots",
            get(tours::available_slots),
        )
        .route("/api/tour-dates", get(tours::tour_dates))
        .with_state(state)
}
