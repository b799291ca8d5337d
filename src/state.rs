use std::sync::Arc;

use crate::services::tours::TourService;

pub struct AppState {
    pub tours: Arc<TourService>,
}
