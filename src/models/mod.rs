pub mod tour;

pub use tour::{
    NewTourRequest, PropertyId, TourBooking, TourDraft, TourId, TourPatch, TourStatus, TourTime,
};
