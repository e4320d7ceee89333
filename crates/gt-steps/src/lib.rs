use std::collections::BTreeMap;
use std::path::Path;

use gt_core::{TourDefinition, TourError};

mod document;
mod tour_dir;

pub use document::compile_tour_from_json;
pub use tour_dir::{load_tours_from_dir, TOUR_FILE_SUFFIX};

pub const DEFAULT_TOUR_ID: &str = "onboarding";

const ONBOARDING_TOUR_JSON: &str = include_str!("../tours/onboarding.tour.json");

/// The built-in onboarding walkthrough of the learning portal.
pub fn default_onboarding_tour() -> Result<TourDefinition, TourError> {
    compile_tour_from_json(ONBOARDING_TOUR_JSON)
}

/// Picks `tour_id` out of `tours_dir`, or the built-in tour when no directory is given.
pub fn resolve_tour(tours_dir: Option<&Path>, tour_id: &str) -> Result<TourDefinition, TourError> {
    let Some(dir) = tours_dir else {
        let tour = default_onboarding_tour()?;
        if tour.id != tour_id {
            return Err(not_found(tour_id));
        }
        return Ok(tour);
    };

    let mut tours: BTreeMap<String, TourDefinition> = load_tours_from_dir(dir)?;
    tours.remove(tour_id).ok_or_else(|| not_found(tour_id))
}

fn not_found(tour_id: &str) -> TourError {
    TourError::new(
        "TOUR_NOT_FOUND",
        format!("Tour \"{}\" is not registered.", tour_id),
    )
}

#[cfg(test)]
mod tests;
