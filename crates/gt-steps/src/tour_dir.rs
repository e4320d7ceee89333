use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use gt_core::{TourDefinition, TourError};
use walkdir::WalkDir;

use crate::compile_tour_from_json;

pub const TOUR_FILE_SUFFIX: &str = ".tour.json";

/// Compiles every `*.tour.json` file below `dir`, keyed by tour id.
pub fn load_tours_from_dir(dir: &Path) -> Result<BTreeMap<String, TourDefinition>, TourError> {
    if !dir.is_dir() {
        return Err(TourError::new(
            "TOUR_DIR_NOT_FOUND",
            format!("tours-dir is not a directory: {}", dir.display()),
        ));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|error| TourError::new("TOUR_DIR_READ", error.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_tour = entry
            .file_name()
            .to_str()
            .map(|name| name.ends_with(TOUR_FILE_SUFFIX))
            .unwrap_or(false);
        if is_tour {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(TourError::new(
            "TOUR_DIR_EMPTY",
            format!("No {} files under {}", TOUR_FILE_SUFFIX, dir.display()),
        ));
    }

    let mut tours = BTreeMap::new();
    for path in paths {
        let source = fs::read_to_string(&path)
            .map_err(|error| TourError::new("TOUR_DIR_READ", error.to_string()))?;
        let tour = compile_tour_from_json(&source).map_err(|error| TourError {
            message: format!("{}: {}", path.display(), error.message),
            ..error
        })?;
        if tours.contains_key(&tour.id) {
            return Err(TourError::new(
                "TOUR_ID_DUPLICATE",
                format!("Tour id \"{}\" is declared twice ({}).", tour.id, path.display()),
            ));
        }
        tours.insert(tour.id.clone(), tour);
    }
    Ok(tours)
}
