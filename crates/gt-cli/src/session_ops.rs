use std::path::{Path, PathBuf};

use gt_core::{ActivationOutcome, NarratorAction, TourDefinition, TourError};
use gt_runtime::TourEngine;
use tracing::debug;

use crate::{
    load_player_state, map_cli_tour_lookup, map_cli_tours_path, save_player_state, DemoApp,
    OperationReport, PlayerStateV1, TourRef, TourSourceArgs, PLAYER_STATE_SCHEMA,
};

pub(crate) type DemoEngine = TourEngine<DemoApp>;

pub(crate) fn resolve_tour_ref(source: &TourSourceArgs) -> Result<TourRef, TourError> {
    let tours_dir = match &source.tours_dir {
        Some(raw) => {
            let path = PathBuf::from(raw);
            let absolute = if path.is_absolute() {
                path
            } else {
                std::env::current_dir()
                    .map_err(map_cli_tours_path)?
                    .join(path)
            };
            Some(absolute.to_string_lossy().to_string())
        }
        None => None,
    };
    Ok(TourRef {
        tour_id: source.tour.clone(),
        tours_dir,
    })
}

pub(crate) fn load_tour(tour: &TourRef) -> Result<TourDefinition, TourError> {
    gt_steps::resolve_tour(tour.tours_dir.as_deref().map(Path::new), &tour.tour_id)
        .map_err(map_cli_tour_lookup)
}

pub(crate) fn create_engine_for_tour(tour: &TourRef, app: DemoApp) -> Result<DemoEngine, TourError> {
    TourEngine::new(load_tour(tour)?, app)
}

pub(crate) fn resume_engine_for_state(state: PlayerStateV1) -> Result<DemoEngine, TourError> {
    let mut engine = create_engine_for_tour(&state.tour, state.app)?;
    engine.resume(state.snapshot)?;
    Ok(engine)
}

pub(crate) fn save_engine_state(
    path: &Path,
    engine: &DemoEngine,
    tour: &TourRef,
) -> Result<(), TourError> {
    let state = PlayerStateV1 {
        schema_version: PLAYER_STATE_SCHEMA.to_string(),
        tour: tour.clone(),
        app: engine.host().clone(),
        snapshot: engine.snapshot(),
    };
    save_player_state(path, &state)
}

pub(crate) fn load_engine_from_state(path: &Path) -> Result<(TourRef, DemoEngine), TourError> {
    let state = load_player_state(path)?;
    let tour = state.tour.clone();
    let engine = resume_engine_for_state(state)?;
    Ok((tour, engine))
}

/// Clicks an element of the portal with the tour overlay in between. The portal's
/// own action only runs when the overlay lets the click through.
pub(crate) fn click_element(
    engine: &mut DemoEngine,
    element_id: &str,
    trusted: bool,
) -> Result<ActivationOutcome, TourError> {
    let element = engine.host().element(element_id).ok_or_else(|| {
        TourError::new(
            "CLI_ELEMENT_NOT_FOUND",
            format!("No element \"{}\" on the current view.", element_id),
        )
    })?;
    let outcome = engine.activate(&element, trusted);
    if outcome.allows_default() {
        engine.host_mut().run_default_action(&element)?;
    } else {
        debug!(element = element_id, "default action suppressed");
    }
    Ok(outcome)
}

/// The bubble's forward button, whichever of Next or Finish it shows.
pub(crate) fn press_forward(engine: &mut DemoEngine) -> bool {
    engine.press(NarratorAction::Next) || engine.press(NarratorAction::Finish)
}

pub(crate) fn collect_report(
    engine: &mut DemoEngine,
    applied: bool,
    outcome: Option<ActivationOutcome>,
) -> OperationReport {
    OperationReport {
        applied,
        outcome,
        frame: engine.frame(),
        view: engine.host().view().clone(),
        events: engine.drain_events(),
    }
}
