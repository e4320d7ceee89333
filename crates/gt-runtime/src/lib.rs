mod engine;
mod host;
mod narrator;
mod navigation;
mod overlay;

pub use engine::{TourEngine, TourSession, SNAPSHOT_SCHEMA_V1};
pub use host::TourHost;
pub use narrator::{NarratorController, PersonaTransition};
pub use navigation::{NavigationBridge, NavigationOutcome};
pub use overlay::{
    OverlayController, ELEVATED_ROOT_Z_INDEX, HIGHLIGHT_Z_INDEX, NARRATOR_Z_INDEX,
    OVERLAY_Z_INDEX,
};
