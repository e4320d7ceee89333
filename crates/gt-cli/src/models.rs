use gt_core::{ActivationOutcome, TourEvent, TourFrame, TourSnapshotV1, View};
use serde::{Deserialize, Serialize};

use crate::DemoApp;

pub(crate) const PLAYER_STATE_SCHEMA: &str = "player-state.v1";

/// Which tour a saved state belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TourRef {
    pub(crate) tour_id: String,
    pub(crate) tours_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerStateV1 {
    pub(crate) schema_version: String,
    pub(crate) tour: TourRef,
    pub(crate) app: DemoApp,
    pub(crate) snapshot: TourSnapshotV1,
}

/// Everything one agent operation prints.
#[derive(Debug, Clone)]
pub(crate) struct OperationReport {
    pub(crate) applied: bool,
    pub(crate) outcome: Option<ActivationOutcome>,
    pub(crate) frame: TourFrame,
    pub(crate) view: View,
    pub(crate) events: Vec<TourEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TuiCommandAction {
    NotHandled,
    Continue,
    Quit,
}

pub(crate) struct TuiCommandContext<'a> {
    pub(crate) state_file: &'a str,
    pub(crate) tour: &'a TourRef,
}
