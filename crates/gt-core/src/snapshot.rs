use serde::{Deserialize, Serialize};

use crate::element::ElementRef;
use crate::selector::Selector;
use crate::types::{CancelReason, PersonaVariant, SideEffect, TourStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SnapshotTimerKind {
    StepTimeout,
    InteractionSettle {
        branch: Option<SideEffect>,
        #[serde(default)]
        next_step: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotTimer {
    pub id: u64,
    pub due_at_ms: u64,
    pub generation: u64,
    pub step_index: usize,
    pub kind: SnapshotTimerKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSessionV1 {
    pub generation: u64,
    pub current_step_index: usize,
    pub side_effect_applied: bool,
    pub armed_selector: Option<Selector>,
    pub target_pending: bool,
    pub degraded_to_manual: bool,
    pub last_activation: Option<ElementRef>,
    pub cancel_reason: Option<CancelReason>,
    pub timers: Vec<SnapshotTimer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSnapshotV1 {
    pub schema_version: String,
    pub tour_id: String,
    pub status: TourStatus,
    pub now_ms: u64,
    pub next_generation: u64,
    pub next_timer_id: u64,
    pub session: Option<SnapshotSessionV1>,
    pub overlay_visible: bool,
    pub highlighted: Option<ElementRef>,
    pub displayed_persona: Option<PersonaVariant>,
}
