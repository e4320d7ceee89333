use serde::{Deserialize, Serialize};

use crate::selector::Selector;
use crate::types::{ActivationOutcome, CancelReason, NarratorAction, PersonaVariant, TourStatus, View};

/// Stacking layer of one element as the overlay currently arranges it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub z_index: Option<i32>,
    pub pointer_events: bool,
}

impl Layer {
    pub const NATURAL: Layer = Layer {
        z_index: None,
        pointer_events: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayFrame {
    pub z_index: i32,
    pub highlighted: Option<String>,
    pub elevated_root: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleFrame {
    pub text: String,
    pub actions: Vec<NarratorAction>,
    pub degraded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarratorFrame {
    pub persona: PersonaVariant,
    /// The entrance transition is playing for a newly shown persona.
    pub entering: bool,
    pub bubble: BubbleFrame,
}

/// Everything a host needs to draw the tour for the current instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourFrame {
    pub status: TourStatus,
    pub step_index: Option<usize>,
    pub step_id: Option<String>,
    pub overlay: Option<OverlayFrame>,
    pub narrator: Option<NarratorFrame>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TourEvent {
    Started {
        generation: u64,
    },
    StepEntered {
        index: usize,
        id: String,
    },
    HighlightApplied {
        index: usize,
        element: String,
    },
    HighlightMissing {
        index: usize,
        selector: Selector,
    },
    InteractionArmed {
        index: usize,
        selector: Selector,
    },
    Activation {
        index: usize,
        element: String,
        outcome: ActivationOutcome,
    },
    NavigationApplied {
        view: View,
    },
    NavigationFellBack {
        requested: String,
        code: String,
        message: String,
    },
    PersonaSwitched {
        from: Option<PersonaVariant>,
        to: PersonaVariant,
    },
    NarrationDegraded {
        index: usize,
    },
    StepAdvanced {
        from: usize,
        to: usize,
    },
    Completed,
    Cancelled {
        reason: CancelReason,
    },
}
