use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selector::Selector;

pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;

/// Top-level views of the host application the tour may switch to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum View {
    Menu,
    Profile,
    Presentation { course_id: String },
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu => write!(f, "menu"),
            Self::Profile => write!(f, "profile"),
            Self::Presentation { course_id } => write!(f, "presentation:{}", course_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SideEffect {
    GoTo { view: View },
    /// Opens the presentation of the course carried by the last accepted activation.
    OpenActivatedCourse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AdvanceMode {
    Manual,
    Timed { duration_ms: u64 },
    Interaction,
}

impl AdvanceMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Timed { .. } => "timed",
            Self::Interaction => "interaction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonaIdentity {
    /// Main-menu guidance.
    Guide,
    /// In-course guidance.
    Mentor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pose {
    #[default]
    Idle,
    Wave,
    Point,
    Talk,
    Celebrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaVariant {
    pub identity: PersonaIdentity,
    #[serde(default)]
    pub pose: Pose,
}

impl PersonaVariant {
    pub fn new(identity: PersonaIdentity, pose: Pose) -> Self {
        Self { identity, pose }
    }
}

impl Default for PersonaVariant {
    fn default() -> Self {
        Self::new(PersonaIdentity::Guide, Pose::Idle)
    }
}

impl fmt::Display for PersonaIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guide => write!(f, "guide"),
            Self::Mentor => write!(f, "mentor"),
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Idle => "idle",
            Self::Wave => "wave",
            Self::Point => "point",
            Self::Talk => "talk",
            Self::Celebrate => "celebrate",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepBranch {
    pub selector: Selector,
    pub effect: SideEffect,
    /// Step shown once the effect has run. `None` continues with the following step.
    #[serde(default)]
    pub next_step: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourStep {
    pub index: usize,
    pub id: String,
    pub narration_text: String,
    pub target: Option<Selector>,
    pub highlight: bool,
    pub advance: AdvanceMode,
    pub side_effect: Option<SideEffect>,
    pub narrator: PersonaVariant,
    pub branches: Vec<StepBranch>,
    /// Completes the tour after this step even when later steps exist. Lets a branch
    /// path finish without running into the steps of another path.
    #[serde(default)]
    pub ends_tour: bool,
}

impl TourStep {
    pub fn is_last(&self, step_count: usize) -> bool {
        self.ends_tour || self.index + 1 >= step_count
    }

    pub fn highlight_target(&self) -> Option<&Selector> {
        if self.highlight {
            self.target.as_ref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDefinition {
    pub id: String,
    pub title: String,
    pub settle_delay_ms: u64,
    pub steps: Vec<TourStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TourStatus {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl TourStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for TourStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CancelReason {
    Host,
    Skipped,
    Fault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NarratorAction {
    Next,
    Finish,
    Skip,
}

impl fmt::Display for NarratorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Next => "next",
            Self::Finish => "finish",
            Self::Skip => "skip",
        };
        write!(f, "{}", text)
    }
}

/// Result of routing a click through the tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivationOutcome {
    /// The tour is not involved; the element behaves normally.
    PassThrough,
    /// The overlay intercepted the click.
    Blocked,
    /// Interactive element, but a synthetic event: no tour effect.
    Ignored,
    /// The armed target was hit; the step advances after the settle delay.
    Accepted,
}

impl ActivationOutcome {
    /// Whether the host should run the element's own default action.
    pub fn allows_default(self) -> bool {
        !matches!(self, Self::Blocked)
    }
}

impl fmt::Display for ActivationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::PassThrough => "PASS_THROUGH",
            Self::Blocked => "BLOCKED",
            Self::Ignored => "IGNORED",
            Self::Accepted => "ACCEPTED",
        };
        write!(f, "{}", text)
    }
}
