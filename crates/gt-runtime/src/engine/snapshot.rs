use gt_core::{
    SnapshotSessionV1, SnapshotTimer, SnapshotTimerKind, TourError, TourSnapshotV1, TourStatus,
};
use tracing::debug;

use super::lifecycle::{PendingTimer, TimerKind, TourEngine, TourSession};
use crate::host::TourHost;

pub const SNAPSHOT_SCHEMA_V1: &str = "tour-snapshot.v1";

impl<H: TourHost> TourEngine<H> {
    pub fn snapshot(&self) -> TourSnapshotV1 {
        let session = self.session.as_ref().map(|session| SnapshotSessionV1 {
            generation: session.generation,
            current_step_index: session.current_step_index,
            side_effect_applied: session.side_effect_applied,
            armed_selector: session.armed.clone(),
            target_pending: session.target_pending,
            degraded_to_manual: session.degraded_to_manual,
            last_activation: session.last_activation.clone(),
            cancel_reason: session.cancel_reason,
            timers: session
                .timers
                .iter()
                .map(|timer| SnapshotTimer {
                    id: timer.id,
                    due_at_ms: timer.due_at_ms,
                    generation: timer.generation,
                    step_index: timer.step_index,
                    kind: match &timer.kind {
                        TimerKind::StepTimeout => SnapshotTimerKind::StepTimeout,
                        TimerKind::InteractionSettle { branch, next_step } => {
                            SnapshotTimerKind::InteractionSettle {
                                branch: branch.clone(),
                                next_step: *next_step,
                            }
                        }
                    },
                })
                .collect(),
        });

        TourSnapshotV1 {
            schema_version: SNAPSHOT_SCHEMA_V1.to_string(),
            tour_id: self.tour.id.clone(),
            status: self.status,
            now_ms: self.now_ms,
            next_generation: self.next_generation,
            next_timer_id: self.next_timer_id,
            session,
            overlay_visible: self.overlay.is_visible(),
            highlighted: self.overlay.highlighted().cloned(),
            displayed_persona: self.narrator.displayed(),
        }
    }

    /// Replaces the engine state with `snapshot`. The host is expected to already
    /// show the view the snapshot was taken on; the bubble is rebuilt from the step.
    pub fn resume(&mut self, snapshot: TourSnapshotV1) -> Result<(), TourError> {
        if snapshot.schema_version != SNAPSHOT_SCHEMA_V1 {
            return Err(TourError::new(
                "SNAPSHOT_SCHEMA",
                format!(
                    "Unsupported snapshot schema \"{}\", expected \"{}\".",
                    snapshot.schema_version, SNAPSHOT_SCHEMA_V1
                ),
            ));
        }
        if snapshot.tour_id != self.tour.id {
            return Err(TourError::new(
                "SNAPSHOT_TOUR_MISMATCH",
                format!(
                    "Snapshot belongs to tour \"{}\", engine runs \"{}\".",
                    snapshot.tour_id, self.tour.id
                ),
            ));
        }

        let step_count = self.tour.steps.len();
        let session = match snapshot.session {
            Some(saved) => {
                let in_range = if snapshot.status == TourStatus::Running {
                    saved.current_step_index < step_count
                } else {
                    saved.current_step_index <= step_count
                };
                if !in_range
                    || saved.timers.iter().any(|timer| {
                        let jump = match &timer.kind {
                            SnapshotTimerKind::InteractionSettle { next_step, .. } => *next_step,
                            SnapshotTimerKind::StepTimeout => None,
                        };
                        timer.step_index >= step_count
                            || jump.map(|to| to >= step_count).unwrap_or(false)
                    })
                {
                    return Err(TourError::new(
                        "SNAPSHOT_STEP_RANGE",
                        format!(
                            "Snapshot step {} is outside tour \"{}\" ({} steps).",
                            saved.current_step_index, self.tour.id, step_count
                        ),
                    ));
                }
                Some(TourSession {
                    generation: saved.generation,
                    current_step_index: saved.current_step_index,
                    side_effect_applied: saved.side_effect_applied,
                    armed: saved.armed_selector,
                    target_pending: saved.target_pending,
                    degraded_to_manual: saved.degraded_to_manual,
                    last_activation: saved.last_activation,
                    cancel_reason: saved.cancel_reason,
                    timers: saved
                        .timers
                        .into_iter()
                        .map(|timer| PendingTimer {
                            id: timer.id,
                            due_at_ms: timer.due_at_ms,
                            generation: timer.generation,
                            step_index: timer.step_index,
                            kind: match timer.kind {
                                SnapshotTimerKind::StepTimeout => TimerKind::StepTimeout,
                                SnapshotTimerKind::InteractionSettle { branch, next_step } => {
                                    TimerKind::InteractionSettle { branch, next_step }
                                }
                            },
                        })
                        .collect(),
                })
            }
            None if snapshot.status == TourStatus::Running => {
                return Err(TourError::new(
                    "SNAPSHOT_STEP_RANGE",
                    "Running snapshot carries no session.",
                ));
            }
            None => None,
        };

        self.status = snapshot.status;
        self.now_ms = snapshot.now_ms;
        self.next_generation = snapshot.next_generation.max(
            session
                .as_ref()
                .map(|session| session.generation + 1)
                .unwrap_or(1),
        );
        self.next_timer_id = snapshot.next_timer_id;
        self.session = session;
        self.events.clear();

        self.overlay.hide_overlay();
        if snapshot.overlay_visible && self.status == TourStatus::Running {
            self.overlay.show_overlay();
            self.overlay.set_highlight(snapshot.highlighted);
        }
        self.narrator.restore(None);
        if self.status == TourStatus::Running {
            self.narrator.restore(snapshot.displayed_persona);
            if let Some(step) = self.current_step().cloned() {
                self.present_step(&step);
            }
        }
        debug!(tour = %self.tour.id, status = %self.status, "snapshot resumed");
        Ok(())
    }
}
