use gt_core::{
    AdvanceMode, CancelReason, NarratorAction, SideEffect, TourError, TourEvent, TourStatus,
    TourStep, View,
};
use tracing::{debug, error, info, warn};

use super::lifecycle::{TimerKind, TourEngine};
use crate::host::TourHost;
use crate::navigation::NavigationOutcome;

impl<H: TourHost> TourEngine<H> {
    /// Leaves the current step and shows the one after it, completing the tour
    /// after the last step of its path.
    pub fn next(&mut self) -> bool {
        if self.status != TourStatus::Running {
            debug!(status = %self.status, "next ignored, tour not running");
            return false;
        }
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let from = session.current_step_index;
        let step_count = self.tour.steps.len();
        let is_last = self
            .tour
            .steps
            .get(from)
            .map(|step| step.is_last(step_count))
            .unwrap_or(true);
        if is_last {
            self.complete();
            return true;
        }
        self.advance_to(from + 1)
    }

    /// Leaves the current step for step `to`.
    pub(super) fn advance_to(&mut self, to: usize) -> bool {
        if to >= self.tour.steps.len() {
            self.complete();
            return true;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.timers.clear();
        session.armed = None;

        let from = session.current_step_index;
        self.events.push(TourEvent::StepAdvanced { from, to });
        self.enter_step(to);
        true
    }

    /// Handles a narrator button. Buttons the bubble is not showing are refused.
    pub fn press(&mut self, action: NarratorAction) -> bool {
        if self.status != TourStatus::Running || !self.narrator.offers(action) {
            debug!(action = %action, "narrator action not offered");
            return false;
        }
        match action {
            NarratorAction::Next | NarratorAction::Finish => self.next(),
            NarratorAction::Skip => self.skip(),
        }
    }

    pub(super) fn enter_step(&mut self, index: usize) {
        let Some(step) = self.tour.steps.get(index).cloned() else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.current_step_index = index;
        session.side_effect_applied = false;
        session.armed = None;
        session.target_pending = false;
        session.degraded_to_manual = false;
        session.last_activation = None;

        info!(index, step = %step.id, advance = step.advance.label(), "step entered");
        self.events.push(TourEvent::StepEntered {
            index,
            id: step.id.clone(),
        });

        if !self.apply_step_side_effect(&step) {
            return;
        }
        self.bind_target(&step);
        self.present_step(&step);

        if let AdvanceMode::Timed { duration_ms } = step.advance {
            self.arm_timer(TimerKind::StepTimeout, duration_ms);
        }
    }

    /// Runs the step's declared side effect at most once per entry.
    /// Returns `false` when the run was torn down by a navigation fault.
    fn apply_step_side_effect(&mut self, step: &TourStep) -> bool {
        let Some(effect) = step.side_effect.as_ref() else {
            return true;
        };
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.side_effect_applied {
            return true;
        }
        session.side_effect_applied = true;
        self.apply_effect(effect)
    }

    pub(super) fn apply_effect(&mut self, effect: &SideEffect) -> bool {
        let outcome = match self.view_for_effect(effect) {
            Ok(view) => self.navigation.go_to(&mut self.host, &view),
            Err(fault) => {
                let requested = match effect {
                    SideEffect::GoTo { view } => view.to_string(),
                    SideEffect::OpenActivatedCourse => "presentation".to_string(),
                };
                self.navigation.fall_back(&mut self.host, requested, fault)
            }
        };

        match outcome {
            Ok(NavigationOutcome::Loaded(view)) => {
                self.events.push(TourEvent::NavigationApplied { view });
                true
            }
            Ok(NavigationOutcome::AlreadyVisible(_)) => true,
            Ok(NavigationOutcome::FellBack { requested, fault }) => {
                self.events.push(TourEvent::NavigationFellBack {
                    requested,
                    code: fault.code,
                    message: fault.message,
                });
                true
            }
            Err(fault) => {
                error!(code = %fault.code, message = %fault.message, "navigation fallback failed");
                self.cancel_with(CancelReason::Fault);
                false
            }
        }
    }

    fn view_for_effect(&self, effect: &SideEffect) -> Result<View, TourError> {
        match effect {
            SideEffect::GoTo { view } => Ok(view.clone()),
            SideEffect::OpenActivatedCourse => self
                .session
                .as_ref()
                .and_then(|session| session.last_activation.as_ref())
                .and_then(|element| element.dataset.get("course-id"))
                .filter(|course_id| !course_id.trim().is_empty())
                .map(|course_id| View::Presentation {
                    course_id: course_id.trim().to_string(),
                })
                .ok_or_else(|| {
                    TourError::new(
                        "NAV_COURSE_UNKNOWN",
                        "Activated element does not carry a course id.",
                    )
                }),
        }
    }

    /// Resolves the step target and moves the highlight onto it. A missing target
    /// leaves the step as plain narration and marks it for retry on the next tick.
    pub(super) fn bind_target(&mut self, step: &TourStep) {
        let Some(selector) = step.highlight_target().cloned() else {
            self.overlay.set_highlight(None);
            return;
        };
        let resolved = self.host.resolve(&selector);
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match resolved {
            Some(element) => {
                session.target_pending = false;
                session.degraded_to_manual = false;
                debug!(index = step.index, element = %element.id, "highlight applied");
                self.events.push(TourEvent::HighlightApplied {
                    index: step.index,
                    element: element.id.clone(),
                });
                self.overlay.set_highlight(Some(element));
                if step.advance == AdvanceMode::Interaction {
                    session.armed = Some(selector.clone());
                    self.events.push(TourEvent::InteractionArmed {
                        index: step.index,
                        selector,
                    });
                }
            }
            None => {
                self.overlay.set_highlight(None);
                if !session.target_pending {
                    warn!(index = step.index, selector = %selector, "step target not found");
                    self.events.push(TourEvent::HighlightMissing {
                        index: step.index,
                        selector,
                    });
                }
                session.target_pending = true;
                session.degraded_to_manual = step.advance == AdvanceMode::Interaction;
            }
        }
    }

    pub(super) fn present_step(&mut self, step: &TourStep) {
        let degraded_to_manual = self
            .session
            .as_ref()
            .map(|session| session.degraded_to_manual)
            .unwrap_or(false);
        let advance = if degraded_to_manual {
            AdvanceMode::Manual
        } else {
            step.advance
        };
        let is_last = step.is_last(self.tour.steps.len());

        if let Some(transition) = self.narrator.switch_persona(step.narrator) {
            debug!(to = %transition.to.identity, "persona switched");
            self.events.push(TourEvent::PersonaSwitched {
                from: transition.from,
                to: transition.to,
            });
        }
        let asset_available = self.host.has_persona_asset(step.narrator.identity);
        let degraded = self
            .narrator
            .present(&step.narration_text, advance, is_last, asset_available);
        if degraded {
            warn!(index = step.index, "narration degraded to blank bubble");
            self.events.push(TourEvent::NarrationDegraded { index: step.index });
        }
    }
}
