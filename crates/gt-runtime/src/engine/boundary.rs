use gt_core::{ActivationOutcome, ElementRef, Layer, TourEvent, TourStatus};
use tracing::{debug, info};

use super::lifecycle::{PendingTimer, TimerKind, TourEngine};
use crate::host::TourHost;

impl<H: TourHost> TourEngine<H> {
    pub fn layer_for(&self, element: &ElementRef) -> Layer {
        self.overlay.layer_for(element)
    }

    pub fn accepts_pointer(&self, element: &ElementRef) -> bool {
        self.overlay.accepts_pointer(element)
    }

    /// Routes a pointer activation through the overlay.
    ///
    /// `trusted` is false for script-synthesized events, which never satisfy an
    /// interaction step. On a step with branches the click must land on (or inside)
    /// an element one of them matches; anything else passes through. The first
    /// accepted activation disarms the step; it advances once the tour's settle delay
    /// has elapsed on the host clock.
    pub fn activate(&mut self, element: &ElementRef, trusted: bool) -> ActivationOutcome {
        if self.status != TourStatus::Running {
            return ActivationOutcome::PassThrough;
        }
        let Some(session) = self.session.as_ref() else {
            return ActivationOutcome::PassThrough;
        };
        let index = session.current_step_index;

        if !self.overlay.accepts_pointer(element) {
            debug!(element = %element.id, "activation blocked by overlay");
            self.record_activation(index, element, ActivationOutcome::Blocked);
            return ActivationOutcome::Blocked;
        }
        if session.armed.is_none() {
            return ActivationOutcome::PassThrough;
        }
        let within_target = self
            .overlay
            .highlighted()
            .map(|target| element.is_same_or_within(target))
            .unwrap_or(false);
        if !within_target {
            return ActivationOutcome::PassThrough;
        }
        if !trusted {
            debug!(element = %element.id, "synthetic activation ignored");
            self.record_activation(index, element, ActivationOutcome::Ignored);
            return ActivationOutcome::Ignored;
        }

        let step = &self.tour.steps[index];
        let matched = step.branches.iter().find_map(|branch| {
            element
                .closest(&branch.selector)
                .map(|activated| (branch, activated))
        });
        let (kind, activated) = match matched {
            Some((branch, activated)) => (
                TimerKind::InteractionSettle {
                    branch: Some(branch.effect.clone()),
                    next_step: branch.next_step,
                },
                activated,
            ),
            None if !step.branches.is_empty() => {
                debug!(element = %element.id, "activation matches no branch");
                return ActivationOutcome::PassThrough;
            }
            None => (
                TimerKind::InteractionSettle {
                    branch: None,
                    next_step: None,
                },
                element.clone(),
            ),
        };

        info!(index, element = %element.id, activated = %activated.id, "interaction accepted");
        if let Some(session) = self.session.as_mut() {
            session.armed = None;
            session.last_activation = Some(activated);
        }
        self.record_activation(index, element, ActivationOutcome::Accepted);
        let settle = self.tour.settle_delay_ms;
        self.arm_timer(kind, settle);
        ActivationOutcome::Accepted
    }

    /// Moves the host clock forward and fires every live timer that has come due,
    /// in due order. Returns how many timers fired.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }

        let mut fired = 0usize;
        while self.status == TourStatus::Running {
            let Some(timer) = self.take_due_timer() else {
                break;
            };
            if !self.timer_is_live(&timer) {
                debug!(timer = timer.id, "stale timer discarded");
                continue;
            }
            fired += 1;
            self.fire_timer(timer);
        }

        if self.status == TourStatus::Running {
            self.retry_pending_target();
        }
        fired
    }

    pub fn advance_clock(&mut self, delta_ms: u64) -> usize {
        let now = self.now_ms.saturating_add(delta_ms);
        self.tick(now)
    }

    pub(super) fn arm_timer(&mut self, kind: TimerKind, delay_ms: u64) {
        let id = self.next_timer_id;
        let due_at_ms = self.now_ms.saturating_add(delay_ms);
        let Some(session) = self.session.as_mut() else {
            return;
        };
        self.next_timer_id += 1;
        session.timers.push(PendingTimer {
            id,
            due_at_ms,
            generation: session.generation,
            step_index: session.current_step_index,
            kind,
        });
    }

    fn take_due_timer(&mut self) -> Option<PendingTimer> {
        let now = self.now_ms;
        let session = self.session.as_mut()?;
        let position = session
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_at_ms <= now)
            .min_by_key(|(_, timer)| (timer.due_at_ms, timer.id))
            .map(|(position, _)| position)?;
        Some(session.timers.remove(position))
    }

    fn timer_is_live(&self, timer: &PendingTimer) -> bool {
        self.status == TourStatus::Running
            && self
                .session
                .as_ref()
                .map(|session| {
                    session.generation == timer.generation
                        && session.current_step_index == timer.step_index
                })
                .unwrap_or(false)
    }

    fn fire_timer(&mut self, timer: PendingTimer) {
        match timer.kind {
            TimerKind::StepTimeout => {
                debug!(step = timer.step_index, "step duration elapsed");
                self.next();
            }
            TimerKind::InteractionSettle { branch, next_step } => {
                if let Some(effect) = branch {
                    if !self.apply_effect(&effect) {
                        return;
                    }
                }
                match next_step {
                    Some(to) => self.advance_to(to),
                    None => self.next(),
                };
            }
        }
    }

    /// Re-resolves a step target that was missing on entry. When it shows up the
    /// highlight moves onto it and an interaction step is re-armed.
    fn retry_pending_target(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.target_pending {
            return;
        }
        let Some(step) = self.tour.steps.get(session.current_step_index).cloned() else {
            return;
        };
        self.bind_target(&step);
        let resolved = self
            .session
            .as_ref()
            .map(|session| !session.target_pending)
            .unwrap_or(false);
        if resolved {
            debug!(index = step.index, "late target resolved");
            self.present_step(&step);
        }
    }

    fn record_activation(&mut self, index: usize, element: &ElementRef, outcome: ActivationOutcome) {
        self.events.push(TourEvent::Activation {
            index,
            element: element.id.clone(),
            outcome,
        });
    }
}
