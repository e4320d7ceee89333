use gt_core::{
    CancelReason, ElementRef, Selector, SideEffect, TourDefinition, TourError, TourEvent,
    TourFrame, TourStatus, TourStep,
};
use tracing::{debug, info};

use crate::host::TourHost;
use crate::narrator::NarratorController;
use crate::navigation::NavigationBridge;
use crate::overlay::OverlayController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TimerKind {
    StepTimeout,
    InteractionSettle {
        branch: Option<SideEffect>,
        next_step: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PendingTimer {
    pub(super) id: u64,
    pub(super) due_at_ms: u64,
    pub(super) generation: u64,
    pub(super) step_index: usize,
    pub(super) kind: TimerKind,
}

/// Per-run state. Replaced on every `start`; resources are released on termination
/// but the record stays readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourSession {
    pub(super) generation: u64,
    pub(super) current_step_index: usize,
    pub(super) side_effect_applied: bool,
    pub(super) armed: Option<Selector>,
    pub(super) target_pending: bool,
    pub(super) degraded_to_manual: bool,
    pub(super) last_activation: Option<ElementRef>,
    pub(super) cancel_reason: Option<CancelReason>,
    pub(super) timers: Vec<PendingTimer>,
}

impl TourSession {
    pub(super) fn new(generation: u64) -> Self {
        Self {
            generation,
            current_step_index: 0,
            side_effect_applied: false,
            armed: None,
            target_pending: false,
            degraded_to_manual: false,
            last_activation: None,
            cancel_reason: None,
            timers: Vec::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn side_effect_applied(&self) -> bool {
        self.side_effect_applied
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn is_target_pending(&self) -> bool {
        self.target_pending
    }

    pub fn is_degraded_to_manual(&self) -> bool {
        self.degraded_to_manual
    }

    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn last_activation(&self) -> Option<&ElementRef> {
        self.last_activation.as_ref()
    }

    pub fn cancel_reason(&self) -> Option<CancelReason> {
        self.cancel_reason
    }
}

/// Drives one tour definition against a host application.
///
/// The engine never owns a clock: hosts report time through [`TourEngine::tick`]
/// and every timer is checked against the session generation and step before it fires.
#[derive(Debug)]
pub struct TourEngine<H: TourHost> {
    pub(super) tour: TourDefinition,
    pub(super) host: H,
    pub(super) overlay: OverlayController,
    pub(super) narrator: NarratorController,
    pub(super) navigation: NavigationBridge,
    pub(super) status: TourStatus,
    pub(super) session: Option<TourSession>,
    pub(super) now_ms: u64,
    pub(super) next_generation: u64,
    pub(super) next_timer_id: u64,
    pub(super) events: Vec<TourEvent>,
}

impl<H: TourHost> TourEngine<H> {
    pub fn new(tour: TourDefinition, host: H) -> Result<Self, TourError> {
        if tour.steps.is_empty() {
            return Err(TourError::new(
                "ENGINE_TOUR_EMPTY",
                format!("Tour \"{}\" has no steps.", tour.id),
            ));
        }
        if let Some(step) = tour
            .steps
            .iter()
            .enumerate()
            .find_map(|(position, step)| (step.index != position).then_some(step))
        {
            return Err(TourError::at_step(
                "ENGINE_STEP_INDEX",
                format!("Step \"{}\" is out of order.", step.id),
                step.index,
            ));
        }

        Ok(Self {
            tour,
            host,
            overlay: OverlayController::default(),
            narrator: NarratorController::default(),
            navigation: NavigationBridge::default(),
            status: TourStatus::Idle,
            session: None,
            now_ms: 0,
            next_generation: 1,
            next_timer_id: 1,
            events: Vec::new(),
        })
    }

    /// Begins a fresh run at step 0. A no-op while a run is in progress.
    pub fn start(&mut self) -> bool {
        if self.status == TourStatus::Running {
            debug!(tour = %self.tour.id, "start ignored, tour already running");
            return false;
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        self.session = Some(TourSession::new(generation));
        self.status = TourStatus::Running;
        info!(tour = %self.tour.id, generation, "tour started");
        self.events.push(TourEvent::Started { generation });

        self.overlay.show_overlay();
        self.enter_step(0);
        true
    }

    pub fn cancel(&mut self) -> bool {
        self.cancel_with(CancelReason::Host)
    }

    pub fn skip(&mut self) -> bool {
        self.cancel_with(CancelReason::Skipped)
    }

    pub(super) fn cancel_with(&mut self, reason: CancelReason) -> bool {
        if self.status != TourStatus::Running {
            debug!(status = %self.status, "cancel ignored, tour not running");
            return false;
        }
        info!(tour = %self.tour.id, reason = ?reason, "tour cancelled");
        self.teardown(TourStatus::Cancelled, Some(reason));
        self.events.push(TourEvent::Cancelled { reason });
        true
    }

    pub(super) fn complete(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.current_step_index = self.tour.steps.len();
        }
        info!(tour = %self.tour.id, "tour completed");
        self.teardown(TourStatus::Completed, None);
        self.events.push(TourEvent::Completed);
    }

    /// Releases every resource the run holds: timers, listener, highlight, overlay, narrator.
    pub(super) fn teardown(&mut self, status: TourStatus, reason: Option<CancelReason>) {
        if let Some(session) = self.session.as_mut() {
            session.timers.clear();
            session.armed = None;
            session.target_pending = false;
            session.cancel_reason = reason;
        }
        self.overlay.hide_overlay();
        self.narrator.hide();
        self.status = status;
    }

    pub fn status(&self) -> TourStatus {
        self.status
    }

    pub fn session(&self) -> Option<&TourSession> {
        self.session.as_ref()
    }

    pub fn tour(&self) -> &TourDefinition {
        &self.tour
    }

    /// The step being shown, `None` outside a running tour.
    pub fn current_step(&self) -> Option<&TourStep> {
        if self.status != TourStatus::Running {
            return None;
        }
        let session = self.session.as_ref()?;
        self.tour.steps.get(session.current_step_index)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn navigation_loads(&self) -> u64 {
        self.navigation.loads()
    }

    pub fn drain_events(&mut self) -> Vec<TourEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn frame(&self) -> TourFrame {
        let step = self.current_step();
        TourFrame {
            status: self.status,
            step_index: step.map(|step| step.index),
            step_id: step.map(|step| step.id.clone()),
            overlay: self.overlay.frame(),
            narrator: self.narrator.frame(),
        }
    }
}
