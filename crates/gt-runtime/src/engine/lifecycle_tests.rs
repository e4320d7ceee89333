use gt_core::{CancelReason, Layer, NarratorAction, PersonaIdentity, Pose, TourEvent, TourStatus};

use super::runtime_test_support::*;
use super::{TourEngine, TourSession};

const THREE_MANUAL_STEPS: &str = r#"{
  "id": "mini",
  "steps": [
    { "id": "one", "text": "One" },
    { "id": "two", "text": "Two" },
    { "id": "three", "text": "Three" }
  ]
}"#;

#[test]
fn new_rejects_empty_and_out_of_order_tours() {
    let mut tour = onboarding();
    tour.steps.clear();
    let error = TourEngine::new(tour, FakeHost::lms()).expect_err("empty tour");
    assert_eq!(error.code, "ENGINE_TOUR_EMPTY");

    let mut tour = onboarding();
    tour.steps.swap(0, 1);
    let error = TourEngine::new(tour, FakeHost::lms()).expect_err("bad order");
    assert_eq!(error.code, "ENGINE_STEP_INDEX");
    assert_eq!(error.step_index, Some(1));
}

#[test]
fn idle_engine_shows_nothing_and_ignores_next_and_cancel() {
    let mut engine = TourEngine::new(onboarding(), FakeHost::lms()).expect("engine");
    assert_eq!(engine.status(), TourStatus::Idle);
    assert!(!engine.next());
    assert!(!engine.cancel());
    assert!(!engine.skip());

    let frame = engine.frame();
    assert!(frame.overlay.is_none());
    assert!(frame.narrator.is_none());
    assert!(engine.current_step().is_none());
    assert!(engine.drain_events().is_empty());
}

#[test]
fn start_enters_first_step_with_overlay_and_narrator() {
    let mut engine = started(onboarding(), FakeHost::lms());
    assert_eq!(engine.status(), TourStatus::Running);
    assert_eq!(engine.current_step().map(|step| step.id.as_str()), Some("welcome"));

    let frame = engine.frame();
    assert_eq!(frame.step_index, Some(0));
    let overlay = frame.overlay.expect("overlay visible");
    assert_eq!(overlay.highlighted, None);
    let narrator = frame.narrator.expect("narrator visible");
    assert_eq!(narrator.persona.identity, PersonaIdentity::Guide);
    assert_eq!(narrator.persona.pose, Pose::Wave);
    assert!(narrator.entering);
    assert_eq!(
        narrator.bubble.actions,
        vec![NarratorAction::Next, NarratorAction::Skip]
    );

    let events = engine.drain_events();
    assert!(matches!(events[0], TourEvent::Started { generation: 1 }));
    assert!(matches!(events[1], TourEvent::StepEntered { index: 0, .. }));
}

#[test]
fn start_while_running_is_a_no_op() {
    let mut engine = started(onboarding(), FakeHost::lms());
    engine.next();
    assert!(!engine.start());
    assert_eq!(engine.session().map(TourSession::generation), Some(1));
    assert_eq!(engine.session().map(TourSession::current_step_index), Some(1));
}

#[test]
fn next_moves_by_exactly_one_and_completes_after_last_step() {
    let mut engine = started(tour_from_json(THREE_MANUAL_STEPS), FakeHost::lms());
    let mut seen = vec![engine.session().map(TourSession::current_step_index)];
    while engine.status() == TourStatus::Running {
        assert!(engine.next());
        seen.push(engine.session().map(TourSession::current_step_index));
    }
    assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(3)]);
    assert_eq!(engine.status(), TourStatus::Completed);
    assert!(engine.frame().overlay.is_none());
    assert!(engine.frame().narrator.is_none());
    assert!(!engine.next());

    let events = engine.drain_events();
    let advanced = events
        .iter()
        .filter_map(|event| match event {
            TourEvent::StepAdvanced { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(advanced, vec![(0, 1), (1, 2)]);
    assert_eq!(events.last(), Some(&TourEvent::Completed));
}

#[test]
fn last_manual_step_offers_finish() {
    let mut engine = started(tour_from_json(THREE_MANUAL_STEPS), FakeHost::lms());
    engine.next();
    engine.next();
    assert!(!engine.press(NarratorAction::Next));
    assert!(engine.press(NarratorAction::Finish));
    assert_eq!(engine.status(), TourStatus::Completed);
}

#[test]
fn cancel_is_idempotent_and_releases_everything() {
    let mut engine = started(onboarding(), FakeHost::lms());
    engine.next();
    assert!(engine.frame().overlay.and_then(|o| o.highlighted).is_some());

    assert!(engine.cancel());
    let after_first = engine.snapshot();
    assert!(!engine.cancel());
    assert_eq!(engine.snapshot(), after_first);

    assert_eq!(engine.status(), TourStatus::Cancelled);
    let session = engine.session().expect("session record kept");
    assert_eq!(session.cancel_reason(), Some(CancelReason::Host));
    assert!(!session.is_armed());
    assert_eq!(session.pending_timer_count(), 0);
    assert!(engine.frame().overlay.is_none());
    assert!(engine.frame().narrator.is_none());

    let bell = engine.host().element("notifications-bell");
    assert_eq!(engine.layer_for(&bell), Layer::NATURAL);
}

#[test]
fn skip_button_cancels_with_skipped_reason() {
    let mut engine = started(onboarding(), FakeHost::lms());
    assert!(engine.press(NarratorAction::Skip));
    assert_eq!(engine.status(), TourStatus::Cancelled);
    assert_eq!(
        engine.session().and_then(TourSession::cancel_reason),
        Some(CancelReason::Skipped)
    );
    assert!(!engine.press(NarratorAction::Skip));
}

#[test]
fn start_after_termination_resets_to_first_step_with_new_generation() {
    let mut engine = started(onboarding(), FakeHost::lms());
    engine.next();
    engine.cancel();
    assert!(engine.start());

    let session = engine.session().expect("session");
    assert_eq!(session.generation(), 2);
    assert_eq!(session.current_step_index(), 0);
    assert_eq!(session.cancel_reason(), None);
    assert!(engine.frame().narrator.expect("narrator").entering);

    let mut engine = started(tour_from_json(THREE_MANUAL_STEPS), FakeHost::lms());
    for _ in 0..3 {
        engine.next();
    }
    assert_eq!(engine.status(), TourStatus::Completed);
    assert!(engine.start());
    assert_eq!(engine.session().map(TourSession::current_step_index), Some(0));
}
