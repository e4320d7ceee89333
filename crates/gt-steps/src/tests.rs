use super::*;
use gt_core::{AdvanceMode, PersonaIdentity, Pose, Selector, SideEffect, View};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("guided-tour-{}-{}", name, nanos));
    fs::create_dir_all(&path).expect("temp dir should be created");
    path
}

fn compile_error(source: &str) -> TourError {
    compile_tour_from_json(source).expect_err("compile should fail")
}

#[test]
fn default_onboarding_tour_compiles_in_walkthrough_order() {
    let tour = default_onboarding_tour().expect("built-in tour should compile");
    assert_eq!(tour.id, DEFAULT_TOUR_ID);
    assert_eq!(tour.settle_delay_ms, 300);

    let ids = tour.steps.iter().map(|step| step.id.as_str()).collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            "welcome",
            "notifications",
            "profile-button",
            "profile-overview",
            "back-to-menu",
            "menu-tabs",
            "pick-course",
            "in-course",
            "progress-overview",
        ]
    );
    for (position, step) in tour.steps.iter().enumerate() {
        assert_eq!(step.index, position);
    }

    let welcome = &tour.steps[0];
    assert_eq!(welcome.advance, AdvanceMode::Manual);
    assert!(welcome.target.is_none());

    let bell = &tour.steps[1];
    assert_eq!(bell.advance, AdvanceMode::Interaction);
    assert_eq!(bell.highlight_target(), Some(&Selector::id("notifications-bell")));

    let profile = &tour.steps[3];
    assert_eq!(
        profile.side_effect,
        Some(SideEffect::GoTo {
            view: View::Profile
        })
    );

    let pick = &tour.steps[6];
    assert_eq!(pick.branches.len(), 2);
    assert_eq!(pick.branches[0].effect, SideEffect::OpenActivatedCourse);
    assert_eq!(pick.branches[0].next_step, Some(7));
    assert_eq!(pick.branches[1].next_step, Some(8));

    let in_course = &tour.steps[7];
    assert_eq!(in_course.narrator.identity, PersonaIdentity::Mentor);
    assert!(matches!(in_course.advance, AdvanceMode::Timed { duration_ms: 4000 }));
    assert!(in_course.is_last(tour.steps.len()));

    let progress = &tour.steps[8];
    assert_eq!(progress.narrator.identity, PersonaIdentity::Guide);
    assert_eq!(progress.highlight_target(), Some(&Selector::id("profile-stats")));
    assert!(!tour.steps[6].is_last(tour.steps.len()));
}

#[test]
fn branch_next_step_resolves_forward_and_backward_ids() {
    let tour = compile_tour_from_json(
        r##"{ "id": "t", "steps": [
            { "id": "intro", "text": "Intro" },
            { "id": "pick", "target": "#menu", "advance": { "kind": "interaction" },
              "branches": [
                { "selector": ".card", "effect": { "kind": "openActivatedCourse" },
                  "nextStep": "course" },
                { "selector": ".back", "effect": { "kind": "goTo", "view": { "view": "menu" } },
                  "nextStep": "intro" },
                { "selector": ".plain", "effect": { "kind": "goTo", "view": { "view": "menu" } } }
              ] },
            { "id": "course", "text": "Course", "endsTour": true },
            { "id": "tail", "text": "Tail" }
        ] }"##,
    )
    .expect("compile");
    let targets = tour.steps[1]
        .branches
        .iter()
        .map(|branch| branch.next_step)
        .collect::<Vec<_>>();
    assert_eq!(targets, vec![Some(2), Some(0), None]);
    assert!(tour.steps[2].ends_tour);
    assert!(tour.steps[2].is_last(tour.steps.len()));
    assert!(!tour.steps[1].is_last(tour.steps.len()));
}

#[test]
fn narrator_is_inherited_from_previous_step() {
    let tour = compile_tour_from_json(
        r#"{
          "id": "t",
          "steps": [
            { "id": "a", "text": "A", "narrator": { "identity": "mentor", "pose": "talk" } },
            { "id": "b", "text": "B" }
          ]
        }"#,
    )
    .expect("compile");
    assert_eq!(tour.title, "t");
    assert_eq!(tour.steps[1].narrator.identity, PersonaIdentity::Mentor);
    assert_eq!(tour.steps[1].narrator.pose, Pose::Talk);
    assert_eq!(tour.steps[0].advance, AdvanceMode::Manual);
}

#[test]
fn target_without_explicit_highlight_is_highlighted() {
    let tour = compile_tour_from_json(
        r##"{ "id": "t", "steps": [
            { "id": "a", "target": "#bell" },
            { "id": "b", "target": "#bell", "highlight": false }
        ] }"##,
    )
    .expect("compile");
    assert!(tour.steps[0].highlight);
    assert_eq!(tour.steps[1].highlight_target(), None);
}

#[test]
fn rejects_structural_errors_with_codes() {
    assert_eq!(compile_error("{").code, "TOUR_JSON_INVALID");
    assert_eq!(
        compile_error(r#"{ "id": " ", "steps": [ { "id": "a" } ] }"#).code,
        "TOUR_ID_EMPTY"
    );
    assert_eq!(
        compile_error(r#"{ "id": "t", "steps": [] }"#).code,
        "TOUR_STEPS_EMPTY"
    );
    let duplicate = compile_error(r#"{ "id": "t", "steps": [ { "id": "a" }, { "id": "a" } ] }"#);
    assert_eq!(duplicate.code, "TOUR_STEP_ID_DUPLICATE");
    assert_eq!(duplicate.step_index, Some(1));
    assert_eq!(
        compile_error(r#"{ "id": "t", "steps": [ { "id": "a", "unknown": 1 } ] }"#).code,
        "TOUR_JSON_INVALID"
    );
}

#[test]
fn rejects_invalid_step_semantics_with_codes() {
    let selector = compile_error(
        r##"{ "id": "t", "steps": [ { "id": "a" }, { "id": "b", "target": "#app-view .header" } ] }"##,
    );
    assert_eq!(selector.code, "TOUR_SELECTOR_INVALID");
    assert_eq!(selector.step_index, Some(1));

    assert_eq!(
        compile_error(
            r#"{ "id": "t", "steps": [ { "id": "a", "advance": { "kind": "interaction" } } ] }"#
        )
        .code,
        "TOUR_INTERACTION_TARGET"
    );
    assert_eq!(
        compile_error(
            r##"{ "id": "t", "steps": [ { "id": "a", "target": "#x", "highlight": false,
                 "advance": { "kind": "interaction" } } ] }"##
        )
        .code,
        "TOUR_INTERACTION_TARGET"
    );
    assert_eq!(
        compile_error(
            r#"{ "id": "t", "steps": [ { "id": "a", "advance": { "kind": "timed", "durationMs": 0 } } ] }"#
        )
        .code,
        "TOUR_TIMED_DURATION"
    );
    assert_eq!(
        compile_error(
            r#"{ "id": "t", "steps": [ { "id": "a", "branches": [
                 { "selector": ".card", "effect": { "kind": "openActivatedCourse" } } ] } ] }"#
        )
        .code,
        "TOUR_BRANCH_MODE"
    );

    let unknown_target = compile_error(
        r##"{ "id": "t", "steps": [ { "id": "a", "target": "#menu",
             "advance": { "kind": "interaction" }, "branches": [
             { "selector": ".card", "effect": { "kind": "openActivatedCourse" },
               "nextStep": "nowhere" } ] } ] }"##,
    );
    assert_eq!(unknown_target.code, "TOUR_BRANCH_TARGET");
    assert_eq!(unknown_target.step_index, Some(0));

    let step_level_course = compile_error(
        r#"{ "id": "t", "steps": [ { "id": "a" },
             { "id": "b", "sideEffect": { "kind": "openActivatedCourse" } } ] }"#,
    );
    assert_eq!(step_level_course.code, "TOUR_EFFECT_CONTEXT");
    assert_eq!(step_level_course.step_index, Some(1));
}

#[test]
fn load_tours_from_dir_scans_tour_files_recursively() {
    let root = temp_dir("tours");
    fs::create_dir_all(root.join("nested")).expect("nested");
    fs::write(
        root.join("a.tour.json"),
        r#"{ "id": "alpha", "steps": [ { "id": "s" } ] }"#,
    )
    .expect("write a");
    fs::write(
        root.join("nested").join("b.tour.json"),
        r#"{ "id": "beta", "steps": [ { "id": "s" } ] }"#,
    )
    .expect("write b");
    fs::write(root.join("notes.json"), "{}").expect("write ignored");

    let tours = load_tours_from_dir(&root).expect("load");
    assert_eq!(tours.keys().cloned().collect::<Vec<_>>(), vec!["alpha", "beta"]);

    let beta = resolve_tour(Some(&root), "beta").expect("resolve");
    assert_eq!(beta.id, "beta");
    assert_eq!(
        resolve_tour(Some(&root), "gamma").expect_err("missing").code,
        "TOUR_NOT_FOUND"
    );
}

#[test]
fn load_tours_from_dir_reports_empty_duplicate_and_missing_dirs() {
    let empty = temp_dir("tours-empty");
    fs::write(empty.join("readme.txt"), "no tours").expect("write");
    assert_eq!(
        load_tours_from_dir(&empty).expect_err("empty").code,
        "TOUR_DIR_EMPTY"
    );

    let duplicate = temp_dir("tours-dup");
    for name in ["a.tour.json", "b.tour.json"] {
        fs::write(
            duplicate.join(name),
            r#"{ "id": "same", "steps": [ { "id": "s" } ] }"#,
        )
        .expect("write");
    }
    assert_eq!(
        load_tours_from_dir(&duplicate).expect_err("duplicate").code,
        "TOUR_ID_DUPLICATE"
    );

    let missing = empty.join("missing");
    assert_eq!(
        load_tours_from_dir(&missing).expect_err("missing").code,
        "TOUR_DIR_NOT_FOUND"
    );
}

#[test]
fn resolve_tour_without_dir_only_knows_built_in() {
    assert_eq!(
        resolve_tour(None, DEFAULT_TOUR_ID).expect("built-in").id,
        DEFAULT_TOUR_ID
    );
    assert_eq!(
        resolve_tour(None, "other").expect_err("unknown").code,
        "TOUR_NOT_FOUND"
    );
}
