use super::*;
use crate::cli_test_support::*;
use gt_core::{ActivationOutcome, TourStatus, View};

use std::fs;
use std::io::Cursor;

fn run_line_script(script: &str, state_file: &str) -> (i32, String, DemoEngine) {
    let tour = built_in_ref();
    let context = TuiCommandContext {
        state_file,
        tour: &tour,
    };
    let mut engine = built_in_engine();
    let mut reader = Cursor::new(script.as_bytes().to_vec());
    let mut writer: Vec<u8> = Vec::new();
    let code = run_tui_line_mode_with_io(&context, &mut engine, &mut reader, &mut writer)
        .expect("line mode should run");
    (code, String::from_utf8_lossy(&writer).to_string(), engine)
}

#[test]
fn report_lines_follow_protocol_order() {
    let mut engine = built_in_engine();
    engine.start();
    let report = collect_report(&mut engine, true, None);
    let lines = report_lines(&report, Some("/tmp/state.json"));

    assert_eq!(lines[0], "RESULT:OK");
    assert_eq!(lines[1], "APPLIED:true");
    assert_eq!(lines[2], "STATUS:RUNNING");
    assert_eq!(lines[3], "STEP:0|welcome");
    assert!(lines[4].starts_with("TEXT_JSON:\"Greetings!"));
    assert_eq!(lines[5], "PERSONA:guide|wave");
    assert_eq!(lines[6], "ACTION:next");
    assert_eq!(lines[7], "ACTION:skip");
    assert_eq!(lines[8], "HIGHLIGHT:NONE");
    assert_eq!(lines[9], "VIEW:menu");
    assert!(lines.iter().any(|line| line.starts_with("EVENT_JSON:")));
    assert_eq!(lines.last().map(String::as_str), Some("STATE_OUT:/tmp/state.json"));
}

#[test]
fn report_lines_for_blocked_click_and_idle_tour() {
    let mut engine = built_in_engine();
    engine.start();
    engine.next();
    engine.drain_events();
    let outcome = click_element(&mut engine, "profile-btn", true).expect("click");
    let report = collect_report(&mut engine, false, Some(outcome));
    let lines = report_lines(&report, None);
    assert!(lines.contains(&"OUTCOME:BLOCKED".to_string()));
    assert!(lines.contains(&"HIGHLIGHT:notifications-bell".to_string()));
    assert_eq!(lines.last().map(String::as_str), Some("STATE_OUT:NONE"));

    let mut idle = built_in_engine();
    let lines = report_lines(&collect_report(&mut idle, false, None), None);
    assert!(lines.contains(&"STATUS:IDLE".to_string()));
    assert!(lines.contains(&"STEP:NONE".to_string()));
    assert!(lines.iter().all(|line| !line.starts_with("TEXT_JSON:")));
}

#[test]
fn line_mode_walks_the_first_interaction_step() {
    let state_file = temp_path("line-walk.json");
    let script = "start\nnext\nclick profile-btn\nclick notifications-bell\nwait 300\nbogus\nquit\n";
    let (code, output, engine) = run_line_script(script, state_file.to_string_lossy().as_ref());

    assert_eq!(code, 0);
    assert!(output.contains("Guided tour TUI"));
    assert!(output.contains("tour started"));
    assert!(output.contains("click profile-btn: BLOCKED"));
    assert!(output.contains("click notifications-bell: ACCEPTED"));
    assert!(output.contains("waited 300 ms (1 timer(s) fired)"));
    assert!(output.contains("unknown command: bogus"));
    assert!(output.contains("bye"));
    assert_eq!(
        engine.current_step().map(|step| step.id.as_str()),
        Some("profile-button")
    );
}

#[test]
fn line_mode_reports_errors_and_keeps_going() {
    let state_file = temp_path("line-errors.json");
    let script = "click nowhere\nload\nwait soon\nstatus\n";
    let (code, output, engine) = run_line_script(script, state_file.to_string_lossy().as_ref());

    assert_eq!(code, 0);
    assert!(output.contains("error: CLI_ELEMENT_NOT_FOUND"));
    assert!(output.contains("error: CLI_STATE_NOT_FOUND"));
    assert!(output.contains("usage: wait <ms>"));
    assert!(output.contains("tour: IDLE"));
    assert_eq!(engine.status(), TourStatus::Idle);
}

#[test]
fn line_commands_save_and_load_mid_tour() {
    let state_file = temp_path("line-save-load.json");
    let state_file = state_file.to_string_lossy().to_string();
    let tour = built_in_ref();
    let context = TuiCommandContext {
        state_file: &state_file,
        tour: &tour,
    };
    let mut emitted = Vec::new();
    let mut emit = |line: String| emitted.push(line);

    let mut engine = built_in_engine();
    handle_line_cmd("start", &context, &mut engine, &mut emit).expect("start");
    handle_line_cmd("next", &context, &mut engine, &mut emit).expect("next");
    handle_line_cmd("save", &context, &mut engine, &mut emit).expect("save");
    handle_line_cmd("skip", &context, &mut engine, &mut emit).expect("skip");
    assert_eq!(engine.status(), TourStatus::Cancelled);

    let action = handle_line_cmd("load", &context, &mut engine, &mut emit).expect("load");
    assert_eq!(action, TuiCommandAction::Continue);
    assert_eq!(engine.status(), TourStatus::Running);
    assert_eq!(
        engine.current_step().map(|step| step.id.as_str()),
        Some("notifications")
    );

    let other = TourRef {
        tour_id: "other".to_string(),
        tours_dir: None,
    };
    let foreign = TuiCommandContext {
        state_file: &state_file,
        tour: &other,
    };
    let error = handle_line_cmd("load", &foreign, &mut engine, &mut emit).expect_err("mismatch");
    assert_eq!(error.code, "TUI_STATE_TOUR_MISMATCH");
    assert!(emitted.iter().any(|line| line.starts_with("saved: ")));
    assert!(emitted.iter().any(|line| line.starts_with("loaded: ")));
}

#[test]
fn next_on_interaction_step_is_refused() {
    let state_file = temp_path("line-refuse.json");
    let tour = built_in_ref();
    let state_file = state_file.to_string_lossy().to_string();
    let context = TuiCommandContext {
        state_file: &state_file,
        tour: &tour,
    };
    let mut emitted = Vec::new();
    let mut emit = |line: String| emitted.push(line);
    let mut engine = built_in_engine();
    handle_line_cmd("start", &context, &mut engine, &mut emit).expect("start");
    handle_line_cmd("next", &context, &mut engine, &mut emit).expect("next");
    handle_line_cmd("next", &context, &mut engine, &mut emit).expect("next again");
    assert!(emitted.contains(&"no next button on this step".to_string()));
    assert_eq!(
        engine.current_step().map(|step| step.id.as_str()),
        Some("notifications")
    );
}

#[test]
fn player_state_rejects_bad_files() {
    let missing = temp_path("missing-state.json");
    assert_eq!(
        load_player_state(&missing).expect_err("missing").code,
        "CLI_STATE_NOT_FOUND"
    );

    let invalid = temp_path("invalid-state.json");
    fs::write(&invalid, "{not json").expect("write");
    assert_eq!(
        load_player_state(&invalid).expect_err("invalid").code,
        "CLI_STATE_INVALID"
    );

    let engine = built_in_engine();
    let wrong_schema = temp_path("schema-state.json");
    let state = PlayerStateV1 {
        schema_version: "player-state.v0".to_string(),
        tour: built_in_ref(),
        app: DemoApp::default(),
        snapshot: engine.snapshot(),
    };
    save_player_state(&wrong_schema, &state).expect("save");
    assert_eq!(
        load_player_state(&wrong_schema).expect_err("schema").code,
        "CLI_STATE_SCHEMA"
    );
}

#[test]
fn saved_state_keeps_portal_view_and_pending_settle() {
    let tour = built_in_ref();
    let mut engine = built_in_engine();
    engine.start();
    engine.next();
    assert_eq!(
        click_element(&mut engine, "notifications-bell", true).expect("click"),
        ActivationOutcome::Accepted
    );

    let state_file = temp_path("pending-settle.json");
    save_engine_state(&state_file, &engine, &tour).expect("save");
    let (_, mut resumed) = load_engine_from_state(&state_file).expect("load");
    assert!(resumed.host().notifications_open());
    assert_eq!(resumed.advance_clock(300), 1);
    assert_eq!(
        resumed.current_step().map(|step| step.id.as_str()),
        Some("profile-button")
    );
    assert_eq!(resumed.host().view(), &View::Menu);
}

fn walk_to_course_picker(engine: &mut DemoEngine) {
    engine.start();
    engine.next();
    for target in ["notifications-bell", "profile-btn"] {
        click_element(engine, target, true).expect("click");
        engine.advance_clock(300);
    }
    engine.next();
    click_element(engine, "back-to-menu-btn", true).expect("click");
    engine.advance_clock(300);
    engine.next();
    assert_eq!(
        engine.current_step().map(|step| step.id.as_str()),
        Some("pick-course")
    );
}

#[test]
fn course_picker_ignores_the_background_and_accepts_nested_buttons() {
    let mut engine = built_in_engine();
    walk_to_course_picker(&mut engine);

    assert_eq!(
        click_element(&mut engine, "main-menu", true).expect("background"),
        ActivationOutcome::PassThrough
    );
    engine.advance_clock(300);
    assert_eq!(
        engine.current_step().map(|step| step.id.as_str()),
        Some("pick-course")
    );

    assert_eq!(
        click_element(&mut engine, "course-c2-open", true).expect("open"),
        ActivationOutcome::Accepted
    );
    engine.advance_clock(300);
    assert_eq!(
        engine.current_step().map(|step| step.id.as_str()),
        Some("in-course")
    );
    assert_eq!(
        engine.host().view(),
        &View::Presentation {
            course_id: "c2".to_string()
        }
    );
}

#[test]
fn progress_link_leads_to_the_progress_step() {
    let mut engine = built_in_engine();
    walk_to_course_picker(&mut engine);

    click_element(&mut engine, "progress-link", true).expect("link");
    engine.advance_clock(300);
    assert_eq!(
        engine.current_step().map(|step| step.id.as_str()),
        Some("progress-overview")
    );
    assert_eq!(engine.host().view(), &View::Profile);
    assert!(press_forward(&mut engine));
    assert_eq!(engine.status(), TourStatus::Completed);
}

#[test]
fn tour_ref_resolves_relative_tours_dir() {
    let source = TourSourceArgs {
        tours_dir: Some("tours".to_string()),
        tour: "custom".to_string(),
    };
    let tour = resolve_tour_ref(&source).expect("ref");
    assert_eq!(tour.tour_id, "custom");
    let dir = tour.tours_dir.expect("dir");
    assert!(std::path::Path::new(&dir).is_absolute());
    assert!(dir.ends_with("tours"));
}

#[test]
fn cli_reports_argument_errors_with_clap_exit_code() {
    assert_eq!(run_cli_from_args(["gt-cli", "agent", "bogus"]), 2);
}
