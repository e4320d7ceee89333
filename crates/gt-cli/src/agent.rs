use std::path::Path;

use gt_core::{ActivationOutcome, TourError};

use crate::{
    collect_report, create_engine_for_tour, emit_report, load_engine_from_state, press_forward,
    resolve_tour_ref, save_engine_state, AgentArgs, AgentCommand, ClickArgs, DemoApp,
    DemoEngine, StartArgs, StatusArgs, TransitionArgs, WaitArgs,
};

pub(super) fn run_agent(args: AgentArgs) -> Result<i32, TourError> {
    match args.command {
        AgentCommand::Start(args) => run_start(args),
        AgentCommand::Next(args) => {
            run_state_transition(&args, |engine| Ok((press_forward(engine), None)))
        }
        AgentCommand::Skip(args) => run_state_transition(&args, |engine| Ok((engine.skip(), None))),
        AgentCommand::Cancel(args) => {
            run_state_transition(&args, |engine| Ok((engine.cancel(), None)))
        }
        AgentCommand::Click(args) => run_click(args),
        AgentCommand::Wait(args) => run_wait(args),
        AgentCommand::Status(args) => run_status(args),
    }
}

pub(super) fn run_start(args: StartArgs) -> Result<i32, TourError> {
    let tour = resolve_tour_ref(&args.source)?;
    let mut engine = create_engine_for_tour(&tour, DemoApp::default())?;
    let applied = engine.start();
    save_engine_state(Path::new(&args.state_out), &engine, &tour)?;
    emit_report(&collect_report(&mut engine, applied, None), Some(&args.state_out));
    Ok(0)
}

fn run_click(args: ClickArgs) -> Result<i32, TourError> {
    let transition = TransitionArgs {
        state_in: args.state_in,
        state_out: args.state_out,
    };
    let element = args.element;
    let trusted = !args.synthetic;
    run_state_transition(&transition, |engine| {
        let outcome = crate::click_element(engine, &element, trusted)?;
        Ok((outcome == ActivationOutcome::Accepted, Some(outcome)))
    })
}

fn run_wait(args: WaitArgs) -> Result<i32, TourError> {
    let transition = TransitionArgs {
        state_in: args.state_in,
        state_out: args.state_out,
    };
    let ms = args.ms;
    run_state_transition(&transition, |engine| Ok((engine.advance_clock(ms) > 0, None)))
}

fn run_status(args: StatusArgs) -> Result<i32, TourError> {
    let (_, mut engine) = load_engine_from_state(Path::new(&args.state_in))?;
    emit_report(&collect_report(&mut engine, false, None), None);
    Ok(0)
}

fn run_state_transition(
    args: &TransitionArgs,
    transition: impl FnOnce(&mut DemoEngine) -> Result<(bool, Option<ActivationOutcome>), TourError>,
) -> Result<i32, TourError> {
    let (tour, mut engine) = load_engine_from_state(Path::new(&args.state_in))?;
    let (applied, outcome) = transition(&mut engine)?;
    save_engine_state(Path::new(&args.state_out), &engine, &tour)?;
    emit_report(
        &collect_report(&mut engine, applied, outcome),
        Some(&args.state_out),
    );
    Ok(0)
}
