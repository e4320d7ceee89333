use std::ffi::OsString;

use clap::Parser;
use gt_core::TourError;
use tracing_subscriber::EnvFilter;

mod agent;
mod cli_args;
mod demo_app;
mod error_map;
mod line_tui;
mod models;
mod report;
mod session_ops;
mod state_store;
mod tui;
mod tui_render;
mod tui_state;

pub(crate) use cli_args::{
    AgentArgs, AgentCommand, ClickArgs, Cli, Mode, StartArgs, StatusArgs, TourSourceArgs,
    TransitionArgs, TuiArgs, WaitArgs,
};
pub(crate) use demo_app::DemoApp;
pub(crate) use error_map::{
    emit_error, map_cli_state_encode, map_cli_state_invalid, map_cli_state_read,
    map_cli_state_write, map_cli_tour_lookup, map_cli_tours_path, map_tui_io,
};
pub(crate) use line_tui::run_tui_line_mode;
#[cfg(test)]
pub(crate) use line_tui::{handle_line_cmd, run_tui_line_mode_with_io};
pub(crate) use models::{
    OperationReport, PlayerStateV1, TourRef, TuiCommandAction, TuiCommandContext,
    PLAYER_STATE_SCHEMA,
};
#[cfg(test)]
pub(crate) use report::report_lines;
pub(crate) use report::emit_report;
pub(crate) use session_ops::{
    click_element, collect_report, create_engine_for_tour, load_engine_from_state,
    press_forward, resolve_tour_ref, save_engine_state, DemoEngine,
};
pub(crate) use state_store::{load_player_state, save_player_state};
pub(crate) use tui_render::{screen_rows, RowTone};
pub(crate) use tui_state::TuiUiState;

const DEFAULT_TUI_STATE_FILE: &str = ".guided-tour/save.json";

/// Logs go to stderr so the agent protocol on stdout stays machine readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, TourError> {
    match cli.command {
        Mode::Agent(args) => agent::run_agent(args),
        Mode::Tui(args) => run_tui(args),
    }
}

fn run_tui(args: TuiArgs) -> Result<i32, TourError> {
    let state_file = args
        .state_file
        .unwrap_or_else(|| DEFAULT_TUI_STATE_FILE.to_string());
    let tour = resolve_tour_ref(&args.source)?;
    let mut engine = create_engine_for_tour(&tour, DemoApp::default())?;
    let context = TuiCommandContext {
        state_file: &state_file,
        tour: &tour,
    };

    if args.line {
        return run_tui_line_mode(&context, &mut engine);
    }
    tui::run_tui_ratatui_mode(&context, &mut engine)
}


#[cfg(test)]
mod tests;
