use std::io::{self, BufRead, Write};
use std::path::Path;

use gt_core::TourError;

use crate::{
    click_element, load_engine_from_state, map_tui_io, press_forward, save_engine_state,
    screen_rows, DemoEngine, TuiCommandAction, TuiCommandContext,
};

pub(crate) const LINE_HELP: &str =
    "commands: start next skip cancel click <id> wait <ms> status save load help quit";

pub(crate) fn run_tui_line_mode(
    context: &TuiCommandContext<'_>,
    engine: &mut DemoEngine,
) -> Result<i32, TourError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_tui_line_mode_with_io(context, engine, &mut reader, &mut writer)
}

pub(crate) fn run_tui_line_mode_with_io(
    context: &TuiCommandContext<'_>,
    engine: &mut DemoEngine,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, TourError> {
    writeln!(writer, "Guided tour TUI").map_err(map_tui_io)?;
    writeln!(writer, "{}", LINE_HELP).map_err(map_tui_io)?;
    write_screen(engine, writer)?;

    loop {
        let Some(raw) = prompt_input_from("> ", reader, writer)? else {
            return Ok(0);
        };
        let mut emitted = Vec::new();
        let mut emit = |line: String| emitted.push(line);
        let action = match handle_line_cmd(raw.trim(), context, engine, &mut emit) {
            Ok(action) => action,
            Err(error) => {
                emit(format!("error: {}", error));
                TuiCommandAction::Continue
            }
        };
        for line in emitted {
            writeln!(writer, "{}", line).map_err(map_tui_io)?;
        }
        match action {
            TuiCommandAction::Quit => return Ok(0),
            TuiCommandAction::NotHandled => {
                writeln!(writer, "unknown command: {}", raw.trim()).map_err(map_tui_io)?;
            }
            TuiCommandAction::Continue => write_screen(engine, writer)?,
        }
    }
}

fn write_screen(engine: &DemoEngine, writer: &mut dyn Write) -> Result<(), TourError> {
    writeln!(writer).map_err(map_tui_io)?;
    for row in screen_rows(engine, None) {
        writeln!(writer, "{}", row.text).map_err(map_tui_io)?;
    }
    Ok(())
}

pub(crate) fn handle_line_cmd(
    raw: &str,
    context: &TuiCommandContext<'_>,
    engine: &mut DemoEngine,
    emit: &mut dyn FnMut(String),
) -> Result<TuiCommandAction, TourError> {
    let mut parts = raw.split_whitespace();
    let command = parts.next().unwrap_or("");
    let argument = parts.next();

    match command {
        "start" => {
            let started = engine.start();
            emit(if started { "tour started" } else { "tour already running" }.to_string());
        }
        "next" => {
            if !press_forward(engine) {
                emit("no next button on this step".to_string());
            }
        }
        "skip" => {
            engine.skip();
        }
        "cancel" => {
            engine.cancel();
        }
        "click" => {
            let Some(element_id) = argument else {
                emit("usage: click <element-id>".to_string());
                return Ok(TuiCommandAction::Continue);
            };
            let outcome = click_element(engine, element_id, true)?;
            emit(format!("click {}: {}", element_id, outcome));
        }
        "wait" => {
            let Some(ms) = argument.and_then(|value| value.parse::<u64>().ok()) else {
                emit("usage: wait <ms>".to_string());
                return Ok(TuiCommandAction::Continue);
            };
            let fired = engine.advance_clock(ms);
            emit(format!("waited {} ms ({} timer(s) fired)", ms, fired));
        }
        "status" => {}
        "save" => {
            save_engine_state(Path::new(context.state_file), engine, context.tour)?;
            emit(format!("saved: {}", context.state_file));
        }
        "load" => {
            let (tour, resumed) = load_engine_from_state(Path::new(context.state_file))?;
            if &tour != context.tour {
                return Err(TourError::new(
                    "TUI_STATE_TOUR_MISMATCH",
                    format!(
                        "State tour mismatch. expected={} actual={}",
                        context.tour.tour_id, tour.tour_id
                    ),
                ));
            }
            *engine = resumed;
            emit(format!("loaded: {}", context.state_file));
        }
        "help" => emit(LINE_HELP.to_string()),
        "quit" => {
            emit("bye".to_string());
            return Ok(TuiCommandAction::Quit);
        }
        "" => {}
        _ => return Ok(TuiCommandAction::NotHandled),
    }
    Ok(TuiCommandAction::Continue)
}

/// Reads one line; `None` at end of input.
pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<Option<String>, TourError> {
    write!(writer, "{}", prefix).map_err(map_tui_io)?;
    writer.flush().map_err(map_tui_io)?;
    let mut input = String::new();
    let read = reader.read_line(&mut input).map_err(map_tui_io)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
