use gt_core::TourError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> TourError {
    TourError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: TourError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
    );
    1
}

pub(crate) fn map_tui_io(error: std::io::Error) -> TourError {
    map_error("TUI_IO", error)
}

pub(crate) fn map_cli_tours_path(error: std::io::Error) -> TourError {
    map_error("CLI_TOURS_PATH", error)
}

pub(crate) fn map_cli_state_write(error: std::io::Error) -> TourError {
    map_error("CLI_STATE_WRITE", error)
}

pub(crate) fn map_cli_state_encode(error: serde_json::Error) -> TourError {
    map_error("CLI_STATE_WRITE", error)
}

pub(crate) fn map_cli_state_read(error: std::io::Error) -> TourError {
    map_error("CLI_STATE_READ", error)
}

pub(crate) fn map_cli_state_invalid(error: serde_json::Error) -> TourError {
    map_error("CLI_STATE_INVALID", error)
}

/// Tour lookup failures surface under the CLI's own code; compile errors keep theirs.
pub(crate) fn map_cli_tour_lookup(error: TourError) -> TourError {
    if error.code == "TOUR_NOT_FOUND" {
        return TourError {
            code: "CLI_TOUR_NOT_FOUND".to_string(),
            ..error
        };
    }
    error
}
