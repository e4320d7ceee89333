use gt_core::{NarratorAction, TourStatus};
use gt_runtime::{ELEVATED_ROOT_Z_INDEX, HIGHLIGHT_Z_INDEX};

use crate::DemoEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowTone {
    Title,
    Normal,
    Highlighted,
    Elevated,
    Dimmed,
    Narrator,
    Actions,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScreenRow {
    pub(crate) text: String,
    pub(crate) tone: RowTone,
}

impl ScreenRow {
    fn new(text: impl Into<String>, tone: RowTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Text model of the portal with the tour layered on top. Shared by both TUI modes.
pub(crate) fn screen_rows(engine: &DemoEngine, focused: Option<&str>) -> Vec<ScreenRow> {
    let app = engine.host();
    let mut rows = vec![ScreenRow::new(
        format!("view: {}  (loads: {})", app.view(), app.view_loads()),
        RowTone::Title,
    )];

    for element in app.elements() {
        let layer = engine.layer_for(&element);
        let tone = if layer.z_index == Some(HIGHLIGHT_Z_INDEX) {
            RowTone::Highlighted
        } else if layer.z_index == Some(ELEVATED_ROOT_Z_INDEX) {
            RowTone::Elevated
        } else if !layer.pointer_events {
            RowTone::Dimmed
        } else {
            RowTone::Normal
        };
        let cursor = if focused == Some(element.id.as_str()) {
            "> "
        } else {
            "  "
        };
        let indent = "  ".repeat(element.ancestors.len());
        let marker = if tone == RowTone::Highlighted { " <==" } else { "" };
        rows.push(ScreenRow::new(
            format!(
                "{}{}{} [{}]{}",
                cursor,
                indent,
                app.label(&element),
                element.id,
                marker
            ),
            tone,
        ));
    }

    let frame = engine.frame();
    if let Some(narrator) = &frame.narrator {
        let entering = if narrator.entering { ", entering" } else { "" };
        let text = if narrator.bubble.text.is_empty() {
            "..."
        } else {
            narrator.bubble.text.as_str()
        };
        rows.push(ScreenRow::new(
            format!(
                "{} ({}{}): {}",
                narrator.persona.identity, narrator.persona.pose, entering, text
            ),
            RowTone::Narrator,
        ));
        let buttons = narrator
            .bubble
            .actions
            .iter()
            .map(|action: &NarratorAction| format!("[{}]", action))
            .collect::<Vec<_>>()
            .join(" ");
        rows.push(ScreenRow::new(format!("buttons: {}", buttons), RowTone::Actions));
    }

    let tour_line = match (frame.status, frame.step_index, &frame.step_id) {
        (TourStatus::Running, Some(index), Some(id)) => format!(
            "tour: {} step {}/{} ({})",
            frame.status,
            index + 1,
            engine.tour().steps.len(),
            id
        ),
        _ => format!("tour: {}", frame.status),
    };
    rows.push(ScreenRow::new(tour_line, RowTone::Status));
    rows
}

#[cfg(test)]
mod tui_render_tests {
    use super::*;
    use crate::cli_test_support::*;

    #[test]
    fn rows_mark_highlight_and_inert_siblings() {
        let mut engine = built_in_engine();
        engine.start();
        engine.next();

        let rows = screen_rows(&engine, Some("profile-btn"));
        let bell = rows
            .iter()
            .find(|row| row.text.contains("[notifications-bell]"))
            .expect("bell row");
        assert_eq!(bell.tone, RowTone::Highlighted);
        assert!(bell.text.ends_with("<=="));

        let profile = rows
            .iter()
            .find(|row| row.text.contains("[profile-btn]"))
            .expect("profile row");
        assert_eq!(profile.tone, RowTone::Dimmed);
        assert!(profile.text.starts_with("> "));

        let header = rows
            .iter()
            .find(|row| row.text.contains("[app-header]"))
            .expect("header row");
        assert_eq!(header.tone, RowTone::Elevated);

        assert!(rows
            .iter()
            .any(|row| row.tone == RowTone::Actions && row.text == "buttons: [skip]"));
        assert_eq!(
            rows.last().map(|row| row.text.as_str()),
            Some("tour: RUNNING step 2/9 (notifications)")
        );
    }

    #[test]
    fn idle_portal_renders_without_narrator() {
        let engine = built_in_engine();
        let rows = screen_rows(&engine, None);
        assert!(rows.iter().all(|row| row.tone != RowTone::Narrator));
        assert!(rows.iter().all(|row| row.tone != RowTone::Dimmed));
        assert_eq!(rows.last().map(|row| row.text.as_str()), Some("tour: IDLE"));
    }
}
