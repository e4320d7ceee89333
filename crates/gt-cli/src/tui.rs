#[cfg(coverage)]
pub(super) fn run_tui_ratatui_mode(
    context: &super::TuiCommandContext<'_>,
    engine: &mut super::DemoEngine,
) -> Result<i32, gt_core::TourError> {
    super::run_tui_line_mode(context, engine)
}

#[cfg(not(coverage))]
mod rich {
    use std::io;
    use std::path::Path;
    use std::time::{Duration, Instant};

    use crossterm::event::{self, Event, KeyCode, KeyEventKind};
    use crossterm::terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    };
    use crossterm::ExecutableCommand;
    use ratatui::backend::CrosstermBackend;
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Paragraph, Wrap};
    use ratatui::{Frame, Terminal};
    use gt_core::TourError;

    use crate::{
        click_element, load_engine_from_state, map_tui_io, press_forward, save_engine_state,
        screen_rows, DemoEngine, RowTone, TuiCommandContext, TuiUiState,
    };

    const FRAME_TICK_MS: u64 = 50;

    struct TuiTerminal {
        terminal: Terminal<CrosstermBackend<io::Stdout>>,
    }

    impl TuiTerminal {
        fn new() -> Result<Self, TourError> {
            enable_raw_mode().map_err(map_tui_io)?;
            io::stdout()
                .execute(EnterAlternateScreen)
                .map_err(map_tui_io)?;
            let backend = CrosstermBackend::new(io::stdout());
            let terminal = Terminal::new(backend).map_err(map_tui_io)?;
            Ok(Self { terminal })
        }

        fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
            &mut self.terminal
        }
    }

    impl Drop for TuiTerminal {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
        }
    }

    pub(super) fn run_tui_ratatui_mode(
        context: &TuiCommandContext<'_>,
        engine: &mut DemoEngine,
    ) -> Result<i32, TourError> {
        let mut terminal = TuiTerminal::new()?;
        let mut ui = TuiUiState {
            status: "ready: press t to start the tour".to_string(),
            ..TuiUiState::default()
        };

        let tick = Duration::from_millis(FRAME_TICK_MS);
        let mut clock_base = engine.now_ms();
        let mut clock_origin = Instant::now();

        loop {
            let elapsed = clock_origin.elapsed().as_millis() as u64;
            engine.tick(clock_base + elapsed);

            let element_count = engine.host().elements().len();
            ui.clamp_focus(element_count);
            terminal
                .terminal_mut()
                .draw(|frame| render_tui(frame, &ui, context, engine))
                .map_err(map_tui_io)?;

            if !event::poll(tick).map_err(map_tui_io)? {
                continue;
            }

            let evt = event::read().map_err(map_tui_io)?;
            if let Event::Key(key) = evt {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let outcome = handle_key(key.code, context, engine, &mut ui);
                let should_quit = match outcome {
                    Ok(KeyResult::Quit) => true,
                    Ok(KeyResult::Reloaded) => {
                        clock_base = engine.now_ms();
                        clock_origin = Instant::now();
                        false
                    }
                    Ok(KeyResult::Handled) => false,
                    Err(error) => {
                        ui.status = error.to_string();
                        false
                    }
                };
                if should_quit {
                    break;
                }
            }
        }

        Ok(0)
    }

    enum KeyResult {
        Handled,
        Reloaded,
        Quit,
    }

    fn focused_id(engine: &DemoEngine, ui: &TuiUiState) -> Option<String> {
        engine
            .host()
            .elements()
            .get(ui.focus_index)
            .map(|element| element.id.clone())
    }

    fn handle_key(
        code: KeyCode,
        context: &TuiCommandContext<'_>,
        engine: &mut DemoEngine,
        ui: &mut TuiUiState,
    ) -> Result<KeyResult, TourError> {
        let element_count = engine.host().elements().len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(KeyResult::Quit),
            KeyCode::Up | KeyCode::BackTab => ui.focus_prev(element_count),
            KeyCode::Down | KeyCode::Tab => ui.focus_next(element_count),
            KeyCode::Char('h') => ui.help_visible = !ui.help_visible,
            KeyCode::Char('t') => {
                ui.status = if engine.start() {
                    "tour started".to_string()
                } else {
                    "tour already running".to_string()
                };
            }
            KeyCode::Char('n') => {
                ui.status = if press_forward(engine) {
                    "next".to_string()
                } else {
                    "this step has no next button".to_string()
                };
            }
            KeyCode::Char('s') => {
                if engine.skip() {
                    ui.status = "tour skipped".to_string();
                }
            }
            KeyCode::Char('c') => {
                if engine.cancel() {
                    ui.status = "tour cancelled".to_string();
                }
            }
            KeyCode::Enter => {
                if let Some(element_id) = focused_id(engine, ui) {
                    let outcome = click_element(engine, &element_id, true)?;
                    ui.status = format!("click {}: {}", element_id, outcome);
                }
            }
            KeyCode::Char('w') => {
                save_engine_state(Path::new(context.state_file), engine, context.tour)?;
                ui.status = format!("saved: {}", context.state_file);
            }
            KeyCode::Char('l') => {
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
                ui.status = format!("loaded: {}", context.state_file);
                return Ok(KeyResult::Reloaded);
            }
            _ => {}
        }
        Ok(KeyResult::Handled)
    }

    fn tone_style(tone: RowTone) -> Style {
        match tone {
            RowTone::Title => Style::default().add_modifier(Modifier::BOLD),
            RowTone::Normal => Style::default(),
            RowTone::Highlighted => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            RowTone::Elevated => Style::default().fg(Color::White),
            RowTone::Dimmed => Style::default().fg(Color::DarkGray),
            RowTone::Narrator => Style::default().fg(Color::Cyan),
            RowTone::Actions => Style::default().fg(Color::Green),
            RowTone::Status => Style::default().fg(Color::Gray),
        }
    }

    fn render_tui(
        frame: &mut Frame<'_>,
        ui: &TuiUiState,
        context: &TuiCommandContext<'_>,
        engine: &DemoEngine,
    ) {
        let focused = focused_id(engine, ui);
        let mut lines_out: Vec<Line<'_>> = vec![Line::from(Span::styled(
            format!("tour: {} | state: {}", context.tour.tour_id, context.state_file),
            Style::default().fg(Color::Gray),
        ))];
        for row in screen_rows(engine, focused.as_deref()) {
            lines_out.push(Line::from(Span::styled(row.text, tone_style(row.tone))));
        }
        lines_out.push(Line::from(Span::styled(
            format!("status: {}", ui.status),
            Style::default().fg(Color::Gray),
        )));
        lines_out.push(Line::from(Span::styled(
            "keys: t start | n next | s skip | c cancel | up/down focus | enter click | w save | l load | h help | q quit",
            Style::default().fg(Color::Yellow),
        )));
        if ui.help_visible {
            lines_out.push(Line::from(Span::styled(
                "while a tour runs only the highlighted element takes clicks; interaction steps advance shortly after the click.",
                Style::default().fg(Color::Magenta),
            )));
        }

        let paragraph = Paragraph::new(lines_out).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, frame.area());
    }
}

#[cfg(not(coverage))]
pub(super) fn run_tui_ratatui_mode(
    context: &super::TuiCommandContext<'_>,
    engine: &mut super::DemoEngine,
) -> Result<i32, gt_core::TourError> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return super::run_tui_line_mode(context, engine);
    }
    rich::run_tui_ratatui_mode(context, engine)
}
