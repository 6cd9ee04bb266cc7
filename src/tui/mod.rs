pub mod app;
pub mod theme;
pub mod ui;

pub use app::App;

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::tui::app::{InputMode, STAT_STEP, STAT_STEP_LARGE};

/// Run the interactive explorer until the user quits.
///
/// The loop is synchronous: a keypress that changes the criteria reruns
/// the whole pipeline before the next draw, so the tables are never
/// stale.
pub fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        // Short poll so flash messages expire without a keypress
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(&mut app, key);
                }
            }
        }
        app.update_flash();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Row navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Stat selection
                KeyCode::Char('h') | KeyCode::Left => app.previous_stat(),
                KeyCode::Char('l') | KeyCode::Right => app.next_stat(),
                KeyCode::Char(c @ '1'..='6') => app.select_stat((c as u8 - b'1') as usize),

                // Threshold adjustment
                KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_stat(STAT_STEP),
                KeyCode::Char('-') | KeyCode::Char('_') => app.adjust_stat(-STAT_STEP),
                KeyCode::PageUp => app.adjust_stat(STAT_STEP_LARGE),
                KeyCode::PageDown => app.adjust_stat(-STAT_STEP_LARGE),

                // Soft filters
                KeyCode::Char('g') => app.toggle_legendary(),
                KeyCode::Char('/') => app.start_name_input(),

                // Tab switching
                KeyCode::Tab => app.toggle_view(),

                // Reset
                KeyCode::Char('r') => app.reset_criteria(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        InputMode::NameInput => {
            match key.code {
                // Apply the query
                KeyCode::Enter => app.confirm_name_input(),

                // Cancel without changing the active query
                KeyCode::Esc => app.cancel_name_input(),

                // Backspace
                KeyCode::Backspace => {
                    app.name_input.pop();
                }

                // Names carry spaces, periods and gender marks, so accept
                // any printable character
                KeyCode::Char(c) if !c.is_control() => {
                    app.name_input.push(c);
                }

                // Ignore all other keys (don't propagate to Normal mode)
                _ => {}
            }
        }
        InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
