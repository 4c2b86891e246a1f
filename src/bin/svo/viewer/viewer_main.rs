//! Terminal setup and the event loop of the trace viewer
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use svo::svo::parsing::Parser;

use super::app::App;
use super::model::Model;
use super::ui;

/// Run the viewer over the given sentences
pub fn run_viewer(parser: &Parser, sentences: &[String]) -> io::Result<()> {
    let model = Model::new(parser, sentences).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "no sentences to view")
    })?;
    let mut app = App::new(model);

    // Setup terminal
    enable_raw_mode()?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            // Resize needs no handling: the next draw picks up the new size
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
